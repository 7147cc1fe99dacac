use druid::{Data, Lens, Point, Rect, Size};

/// The reset popup. Opening and closing always write the whole value, so `visible` and the
/// coordinates never disagree about their shape. `x` and `y` are window coordinates.
#[derive(Clone, Copy, PartialEq, Data, Lens, Debug, Default)]
pub struct ContextMenu {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

impl ContextMenu {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn open(&mut self, at: Point) {
        *self = Self {
            visible: true,
            x: at.x,
            y: at.y,
        };
    }

    pub fn close(&mut self) {
        *self = Self {
            visible: false,
            ..*self
        };
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(), size)
    }

    /// Whether a window position lands on the visible popup.
    pub fn contains(&self, pos: Point, size: Size) -> bool {
        self.visible && self.rect(size).contains(pos)
    }
}
