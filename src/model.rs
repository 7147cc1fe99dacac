///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

use druid::{MouseButton, Point};

use crate::config::KnobConfig;
use crate::context_menu::ContextMenu;
use crate::dragging::{clamp_angle, DragSession};
use crate::{KnobParams, KnobState};

pub type ChangeCallback = Box<dyn FnMut(f64)>;

/// What a pointer press or release asks of the widget hosting the model.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PointerResponse {
    pub handled: bool,
    pub repaint: bool,
    pub relayout: bool,
}

impl PointerResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    fn menu_changed() -> Self {
        Self {
            handled: true,
            repaint: true,
            relayout: true,
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// KnobModel
///
///////////////////////////////////////////////////////////////////////////////////////////////////
/// Interaction state of a knob, independent of any toolkit context.
///
/// Every method that can move the angle goes through one commit step: the value is
/// clamped first, and the change callback only fires when the stored angle actually
/// changes. Methods return `true` when the knob needs to be repainted.
pub struct KnobModel {
    config: KnobConfig,
    params: KnobParams,
    angle: f64,
    state: KnobState,
    menu: ContextMenu,
    menu_pressed: bool,
    mounted: bool,
    on_change: Option<ChangeCallback>,
}

impl KnobModel {
    pub fn new(config: KnobConfig) -> Self {
        Self {
            config,
            params: KnobParams::new(0.0, 0.0),
            angle: 0.0,
            state: KnobState::Idle,
            menu: ContextMenu::hidden(),
            menu_pressed: false,
            mounted: false,
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, on_change: impl FnMut(f64) + 'static) {
        self.on_change = Some(Box::new(on_change));
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    pub fn params(&self) -> KnobParams {
        self.params
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn state(&self) -> KnobState {
        self.state
    }

    pub fn menu(&self) -> ContextMenu {
        self.menu
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, KnobState::Dragging(_))
    }

    /// While dragging or while the popup is open the knob wants every pointer event in
    /// the window, not just the ones over its surface.
    pub fn captures_pointer(&self) -> bool {
        self.is_dragging() || self.menu.visible
    }

    pub fn menu_contains(&self, pos: Point) -> bool {
        self.menu.contains(pos, self.config.menu_size)
    }

    // Lifecycle
    pub fn mount(&mut self, params: &KnobParams) {
        self.params = params.sanitized();
        self.mounted = true;
        log::debug!("Mounting knob with {:?}", self.params);
        self.angle = self.initial_angle();
        self.notify();
    }

    /// Applies new params from the embedding application. A new `max_angle` starts the
    /// knob over from the middle of its sweep.
    pub fn set_params(&mut self, params: &KnobParams) -> bool {
        if !self.mounted {
            self.mount(params);
            return true;
        }

        let params = params.sanitized();
        if params == self.params {
            return false;
        }

        let max_changed = params.max_angle != self.params.max_angle;
        self.params = params;

        if max_changed {
            log::debug!("Max angle changed to {}, re-initialising knob", params.max_angle);
            self.state = KnobState::Idle;
            self.angle = self.initial_angle();
        }
        self.notify();
        true
    }

    // Dragging
    pub fn begin_drag(&mut self, y: f64) {
        if !y.is_finite() {
            return;
        }
        log::debug!("Knob drag started at y={} angle={}", y, self.angle);
        self.state = KnobState::Dragging(DragSession::new(y, self.angle));
    }

    pub fn drag_to(&mut self, y: f64) -> bool {
        let drag = match self.state {
            KnobState::Dragging(drag) if y.is_finite() => drag,
            _ => return false,
        };
        let angle = drag.angle_at(y, self.config.sensitivity, self.params.max_angle);
        self.commit(angle)
    }

    /// Returns whether a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        if let KnobState::Dragging(_) = self.state {
            log::debug!("Knob drag ended at angle={}", self.angle);
            self.state = KnobState::Idle;
            return true;
        }
        false
    }

    // Context menu
    pub fn open_menu(&mut self, at: Point) {
        log::debug!("Opening knob reset menu at {:?}", at);
        self.menu.open(at);
    }

    pub fn close_menu(&mut self) -> bool {
        if !self.menu.visible {
            return false;
        }
        log::debug!("Closing knob reset menu");
        self.menu.close();
        true
    }

    /// A completed primary click somewhere in the window. Only a press and a release that
    /// both land on the popup reset the knob; anything else dismisses the popup.
    /// Returns `true` if anything changed.
    pub fn click(&mut self, pos: Point, pressed_on_menu: bool) -> bool {
        if !self.menu.visible {
            return false;
        }
        if pressed_on_menu && self.menu_contains(pos) {
            self.reset();
        } else {
            self.close_menu();
        }
        true
    }

    // Pointer routing
    /// A button went down at `window_pos`. `on_surface` tells whether that point lies on
    /// the knob's own surface, which may differ from the popup while it is open.
    pub fn pointer_down(&mut self, button: MouseButton, window_pos: Point, on_surface: bool) -> PointerResponse {
        match button {
            MouseButton::Right if on_surface => {
                self.menu_pressed = false;
                self.open_menu(window_pos);
                PointerResponse::menu_changed()
            }
            MouseButton::Left => {
                self.menu_pressed = self.menu_contains(window_pos);
                if self.menu_pressed {
                    PointerResponse::handled()
                } else if on_surface {
                    self.begin_drag(window_pos.y);
                    PointerResponse::handled()
                } else {
                    PointerResponse::ignored()
                }
            }
            _ => PointerResponse::ignored(),
        }
    }

    /// A button came up at `window_pos`. Releasing the primary button ends any drag and
    /// completes a click against the popup.
    pub fn pointer_up(&mut self, button: MouseButton, window_pos: Point) -> PointerResponse {
        if button != MouseButton::Left {
            return PointerResponse::ignored();
        }
        self.end_drag();
        let pressed_on_menu = std::mem::take(&mut self.menu_pressed);
        if self.click(window_pos, pressed_on_menu) {
            PointerResponse::menu_changed()
        } else {
            PointerResponse::ignored()
        }
    }

    /// The pointer left the knob's surface.
    pub fn pointer_left(&mut self) -> bool {
        self.end_drag()
    }

    pub fn reset(&mut self) -> bool {
        log::debug!("Resetting knob to {}", self.config.reset_angle);
        let changed = self.commit(self.config.reset_angle);
        self.close_menu() || changed
    }

    fn initial_angle(&self) -> f64 {
        self.params.max_angle * 0.5
    }

    fn commit(&mut self, angle: f64) -> bool {
        let angle = clamp_angle(angle, self.params.max_angle);
        if angle == self.angle {
            return false;
        }
        self.angle = angle;
        self.notify();
        true
    }

    fn notify(&mut self) {
        log::trace!("Knob angle committed: {}", self.angle);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(self.angle);
        }
    }
}

impl fmt::Debug for KnobModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KnobModel")
            .field("params", &self.params)
            .field("angle", &self.angle)
            .field("state", &self.state)
            .field("menu", &self.menu)
            .field("mounted", &self.mounted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    fn knob(max_angle: f64, start_angle: f64) -> (KnobModel, Rc<RefCell<Vec<f64>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut model = KnobModel::new(KnobConfig::default());
        let sink = calls.clone();
        model.set_on_change(move |angle| sink.borrow_mut().push(angle));
        model.mount(&KnobParams::new(max_angle, start_angle));
        (model, calls)
    }

    #[test]
    fn mount_starts_at_half_sweep() {
        let (model, calls) = knob(270.0, 135.0);
        assert_eq!(model.angle(), 135.0);
        assert_eq!(*calls.borrow(), vec![135.0]);
        assert_eq!(model.state(), KnobState::Idle);
    }

    #[test]
    fn max_angle_change_reinitialises() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.begin_drag(50.0);
        model.drag_to(48.0);

        assert!(model.set_params(&KnobParams::new(180.0, 135.0)));
        assert_eq!(model.angle(), 90.0);
        assert!(!model.is_dragging());
        assert_eq!(*calls.borrow(), vec![135.0, 167.0, 90.0]);
    }

    #[test]
    fn start_angle_change_redraws_without_moving() {
        let (mut model, calls) = knob(270.0, 135.0);
        assert!(model.set_params(&KnobParams::new(270.0, 90.0)));
        assert_eq!(model.angle(), 135.0);
        assert_eq!(*calls.borrow(), vec![135.0, 135.0]);

        assert!(!model.set_params(&KnobParams::new(270.0, 90.0)));
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn set_params_before_mount_mounts() {
        let mut model = KnobModel::new(KnobConfig::default());
        assert!(!model.is_mounted());
        assert!(model.set_params(&KnobParams::new(100.0, 0.0)));
        assert!(model.is_mounted());
        assert_eq!(model.angle(), 50.0);
    }

    #[test]
    fn dragging_up_and_down() {
        let (mut model, _) = knob(270.0, 135.0);
        model.begin_drag(200.0);

        assert!(model.drag_to(198.0));
        assert_eq!(model.angle(), 167.0);

        assert!(model.drag_to(203.0));
        assert_eq!(model.angle(), 87.0);

        assert!(model.drag_to(300.0));
        assert_eq!(model.angle(), 0.0);

        assert!(model.drag_to(0.0));
        assert_eq!(model.angle(), 270.0);
    }

    #[test]
    fn moves_without_drag_are_ignored() {
        let (mut model, calls) = knob(270.0, 135.0);
        assert!(!model.drag_to(10.0));
        assert_eq!(model.angle(), 135.0);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn end_drag_returns_to_idle() {
        let (mut model, _) = knob(270.0, 135.0);
        assert!(!model.end_drag());

        model.begin_drag(10.0);
        assert!(model.is_dragging());
        assert!(model.captures_pointer());
        assert!(model.end_drag());
        assert!(!model.is_dragging());
        assert!(!model.captures_pointer());

        assert!(!model.drag_to(0.0));
        assert_eq!(model.angle(), 135.0);
    }

    #[test]
    fn new_drag_measures_from_current_angle() {
        let (mut model, _) = knob(270.0, 135.0);
        model.begin_drag(100.0);
        model.drag_to(99.0);
        model.end_drag();

        model.begin_drag(300.0);
        model.drag_to(299.0);
        assert_eq!(model.angle(), 167.0);
    }

    #[test]
    fn pinned_drag_notifies_once() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.begin_drag(100.0);
        assert!(model.drag_to(0.0));
        assert!(!model.drag_to(-10.0));
        assert!(!model.drag_to(-50.0));
        assert_eq!(*calls.borrow(), vec![135.0, 270.0]);
    }

    #[test]
    fn random_drags_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(0x6b6e6f62);
        for _ in 0..50 {
            let max_angle = rng.gen_range(0.0..720.0);
            let (mut model, calls) = knob(max_angle, rng.gen_range(-360.0..360.0));

            for _ in 0..200 {
                match rng.gen_range(0..4) {
                    0 => model.begin_drag(rng.gen_range(-500.0..500.0)),
                    1 => {
                        model.end_drag();
                    }
                    _ => {
                        model.drag_to(rng.gen_range(-500.0..500.0));
                    }
                }
                let angle = model.angle();
                assert!((0.0..=max_angle).contains(&angle), "{angle} outside [0, {max_angle}]");
            }

            for angle in calls.borrow().iter() {
                assert!((0.0..=max_angle).contains(angle), "notified {angle}");
            }
        }
    }

    #[test]
    fn right_click_opens_menu_at_position() {
        let (mut model, _) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));
        assert_eq!(
            model.menu(),
            ContextMenu {
                visible: true,
                x: 40.0,
                y: 60.0
            }
        );
        assert!(model.captures_pointer());
    }

    #[test]
    fn click_outside_closes_menu() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));

        assert!(model.click(Point::new(5.0, 5.0), false));
        assert!(!model.menu().visible);
        assert_eq!(model.angle(), 135.0);
        assert_eq!(calls.borrow().len(), 1);
        assert!(!model.captures_pointer());

        assert!(!model.click(Point::new(5.0, 5.0), false));
    }

    #[test]
    fn click_on_reset_sets_reset_angle() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));

        assert!(model.click(Point::new(45.0, 65.0), true));
        assert_eq!(model.angle(), 150.0);
        assert!(!model.menu().visible);
        assert_eq!(*calls.borrow(), vec![135.0, 150.0]);
    }

    #[test]
    fn reset_at_reset_angle_only_closes() {
        let (mut model, calls) = knob(300.0, 0.0);
        assert_eq!(model.angle(), 150.0);
        model.open_menu(Point::new(0.0, 0.0));

        assert!(model.reset());
        assert!(!model.menu().visible);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn reset_is_clamped_to_sweep() {
        let (mut model, calls) = knob(100.0, 0.0);
        assert!(model.reset());
        assert_eq!(model.angle(), 100.0);
        assert_eq!(*calls.borrow(), vec![50.0, 100.0]);
    }

    #[test]
    fn reset_angle_is_configurable() {
        let mut model = KnobModel::new(KnobConfig::new().with_reset_angle(30.0));
        model.mount(&KnobParams::new(270.0, 0.0));
        model.reset();
        assert_eq!(model.angle(), 30.0);
    }

    #[test]
    fn sensitivity_is_configurable() {
        let mut model = KnobModel::new(KnobConfig::new().with_sensitivity(1.0));
        model.mount(&KnobParams::new(270.0, 0.0));
        model.begin_drag(10.0);
        model.drag_to(0.0);
        assert_eq!(model.angle(), 145.0);
    }

    #[test]
    fn invalid_params_pin_knob_at_zero() {
        let (mut model, calls) = knob(f64::NAN, 0.0);
        assert_eq!(model.angle(), 0.0);

        model.begin_drag(100.0);
        assert!(!model.drag_to(0.0));
        assert!(!model.reset());
        assert_eq!(*calls.borrow(), vec![0.0]);
    }

    #[test]
    fn click_on_menu_without_press_only_closes() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));

        assert!(model.click(Point::new(45.0, 65.0), false));
        assert_eq!(model.angle(), 135.0);
        assert!(!model.menu().visible);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn drag_released_over_menu_keeps_dragged_angle() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));

        let down = model.pointer_down(MouseButton::Left, Point::new(35.0, 80.0), true);
        assert!(down.handled);
        assert!(model.is_dragging());

        assert!(model.drag_to(70.0));
        assert_eq!(model.angle(), 270.0);

        let up = model.pointer_up(MouseButton::Left, Point::new(50.0, 70.0));
        assert!(up.relayout);
        assert_eq!(model.angle(), 270.0);
        assert!(!model.menu().visible);
        assert!(!model.is_dragging());
        assert_eq!(*calls.borrow(), vec![135.0, 270.0]);
    }

    #[test]
    fn press_and_release_on_menu_resets() {
        let (mut model, calls) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));

        let down = model.pointer_down(MouseButton::Left, Point::new(45.0, 65.0), false);
        assert!(down.handled);
        assert!(!model.is_dragging());

        let up = model.pointer_up(MouseButton::Left, Point::new(46.0, 66.0));
        assert_eq!(
            up,
            PointerResponse {
                handled: true,
                repaint: true,
                relayout: true
            }
        );
        assert_eq!(model.angle(), 150.0);
        assert!(!model.menu().visible);
        assert!(!model.captures_pointer());
        assert_eq!(*calls.borrow(), vec![135.0, 150.0]);
    }

    #[test]
    fn press_on_menu_released_outside_closes() {
        let (mut model, _) = knob(270.0, 135.0);
        model.open_menu(Point::new(40.0, 60.0));

        model.pointer_down(MouseButton::Left, Point::new(45.0, 65.0), false);
        model.pointer_up(MouseButton::Left, Point::new(200.0, 200.0));
        assert_eq!(model.angle(), 135.0);
        assert!(!model.menu().visible);
    }

    #[test]
    fn right_press_opens_menu_only_on_surface() {
        let (mut model, _) = knob(270.0, 135.0);

        let response = model.pointer_down(MouseButton::Right, Point::new(300.0, 300.0), false);
        assert_eq!(response, PointerResponse::default());
        assert!(!model.menu().visible);

        let response = model.pointer_down(MouseButton::Right, Point::new(12.0, 18.0), true);
        assert!(response.handled && response.repaint && response.relayout);
        assert_eq!(model.menu().origin(), Point::new(12.0, 18.0));
        assert!(!model.is_dragging());
        assert!(model.captures_pointer());

        // Releasing the right button leaves the menu open.
        assert_eq!(
            model.pointer_up(MouseButton::Right, Point::new(12.0, 18.0)),
            PointerResponse::default()
        );
        assert!(model.menu().visible);
    }

    #[test]
    fn outside_click_releases_capture() {
        let (mut model, _) = knob(270.0, 135.0);
        model.pointer_down(MouseButton::Right, Point::new(12.0, 18.0), true);

        let down = model.pointer_down(MouseButton::Left, Point::new(300.0, 300.0), false);
        assert!(!down.handled);
        assert!(!model.is_dragging());

        let up = model.pointer_up(MouseButton::Left, Point::new(300.0, 300.0));
        assert!(up.handled);
        assert!(!model.menu().visible);
        assert!(!model.captures_pointer());
    }

    #[test]
    fn left_press_off_surface_does_not_drag() {
        let (mut model, _) = knob(270.0, 135.0);
        let down = model.pointer_down(MouseButton::Left, Point::new(300.0, 300.0), false);
        assert_eq!(down, PointerResponse::default());
        assert!(!model.is_dragging());

        let down = model.pointer_down(MouseButton::Middle, Point::new(10.0, 10.0), true);
        assert_eq!(down, PointerResponse::default());
        assert!(!model.is_dragging());
    }

    #[test]
    fn leaving_surface_ends_drag() {
        let (mut model, _) = knob(270.0, 135.0);
        model.pointer_down(MouseButton::Left, Point::new(10.0, 10.0), true);
        assert!(model.drag_to(9.0));
        assert!(model.pointer_left());
        assert!(!model.captures_pointer());
        assert!(!model.drag_to(0.0));
        assert_eq!(model.angle(), 151.0);
        assert!(!model.pointer_left());
    }
}
