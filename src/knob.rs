///////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Imports
///
///////////////////////////////////////////////////////////////////////////////////////////////////
use druid::kurbo::RoundedRect;
use druid::{
    BoxConstraints, Data, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx, PaintCtx,
    Point, Rect, RenderContext, Size, TextLayout, UpdateCtx, Widget,
};

use crate::config::KnobConfig;
use crate::geometry::KnobGeometry;
use crate::model::{KnobModel, PointerResponse};
use crate::KnobParams;

const MENU_CORNER_RADIUS: f64 = 3.0;
const MENU_BORDER_WIDTH: f64 = 1.0;
const MENU_TEXT_SIZE: f64 = 12.0;
const MENU_Z_INDEX: u32 = 1;

//////////////////////////////////////////////////////////////////////////////////////////////////////
///
/// Knob Widget
///
/////////////////////////////////////////////////////////////////////////////////////////////////////
/// A rotary control. Drag vertically to turn it, right-click for a reset popup.
///
/// The widget's data is the [`KnobParams`] of the embedding application. The current angle
/// is internal state, reported through [`Knob::on_change`] every time it is committed.
pub struct Knob {
    model: KnobModel,
    window_origin: Point,
    reset_label: TextLayout<String>,
}

impl Knob {
    pub fn new() -> Self {
        Self::with_config(KnobConfig::default())
    }

    pub fn with_config(config: KnobConfig) -> Self {
        let mut reset_label = TextLayout::from_text("Reset".to_string());
        reset_label.set_text_color(config.menu_text_color.clone());
        reset_label.set_text_size(MENU_TEXT_SIZE);

        Self {
            model: KnobModel::new(config),
            window_origin: Point::ORIGIN,
            reset_label,
        }
    }

    pub fn on_change(mut self, on_change: impl FnMut(f64) + 'static) -> Self {
        self.model.set_on_change(on_change);
        self
    }

    fn menu_local_rect(&self, window_origin: Point) -> Rect {
        let menu = self.model.menu();
        menu.rect(self.model.config().menu_size) - window_origin.to_vec2()
    }

    fn apply_response(ctx: &mut EventCtx, response: PointerResponse) {
        if response.relayout {
            ctx.request_layout();
        }
        if response.repaint {
            ctx.request_paint();
        }
        if response.handled {
            ctx.set_handled();
        }
    }

    fn sync_pointer_capture(&self, ctx: &mut EventCtx) {
        let capture = self.model.captures_pointer();
        if ctx.is_active() != capture {
            ctx.set_active(capture);
        }
    }

    fn paint_menu(&mut self, ctx: &mut PaintCtx, env: &Env) {
        self.reset_label.rebuild_if_needed(ctx.text(), env);

        let rect = self.menu_local_rect(ctx.window_origin());
        let label = self.reset_label.layout().cloned();
        let label_origin = rect.center() - self.reset_label.size().to_vec2() / 2.0;
        let background = self.model.config().menu_background.clone();
        let border = self.model.config().accent_color.clone();

        ctx.paint_with_z_index(MENU_Z_INDEX, move |ctx| {
            let shape = RoundedRect::from_rect(rect, MENU_CORNER_RADIUS);
            ctx.fill(shape, &background);
            ctx.stroke(shape, &border, MENU_BORDER_WIDTH);
            if let Some(label) = label {
                ctx.draw_text(&label, label_origin);
            }
        });
    }
}

impl Default for Knob {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget<KnobParams> for Knob {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, _data: &mut KnobParams, _env: &Env) {
        match event {
            Event::MouseDown(mouse) => {
                self.window_origin = ctx.window_origin();
                let on_surface = ctx.size().to_rect().contains(mouse.pos);
                let response = self.model.pointer_down(mouse.button, mouse.window_pos, on_surface);
                Self::apply_response(ctx, response);
                self.sync_pointer_capture(ctx);
            }
            Event::MouseMove(mouse) => {
                if self.model.drag_to(mouse.window_pos.y) {
                    ctx.request_paint();
                }
                self.sync_pointer_capture(ctx);
            }
            Event::MouseUp(mouse) => {
                let response = self.model.pointer_up(mouse.button, mouse.window_pos);
                Self::apply_response(ctx, response);
                self.sync_pointer_capture(ctx);
            }
            _ => {}
        }
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &KnobParams, _env: &Env) {
        match event {
            LifeCycle::WidgetAdded => {
                self.model.mount(data);
                ctx.request_paint();
            }
            // Leaving the surface ends a drag just like releasing the button.
            LifeCycle::HotChanged(false) => {
                self.model.pointer_left();
            }
            _ => {}
        }
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &KnobParams, data: &KnobParams, _env: &Env) {
        if !old_data.same(data) && self.model.set_params(data) {
            ctx.request_paint();
        }
    }

    fn layout(&mut self, ctx: &mut LayoutCtx, bc: &BoxConstraints, _data: &KnobParams, _env: &Env) -> Size {
        let side = self.model.config().surface_size;
        let size = bc.constrain(Size::new(side, side));
        if size.width != side || size.height != side {
            log::warn!("Knob surface constrained to {:?}, expected {}x{}", size, side, side);
        }

        let surface = size.to_rect();
        let painted = if self.model.menu().visible {
            surface.union(self.menu_local_rect(self.window_origin))
        } else {
            surface
        };
        ctx.set_paint_insets(painted - surface);

        size
    }

    fn paint(&mut self, ctx: &mut PaintCtx, _data: &KnobParams, env: &Env) {
        let config = self.model.config();
        let params = self.model.params();
        let angle = self.model.angle();
        let geometry = KnobGeometry::new(ctx.size(), config);

        ctx.stroke(
            geometry.track_arc(params.start_angle, config.track_end),
            &config.track_color,
            config.track_width,
        );
        ctx.stroke(
            geometry.fill_arc(angle, params.start_angle, params.max_angle),
            &config.accent_color,
            config.fill_width,
        );
        ctx.fill(geometry.indicator_dot(angle, params.start_angle), &config.accent_color);

        if self.model.menu().visible {
            self.paint_menu(ctx, env);
        }
    }
}
