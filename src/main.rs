use druid::widget::{CrossAxisAlignment, Flex, Label, MainAxisAlignment, Slider};
use druid::{theme, AppLauncher, Color, Data, Lens, LocalizedString, Widget, WidgetExt, WindowDesc};

use druid_color_thesaurus::*;

use druid_knob_widget::{Knob, KnobConfig, KnobParams};

//////////////////////////////////////////////////////////////////////////////////////
// Constants
//////////////////////////////////////////////////////////////////////////////////////
pub const BACKGROUND: Color = black::ONYX;

//////////////////////////////////////////////////////////////////////////////////////
//
// AppData
//
//////////////////////////////////////////////////////////////////////////////////////
#[derive(Clone, Data, Lens, PartialEq)]
pub struct AppData {
    pub gain: KnobParams,
    pub pan: KnobParams,
}

//////////////////////////////////////////////////////////////////////////////////////
//
// Main
//
//////////////////////////////////////////////////////////////////////////////////////
fn main() {
    let main_window = WindowDesc::new(make_ui())
        .window_size((400.0, 240.0))
        .title(LocalizedString::new("Knob Playground"));

    let data = AppData {
        gain: KnobParams::new(270.0, 135.0),
        pan: KnobParams::new(180.0, 180.0),
    };

    AppLauncher::with_window(main_window)
        .configure_env(|env, _| {
            env.set(theme::WINDOW_BACKGROUND_COLOR, gray::DAVYS_GRAY);
            env.set(theme::TEXT_COLOR, white::ALABASTER)
        })
        .log_to_console()
        .launch(data)
        .expect("launch failed");
}

fn make_ui() -> impl Widget<AppData> {
    let gain = Knob::new()
        .on_change(|angle| log::info!("Gain: {:.1}", angle))
        .lens(AppData::gain);

    let pan_config = KnobConfig::new()
        .with_sensitivity(4.0)
        .with_colors(black::LICORICE, blue::ARGENTINIAN_BLUE);
    let pan = Knob::with_config(pan_config)
        .on_change(|angle| log::info!("Pan: {:.1}", angle))
        .lens(AppData::pan);

    Flex::column()
        .with_child(
            Flex::row()
                .with_child(make_knob_cell("Gain", gain))
                .with_child(make_knob_cell("Pan", pan))
                .main_axis_alignment(MainAxisAlignment::SpaceAround)
                .must_fill_main_axis(true),
        )
        .with_child(make_range_options())
        .main_axis_alignment(MainAxisAlignment::SpaceAround)
        .cross_axis_alignment(CrossAxisAlignment::Center)
}

fn make_knob_cell(name: &str, knob: impl Widget<AppData> + 'static) -> impl Widget<AppData> {
    Flex::column()
        .with_child(knob)
        .with_spacer(4.0)
        .with_child(Label::new(name))
        .padding(10.0)
        .background(BACKGROUND)
        .rounded(4.0)
}

fn make_range_options() -> impl Widget<AppData> {
    Flex::column()
        .with_child(Label::new("Gain Range").with_text_size(16.0))
        .with_child(
            Flex::row()
                .with_child(Label::new("Max angle: "))
                .with_child(
                    Slider::new()
                        .with_range(0.0, 360.0)
                        .lens(KnobParams::max_angle)
                        .lens(AppData::gain),
                )
                .with_child(Label::new(|data: &AppData, _: &_| {
                    format!("{:.0}", data.gain.max_angle)
                })),
        )
        .with_child(
            Flex::row()
                .with_child(Label::new("Start angle: "))
                .with_child(
                    Slider::new()
                        .with_range(0.0, 360.0)
                        .lens(KnobParams::start_angle)
                        .lens(AppData::gain),
                )
                .with_child(Label::new(|data: &AppData, _: &_| {
                    format!("{:.0}", data.gain.start_angle)
                })),
        )
        .cross_axis_alignment(CrossAxisAlignment::Start)
        .padding(5.0)
}
