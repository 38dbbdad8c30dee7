//! Desktop simulator for the display-menu widgets.
//!
//! Renders a two-page menu in an SDL2 window via `embedded-graphics-simulator`.
//! The left mouse button stands in for a finger on the touch panel.
//!
//! # Key bindings
//!
//! | Key | Action        |
//! |-----|---------------|
//! | 1   | Main page     |
//! | 2   | Settings page |
//! | Q   | Quit          |

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use display_menu::config::DisplayConfig;
use display_menu::pages::{Menu, MenuResult, PageId};
use display_menu::ui::colors::{COLOR_ACCENT, COLOR_STROKE, COLOR_VALUE, WHITE};
use display_menu::ui::{Button, Label, LinkedValue, TftSurface, Widget, WidgetColors};

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Step applied by the +/- buttons
const STEP: f64 = 0.5;

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

struct Pages {
    main: PageId,
    settings: PageId,
}

/// Main page: a value readout with +/- steppers and a link to settings.
/// Settings page: an action button and a link back.
fn build_menu(config: &DisplayConfig, value: &LinkedValue) -> MenuResult<(Menu, Pages)> {
    let mut menu = Menu::with_config(config);
    let main = menu.add_page("Main")?;
    let settings = menu.add_page("Settings")?;
    let width = config.width as u32;

    let value_colors = WidgetColors::new(COLOR_STROKE, COLOR_VALUE, WHITE);
    let accent_colors = WidgetColors::new(WHITE, COLOR_ACCENT, WHITE);

    if let Some(page) = menu.page_mut(main) {
        page.add_label(Label::new(rect(10, 10, width - 20, 30), "Setpoint"))?;
        page.add_label(
            Label::linked(rect(110, 60, 100, 50), "", value.clone(), STEP)
                .with_colors(value_colors)
                .with_text_size(2),
        )?;
        page.add_button(Button::increment_value(rect(30, 60, 60, 50), "-", value.clone(), -STEP))?;
        page.add_button(Button::increment_value(
            rect(230, 60, 60, 50),
            "+",
            value.clone(),
            STEP,
        ))?;
        page.add_button(
            Button::open_page(rect(10, 180, width - 20, 40), "Settings", settings)
                .with_colors(accent_colors),
        )?;
    }

    if let Some(page) = menu.page_mut(settings) {
        page.add_label(Label::new(rect(10, 10, width - 20, 30), "Settings"))?;
        let reset_to = value.clone();
        page.add_button(Button::run_function(
            rect(10, 60, width - 20, 50),
            "Reset",
            move |button| {
                info!("{:?} pressed, value reset", button.text());
                reset_to.set(0.0);
            },
        ))?;
        page.add_button(
            Button::open_page(rect(10, 180, width - 20, 40), "Back", main)
                .with_colors(accent_colors),
        )?;
    }

    Ok((menu, Pages { main, settings }))
}

fn keycode_to_page(keycode: Keycode, pages: &Pages) -> Option<PageId> {
    match keycode {
        Keycode::Num1 | Keycode::Kp1 => Some(pages.main),
        Keycode::Num2 | Keycode::Kp2 => Some(pages.settings),
        _ => None,
    }
}

fn format_value(value: f64) -> String {
    format!("{:.1}", value)
}

fn main() {
    env_logger::init();
    let config = DisplayConfig::default();
    info!("Starting display-menu simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        config.width, config.height, WINDOW_SCALE
    );
    info!("Keys: 1=Main  2=Settings  Q=Quit");

    let value = LinkedValue::new(20.0);
    let (mut menu, pages) = match build_menu(&config, &value) {
        Ok(built) => built,
        Err(e) => {
            error!("Cannot build menu: {}", e);
            return;
        }
    };

    let display =
        SimulatorDisplay::<Rgb565>::new(Size::new(config.width as u32, config.height as u32));
    let mut surface = TftSurface::new(display).with_background(config.background_color());

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Display Menu Simulator", &output_settings);

    let mut shown_value = value.get();
    if let Err(e) = menu.set_label_text(pages.main, 1, &format_value(shown_value), &mut surface) {
        error!("Label update failed: {:?}", e);
    }
    if let Err(e) = menu.show_page(pages.main, &mut surface) {
        error!("Draw error: {:?}", e);
    }

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    window.update(surface.target());

    let mut touch: Option<Point> = None;

    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if let Some(target) = keycode_to_page(keycode, &pages) {
                        if let Err(e) = menu.show_page(target, &mut surface) {
                            error!("Draw error: {:?}", e);
                        }
                    }
                }

                SimulatorEvent::MouseButtonDown { point, .. } => touch = Some(point),
                SimulatorEvent::MouseMove { point } if touch.is_some() => touch = Some(point),
                SimulatorEvent::MouseButtonUp { .. } => touch = None,

                _ => {}
            }
        }

        match menu.handle_touch(touch, &mut surface) {
            Ok(0) => {}
            Ok(executed) => info!("{} command(s) executed", executed),
            Err(e) => error!("Touch handling failed: {:?}", e),
        }

        if value.get() != shown_value {
            shown_value = value.get();
            if let Err(e) =
                menu.set_label_text(pages.main, 1, &format_value(shown_value), &mut surface)
            {
                error!("Label update failed: {:?}", e);
            }
        }

        window.update(surface.target());

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
