// src/ui/components/button.rs
//! Touch button with edge detection and command dispatch

use alloc::rc::Rc;
use core::fmt;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};

use crate::pages::{MenuRequest, PageContext, PageId};
use crate::ui::binding::LinkedValue;
use crate::ui::components::frame::{Widget, WidgetFrame};
use crate::ui::core::DrawOptions;
use crate::ui::press::PressState;
use crate::ui::surface::RenderSurface;

/// Callback run by a [`Command::RunFunction`] button
pub type PressHandler = Rc<dyn Fn(&Button)>;

/// Callback run right before a button is rendered
pub type ButtonDrawHook = Rc<dyn Fn(&Button)>;

/// What a button does when its command is executed.
///
/// Each variant carries exactly what its behavior needs, so a button can
/// never hold both a callback and a page to open.
#[derive(Clone)]
pub enum Command {
    /// Call a handler with the button
    RunFunction { handler: Option<PressHandler> },
    /// Ask the target page's menu to show it
    OpenPage { target: Option<PageId> },
    /// Add `step` to the button's linked value
    IncrementValue { step: f64 },
}

/// Fieldless view of a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    RunFunction,
    OpenPage,
    IncrementValue,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::RunFunction { .. } => CommandKind::RunFunction,
            Command::OpenPage { .. } => CommandKind::OpenPage,
            Command::IncrementValue { .. } => CommandKind::IncrementValue,
        }
    }

    /// Whether only one such button should register as pressed at a time.
    ///
    /// Navigation and function buttons are exclusive; value steppers are not.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, Command::IncrementValue { .. })
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RunFunction { handler } => f
                .debug_struct("RunFunction")
                .field("handler", &handler.is_some())
                .finish(),
            Command::OpenPage { target } => {
                f.debug_struct("OpenPage").field("target", target).finish()
            }
            Command::IncrementValue { step } => {
                f.debug_struct("IncrementValue").field("step", step).finish()
            }
        }
    }
}

/// A pressable button.
///
/// Touch input and dispatch are separate: the caller feeds contact state
/// through [`press`](Button::press) every input cycle, looks at the derived
/// edges, and calls [`execute_command`](Button::execute_command) when it
/// decides the button fired (on press or on release, its choice).
///
/// Cloning a button copies its configuration and press state but shares the
/// linked value and callbacks with the original.
///
/// # Examples
/// ```ignore
/// let mut plus = Button::increment_value(
///     Rectangle::new(Point::new(200, 60), Size::new(60, 40)),
///     "+",
///     setpoint.clone(),
///     0.5,
/// )
/// .on_page(main_page);
///
/// let over = touch.is_some_and(|point| plus.contains(point));
/// plus.press(over);
/// if plus.just_pressed() {
///     plus.execute_command(menu.registry_mut());
/// }
/// ```
#[derive(Clone)]
pub struct Button {
    frame: WidgetFrame,
    command: Command,
    press: PressState,
    on_draw: Option<ButtonDrawHook>,
}

impl Button {
    /// Create a button with the default colors and text size 1.
    pub fn new(bounds: Rectangle, text: &str, command: Command) -> Self {
        Self {
            frame: WidgetFrame::new(bounds, text),
            command,
            press: PressState::new(),
            on_draw: None,
        }
    }

    /// Button that calls `handler` with itself when executed.
    pub fn run_function(
        bounds: Rectangle,
        text: &str,
        handler: impl Fn(&Button) + 'static,
    ) -> Self {
        let handler: PressHandler = Rc::new(handler);
        Self::new(
            bounds,
            text,
            Command::RunFunction {
                handler: Some(handler),
            },
        )
    }

    /// Button that switches its menu to `target` when executed.
    pub fn open_page(bounds: Rectangle, text: &str, target: PageId) -> Self {
        Self::new(
            bounds,
            text,
            Command::OpenPage {
                target: Some(target),
            },
        )
    }

    /// Button that adds `step` to `value` when executed.
    pub fn increment_value(bounds: Rectangle, text: &str, value: LinkedValue, step: f64) -> Self {
        let mut button = Self::new(bounds, text, Command::IncrementValue { step });
        button.bind(Some(value), "");
        button
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn kind(&self) -> CommandKind {
        self.command.kind()
    }

    pub fn is_exclusive(&self) -> bool {
        self.command.is_exclusive()
    }

    /// Replace the press handler. Only `RunFunction` buttons take one.
    pub fn register_on_pressed(&mut self, handler: impl Fn(&Button) + 'static) {
        let handler: PressHandler = Rc::new(handler);
        match &mut self.command {
            Command::RunFunction { handler: slot } => *slot = Some(handler),
            other => warn!("Ignoring press handler for {:?} button", other.kind()),
        }
    }

    /// Replace the hook called before each actual render.
    pub fn register_on_draw(&mut self, hook: impl Fn(&Button) + 'static) {
        let hook: ButtonDrawHook = Rc::new(hook);
        self.on_draw = Some(hook);
    }

    /// Page an `OpenPage` button opens
    pub fn page_to_open(&self) -> Option<PageId> {
        match self.command {
            Command::OpenPage { target } => target,
            _ => None,
        }
    }

    pub fn set_page_to_open(&mut self, page: Option<PageId>) {
        match &mut self.command {
            Command::OpenPage { target } => *target = page,
            other => warn!("Ignoring page to open for {:?} button", other.kind()),
        }
    }

    /// Step of an `IncrementValue` button
    pub fn increment(&self) -> Option<f64> {
        match self.command {
            Command::IncrementValue { step } => Some(step),
            _ => None,
        }
    }

    pub fn set_increment(&mut self, new_step: f64) {
        match &mut self.command {
            Command::IncrementValue { step } => *step = new_step,
            other => warn!("Ignoring increment for {:?} button", other.kind()),
        }
    }

    /// Half-open hit test: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Record this cycle's contact state.
    pub fn press(&mut self, is_pressed: bool) {
        self.press.press(is_pressed);
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    pub fn just_pressed(&self) -> bool {
        self.press.just_pressed()
    }

    pub fn just_released(&self) -> bool {
        self.press.just_released()
    }

    pub fn reset_press_state(&mut self) {
        self.press.reset();
    }

    pub fn press_state(&self) -> PressState {
        self.press
    }

    /// Perform the button's command.
    ///
    /// Returns `false` without side effects when the button is hidden or
    /// its command is missing what it needs (no handler, no target page, no
    /// linked value, zero step). Never touches the press state.
    pub fn execute_command<C>(&self, pages: &mut C) -> bool
    where
        C: PageContext + ?Sized,
    {
        if !self.is_visible() {
            debug!("Button {:?} is hidden, not executing", self.text());
            return false;
        }

        match &self.command {
            Command::RunFunction { handler } => match handler {
                Some(handler) => {
                    debug!("Button {:?} running handler", self.text());
                    (handler.as_ref())(self);
                    true
                }
                None => false,
            },
            Command::OpenPage { target } => match target {
                Some(target) => {
                    match pages.menu_of(*target) {
                        Some(menu) => {
                            debug!("Button {:?} opening {:?}", self.text(), target);
                            pages.request(MenuRequest::ShowPage {
                                menu,
                                page: *target,
                            });
                        }
                        None => debug!("Target {:?} has no menu", target),
                    }
                    true
                }
                None => false,
            },
            Command::IncrementValue { step } => match self.linked_value() {
                Some(value) if *step != 0.0 => {
                    let updated = value.add(*step);
                    debug!(
                        "Button {:?} stepped {:?} to {}",
                        self.text(),
                        self.linked_value_name(),
                        updated
                    );
                    if let Some(page) = self.page() {
                        pages.request(MenuRequest::Redraw {
                            page,
                            inverted: false,
                        });
                    }
                    true
                }
                _ => false,
            },
        }
    }

    /// Draw the button if it is visible and, when gated, on the visible page.
    ///
    /// Returns whether anything was rendered. The draw hook runs only when
    /// rendering proceeds.
    pub fn draw<S, C>(&self, surface: &mut S, pages: &C, options: DrawOptions) -> Result<bool, S::Error>
    where
        S: RenderSurface,
        C: PageContext + ?Sized,
    {
        if !self.frame.passes_gates(pages, options) {
            return Ok(false);
        }
        if let Some(hook) = &self.on_draw {
            (hook.as_ref())(self);
        }
        self.frame.render(surface, options.inverted)?;
        Ok(true)
    }
}

impl Widget for Button {
    fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut WidgetFrame {
        &mut self.frame
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("frame", &self.frame)
            .field("command", &self.command)
            .field("exclusive", &self.is_exclusive())
            .field("press", &self.press)
            .field("on_draw", &self.on_draw.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{Detached, PageRegistry};
    use crate::ui::core::{TextFormat, TextDatum, Visibility};
    use crate::ui::surface::recording::RecordingSurface;
    use alloc::string::String;
    use core::cell::{Cell, RefCell};
    use embedded_graphics::pixelcolor::Rgb565;

    fn bounds() -> Rectangle {
        Rectangle::new(Point::new(10, 10), Size::new(20, 20))
    }

    /// Registry with one menu showing `shown`, plus a second page `other`.
    fn registry() -> (PageRegistry, PageId, PageId) {
        let mut registry = PageRegistry::new();
        let menu = registry.register_menu().unwrap();
        let shown = registry.register_page(Some(menu)).unwrap();
        let other = registry.register_page(Some(menu)).unwrap();
        registry.set_visible_page(menu, shown).unwrap();
        (registry, shown, other)
    }

    #[test]
    fn contains_is_half_open() {
        let button = Button::open_page(bounds(), "Go", PageId(0));

        assert!(button.contains(Point::new(10, 10)));
        assert!(button.contains(Point::new(29, 29)));
        assert!(!button.contains(Point::new(30, 10)));
        assert!(!button.contains(Point::new(10, 30)));
        assert!(!button.contains(Point::new(9, 15)));
    }

    #[test]
    fn exclusivity_follows_command() {
        let value = LinkedValue::new(0.0);
        assert!(Button::run_function(bounds(), "f", |_| {}).is_exclusive());
        assert!(Button::open_page(bounds(), "p", PageId(0)).is_exclusive());
        assert!(!Button::increment_value(bounds(), "+", value, 1.0).is_exclusive());
    }

    #[test]
    fn run_function_calls_handler_once_with_button() {
        let calls = Rc::new(Cell::new(0u32));
        let seen = Rc::new(RefCell::new(String::new()));
        let (c, s) = (calls.clone(), seen.clone());
        let button = Button::run_function(bounds(), "Fire", move |b| {
            c.set(c.get() + 1);
            s.borrow_mut().push_str(b.text());
        });

        assert!(button.execute_command(&mut Detached));
        assert_eq!(calls.get(), 1);
        assert_eq!(seen.borrow().as_str(), "Fire");
    }

    #[test]
    fn run_function_without_handler_is_a_no_op() {
        let button = Button::new(bounds(), "Idle", Command::RunFunction { handler: None });
        assert!(!button.execute_command(&mut Detached));
    }

    #[test]
    fn register_on_pressed_replaces_handler() {
        let first = Rc::new(Cell::new(0u32));
        let second = Rc::new(Cell::new(0u32));
        let f = first.clone();
        let mut button = Button::run_function(bounds(), "f", move |_| f.set(f.get() + 1));
        let s = second.clone();
        button.register_on_pressed(move |_| s.set(s.get() + 1));

        assert!(button.execute_command(&mut Detached));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn press_handler_on_other_commands_is_ignored() {
        let calls = Rc::new(Cell::new(0u32));
        let c = calls.clone();
        let mut button = Button::open_page(bounds(), "p", PageId(0));
        button.register_on_pressed(move |_| c.set(c.get() + 1));

        assert_eq!(button.kind(), CommandKind::OpenPage);
        button.execute_command(&mut Detached);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn open_page_requests_menu_switch() {
        let (mut registry, shown, other) = registry();
        let menu = registry.menu_of(shown).unwrap();
        let button = Button::open_page(bounds(), "Next", other).on_page(shown);

        assert!(button.execute_command(&mut registry));
        assert_eq!(
            registry.take_request(),
            Some(MenuRequest::ShowPage { menu, page: other })
        );
        // Dispatch only requests; the menu decides when to switch
        assert_eq!(registry.visible_page(menu), Some(shown));
    }

    #[test]
    fn open_page_without_menu_still_reports_success() {
        let mut registry = PageRegistry::new();
        let loose = registry.register_page(None).unwrap();
        let button = Button::open_page(bounds(), "Loose", loose);

        assert!(button.execute_command(&mut registry));
        assert!(!registry.has_pending_requests());
    }

    #[test]
    fn open_page_without_target_fails() {
        let mut button = Button::open_page(bounds(), "Nowhere", PageId(0));
        button.set_page_to_open(None);
        assert_eq!(button.page_to_open(), None);
        assert!(!button.execute_command(&mut Detached));
    }

    #[test]
    fn increment_adds_step_and_requests_redraw() {
        let (mut registry, shown, _) = registry();
        let value = LinkedValue::new(5.0);
        let button = Button::increment_value(bounds(), "+", value.clone(), 0.5).on_page(shown);

        assert!(button.execute_command(&mut registry));
        assert_eq!(value.get(), 5.5);
        assert_eq!(
            registry.take_request(),
            Some(MenuRequest::Redraw {
                page: shown,
                inverted: false
            })
        );
    }

    #[test]
    fn increment_with_zero_step_or_no_value_fails() {
        let value = LinkedValue::new(5.0);
        let mut button = Button::increment_value(bounds(), "+", value.clone(), 0.0);
        assert!(!button.execute_command(&mut Detached));
        assert_eq!(value.get(), 5.0);

        button.set_increment(1.0);
        button.bind(None, "");
        assert!(!button.execute_command(&mut Detached));
        assert_eq!(value.get(), 5.0);
    }

    #[test]
    fn increment_without_page_skips_redraw() {
        let (mut registry, _, _) = registry();
        let value = LinkedValue::new(1.0);
        let button = Button::increment_value(bounds(), "-", value.clone(), -0.25);

        assert!(button.execute_command(&mut registry));
        assert_eq!(value.get(), 0.75);
        assert!(!registry.has_pending_requests());
    }

    #[test]
    fn hidden_button_never_dispatches() {
        let (mut registry, shown, other) = registry();
        let calls = Rc::new(Cell::new(0u32));
        let value = LinkedValue::new(5.0);
        let c = calls.clone();

        let mut buttons = [
            Button::run_function(bounds(), "f", move |_| c.set(c.get() + 1)),
            Button::open_page(bounds(), "p", other).on_page(shown),
            Button::increment_value(bounds(), "+", value.clone(), 0.5).on_page(shown),
        ];

        for button in buttons.iter_mut() {
            button.hide();
            assert!(!button.execute_command(&mut registry));
        }
        assert_eq!(calls.get(), 0);
        assert_eq!(value.get(), 5.0);
        assert!(!registry.has_pending_requests());

        // Showing again restores dispatch
        buttons[2].set_visibility(Visibility::Visible);
        assert!(buttons[2].execute_command(&mut registry));
    }

    #[test]
    fn execute_does_not_touch_press_state() {
        let mut button = Button::run_function(bounds(), "f", |_| {});
        button.press(true);
        let before = button.press_state();

        button.execute_command(&mut Detached);
        assert_eq!(button.press_state(), before);
        assert!(button.just_pressed());
    }

    #[test]
    fn press_edges_and_reset() {
        let mut button = Button::open_page(bounds(), "p", PageId(0));

        button.press(true);
        assert!(button.just_pressed());
        button.press(true);
        assert!(!button.just_pressed());
        assert!(button.is_pressed());
        button.press(false);
        assert!(button.just_released());

        button.press(true);
        button.reset_press_state();
        assert!(!button.is_pressed());
        assert!(!button.just_pressed());
        assert!(!button.just_released());
    }

    #[test]
    fn draw_is_skipped_off_the_visible_page() {
        let (registry, _, other) = registry();
        let button = Button::open_page(bounds(), "p", other).on_page(other);
        let mut surface = RecordingSurface::new();

        assert!(!button.draw(&mut surface, &registry, DrawOptions::default()).unwrap());
        assert!(surface.calls.is_empty());

        assert!(button
            .draw(&mut surface, &registry, DrawOptions::default().ungated())
            .unwrap());
        assert_eq!(surface.draw_calls().len(), 3);
    }

    #[test]
    fn hidden_button_does_not_draw() {
        let mut button = Button::open_page(bounds(), "p", PageId(0));
        button.hide();
        let mut surface = RecordingSurface::new();

        assert!(!button
            .draw(&mut surface, &Detached, DrawOptions::default().ungated())
            .unwrap());
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn draw_hook_fires_only_when_rendering() {
        let (registry, shown, other) = registry();
        let hooks = Rc::new(Cell::new(0u32));
        let h = hooks.clone();
        let mut button = Button::open_page(bounds(), "p", shown).on_page(other);
        button.register_on_draw(move |_| h.set(h.get() + 1));
        let mut surface = RecordingSurface::new();

        button.draw(&mut surface, &registry, DrawOptions::default()).unwrap();
        assert_eq!(hooks.get(), 0);

        button
            .draw(&mut surface, &registry, DrawOptions::default().ungated())
            .unwrap();
        assert_eq!(hooks.get(), 1);

        let visible = button.clone().on_page(shown);
        visible.draw(&mut surface, &registry, DrawOptions::default()).unwrap();
        assert_eq!(hooks.get(), 2);
    }

    #[test]
    fn draw_restores_text_registers_and_is_repeatable() {
        let before = TextFormat {
            color: Rgb565::MAGENTA,
            size: 2,
            datum: TextDatum::BottomLeft,
            padding: 33,
        };
        let mut surface = RecordingSurface::with_format(before);
        let button = Button::open_page(bounds(), "p", PageId(0)).with_text_size(3);

        button.draw(&mut surface, &Detached, DrawOptions::default()).unwrap();
        assert_eq!(surface.text_format(), before);
        let first: alloc::vec::Vec<_> = surface.draw_calls().into_iter().cloned().collect();

        surface.clear();
        button.draw(&mut surface, &Detached, DrawOptions::default()).unwrap();
        let second: alloc::vec::Vec<_> = surface.draw_calls().into_iter().cloned().collect();
        assert_eq!(first, second);
        assert_eq!(surface.text_format(), before);
    }

    #[test]
    fn bind_replaces_value_and_name_together() {
        let temp = LinkedValue::new(20.0);
        let mut button = Button::increment_value(bounds(), "+", LinkedValue::new(0.0), 1.0);

        button.bind(Some(temp.clone()), "Temp");
        assert!(button.linked_value().is_some_and(|v| v.ptr_eq(&temp)));
        assert_eq!(button.linked_value_name(), "Temp");
    }

    #[test]
    fn clone_shares_references_but_not_state() {
        let value = LinkedValue::new(1.0);
        let original = Button::increment_value(bounds(), "+", value.clone(), 1.0)
            .with_radius(7);
        let mut copy = original.clone();

        assert_eq!(copy.radius(), 7);
        assert!(copy.linked_value().is_some_and(|v| v.ptr_eq(&value)));

        copy.execute_command(&mut Detached);
        assert_eq!(value.get(), 2.0);

        copy.hide();
        copy.set_text("copy");
        assert!(original.is_visible());
        assert_eq!(original.text(), "+");
    }

    #[test]
    fn radius_defaults_to_a_sixth_of_short_side() {
        let wide = Button::open_page(
            Rectangle::new(Point::zero(), Size::new(120, 36)),
            "p",
            PageId(0),
        );
        assert_eq!(wide.radius(), 6);
        assert_eq!(wide.with_radius(2).radius(), 2);
    }
}
