//! Touch contact tracking with edge detection

/// Current and previous touch contact of a button.
///
/// [`press`](PressState::press) is the only transition; everything else is a
/// pure query on the pair. Edges therefore fire exactly once per change of
/// contact, on the call that observes the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressState {
    current: bool,
    previous: bool,
}

impl PressState {
    pub const fn new() -> Self {
        Self {
            current: false,
            previous: false,
        }
    }

    /// Record the contact state for this input cycle.
    pub fn press(&mut self, is_pressed: bool) {
        self.previous = self.current;
        self.current = is_pressed;
    }

    pub fn is_pressed(&self) -> bool {
        self.current
    }

    pub fn just_pressed(&self) -> bool {
        self.current && !self.previous
    }

    pub fn just_released(&self) -> bool {
        !self.current && self.previous
    }

    /// Forget any contact, e.g. when a page is shown while a finger from the
    /// previous page is still down.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
