//! Linking widgets to externally owned numeric values

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::ui::core::{MAX_NAME_LEN, bounded_text};

/// Shared handle to an externally owned `f64`.
///
/// Cloning the handle aliases the same value, which is what copying a widget
/// needs: both copies keep pointing at the quantity they display or change.
/// Handles compare by identity with [`LinkedValue::ptr_eq`].
#[derive(Clone, Default)]
pub struct LinkedValue(Rc<Cell<f64>>);

impl LinkedValue {
    pub fn new(value: f64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, value: f64) {
        self.0.set(value);
    }

    /// Add `delta` in place and return the new value.
    pub fn add(&self, delta: f64) -> f64 {
        let value = self.0.get() + delta;
        self.0.set(value);
        value
    }

    /// Whether both handles point at the same value
    pub fn ptr_eq(&self, other: &LinkedValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LinkedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LinkedValue").field(&self.get()).finish()
    }
}

/// A linked value together with its display name.
///
/// Both parts are only ever replaced together, so a widget never shows a
/// name that belongs to a different value.
#[derive(Clone, Debug, Default)]
pub struct ValueBinding {
    value: Option<LinkedValue>,
    name: heapless::String<MAX_NAME_LEN>,
}

impl ValueBinding {
    /// Bind `value` under `name`. `None` is legal and disables every
    /// value-dependent behavior until rebound.
    pub fn new(value: Option<LinkedValue>, name: &str) -> Self {
        Self {
            value,
            name: bounded_text(name),
        }
    }

    pub fn value(&self) -> Option<&LinkedValue> {
        self.value.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }
}
