//! Field-level overlay of one configuration layer onto another.
//!
//! A higher-priority layer only replaces a field when its value is set: strings must be
//! non-empty, numbers and durations non-zero. Booleans are always replaced, since `false`
//! is a real value for every toggle we carry.

use std::time::Duration;

/// Whether a value is the zero value of its type and should not override a lower layer.
pub trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Unset for u16 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl Unset for u32 {
    fn is_unset(&self) -> bool {
        *self == 0
    }
}

impl Unset for Duration {
    fn is_unset(&self) -> bool {
        self.is_zero()
    }
}

impl Unset for bool {
    fn is_unset(&self) -> bool {
        false
    }
}

/// Replace `base` with `value` unless `value` is unset.
pub fn overlay<T: Unset>(base: &mut T, value: T) {
    if !value.is_unset() {
        *base = value;
    }
}

/// A configuration section that can absorb a higher-priority layer of itself.
pub trait Merge {
    fn merge(&mut self, other: Self);
}
