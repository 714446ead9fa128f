// SPDX-License-Identifier: MPL-2.0
//! Opaque payload values.
//!
//! Whisper messages, dialog configs, and dialog close results all carry
//! caller-defined data the overlay layer never interprets. [`Payload`] wraps
//! such a value behind `Rc<dyn Any>` so it stays cheaply clonable while the
//! receiving side recovers the concrete type with [`Payload::downcast_ref`].

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A cheaply clonable, dynamically typed value.
///
/// # Example
///
/// ```
/// use whisperbox::Payload;
///
/// let payload = Payload::new(42u32);
/// assert_eq!(payload.downcast_ref::<u32>(), Some(&42));
/// assert_eq!(payload.downcast_ref::<String>(), None);
/// ```
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    /// Wraps an arbitrary value.
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Returns a reference to the wrapped value if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns whether the wrapped value is of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&"..").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_recovers_original_value() {
        let payload = Payload::new("hello".to_string());
        assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("hello"));
    }

    #[test]
    fn downcast_to_wrong_type_returns_none() {
        let payload = Payload::new(1.5f64);
        assert!(payload.downcast_ref::<u64>().is_none());
        assert!(payload.is::<f64>());
        assert!(!payload.is::<u64>());
    }

    #[test]
    fn clones_share_the_value() {
        let payload = Payload::new(vec![1, 2, 3]);
        let clone = payload.clone();
        assert_eq!(
            payload.downcast_ref::<Vec<i32>>(),
            clone.downcast_ref::<Vec<i32>>()
        );
    }

    #[test]
    fn debug_does_not_expose_contents() {
        let payload = Payload::new("secret".to_string());
        assert_eq!(format!("{:?}", payload), "Payload(\"..\")");
    }
}
