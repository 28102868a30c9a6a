//! Type-safe storage for request-scoped data.
//!
//! `Extensions` is the supported channel for middleware to hand typed data
//! to the terminal handler without coupling either to the other.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A type map for storing request-scoped data.
#[derive(Default)]
pub struct Extensions {
    map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

// The stored values are opaque; only the entry count is printable.
impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extensions")
            .field("len", &self.map.len())
            .finish()
    }
}

// Cloning a request yields empty extensions: trait objects can't be cloned
// generically, and request-scoped state must not leak across clones.
impl Clone for Extensions {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Extensions {
    /// Create an empty `Extensions` map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value into the map.
    ///
    /// If a value of this type already existed, it is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis::http_helpers::Extensions;
    ///
    /// #[derive(Clone)]
    /// struct UserId(String);
    ///
    /// let mut ext = Extensions::new();
    /// ext.insert(UserId("alice".to_string()));
    ///
    /// assert_eq!(ext.get::<UserId>().unwrap().0, "alice");
    /// ```
    pub fn insert<T: Send + Sync + 'static>(&mut self, val: T) -> Option<T> {
        self.map
            .insert(TypeId::of::<T>(), Box::new(val))
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Get a reference to a value.
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.map
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Get a mutable reference to a value.
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.map
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    /// Remove a value from the map.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.map
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Get the number of values stored in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }
}
