//! Single-owner handle around a heap-allocated value.
//!
//! A [`Handle`] owns at most one boxed value at a time. Moving a handle
//! (or calling [`Handle::take`]) transfers ownership and leaves the
//! source empty; accessing an empty handle fails with a
//! [`NullAccess`](crate::error::ErrorCode::NullAccess) error instead of
//! panicking. Handles are deliberately not `Clone`: callers that need a
//! duplicate of an owned track must go through
//! [`AudioTrack::clone_track`](crate::types::AudioTrack::clone_track).

use crate::error::{Result, TrackdeckError};

/// Exclusive, move-only owner of a boxed value.
#[derive(Debug)]
pub struct Handle<T: ?Sized> {
    inner: Option<Box<T>>,
}

impl<T: ?Sized> Handle<T> {
    /// Creates a handle owning the given value.
    pub fn new(value: Box<T>) -> Self {
        Self { inner: Some(value) }
    }

    /// Creates an empty handle.
    pub fn empty() -> Self {
        Self { inner: None }
    }

    /// Returns true if the handle currently owns a value.
    pub fn is_loaded(&self) -> bool {
        self.inner.is_some()
    }

    /// Borrows the owned value.
    ///
    /// Fails with `NULL_ACCESS` if the handle is empty.
    pub fn get(&self) -> Result<&T> {
        self.inner
            .as_deref()
            .ok_or_else(|| TrackdeckError::null_access("get() on empty handle"))
    }

    /// Mutably borrows the owned value.
    ///
    /// Fails with `NULL_ACCESS` if the handle is empty.
    pub fn get_mut(&mut self) -> Result<&mut T> {
        self.inner
            .as_deref_mut()
            .ok_or_else(|| TrackdeckError::null_access("get_mut() on empty handle"))
    }

    /// Relinquishes ownership to the caller without destroying the value.
    ///
    /// The handle is empty afterwards. Returns `None` if there was
    /// nothing to release.
    pub fn release(&mut self) -> Option<Box<T>> {
        self.inner.take()
    }

    /// Drops any currently-owned value and takes ownership of `value`.
    pub fn reset(&mut self, value: Box<T>) {
        self.inner = Some(value);
    }

    /// Drops any currently-owned value, leaving the handle empty.
    pub fn clear(&mut self) {
        self.inner = None;
    }

    /// Transfers ownership out of this handle into a new one.
    ///
    /// The source handle is left empty. A plain Rust move of the handle
    /// transfers ownership as well; `take` exists for the cases where
    /// the source must remain usable (and observably empty) afterwards.
    pub fn take(&mut self) -> Handle<T> {
        Handle {
            inner: self.inner.take(),
        }
    }
}

impl<T: ?Sized> Default for Handle<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized> From<Box<T>> for Handle<T> {
    fn from(value: Box<T>) -> Self {
        Self::new(value)
    }
}
