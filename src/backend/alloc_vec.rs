//! Growable vector backed by `alloc::vec::Vec`.

use alloc::vec::Vec;

use crate::backend::Vector;
use crate::error::BackendError;

/// [`Vector`] over a heap `Vec<T>`; never reports `Full`.
#[derive(Debug, Clone)]
pub struct AllocVec<T> {
    vec: Vec<T>,
}

impl<T> AllocVec<T> {
    pub fn new() -> Self {
        Self { vec: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vec: Vec::with_capacity(capacity),
        }
    }

    /// Releases unused heap capacity.
    pub fn shrink_to_fit(&mut self) {
        self.vec.shrink_to_fit();
    }
}

impl<T> Default for AllocVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Vector<T> for AllocVec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.vec.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.vec.capacity()
    }

    #[inline]
    fn max_len(&self) -> Option<usize> {
        None
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.vec.get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.vec.get_mut(index)
    }

    fn push(&mut self, value: T) -> Result<(), BackendError> {
        self.vec.push(value);
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> Result<(), BackendError> {
        self.vec.reserve_exact(additional);
        Ok(())
    }

    fn clear(&mut self) {
        self.vec.clear();
    }
}
