//! Fixed-capacity vector backed by an inline `[Option<T>; N]`.
//!
//! Never allocates. Pushing past `N` fails with [`BackendError::Full`].

use core::fmt;

use crate::backend::Vector;
use crate::error::BackendError;

/// [`Vector`] with room for exactly `N` elements.
pub struct Array<T, const N: usize> {
    slots: [Option<T>; N],
    len: usize,
}

impl<T, const N: usize> Array<T, N> {
    /// Creates an empty array.
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            len: 0,
        }
    }

    /// Returns the stored elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }
}

impl<T, const N: usize> Default for Array<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for Array<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, const N: usize> Vector<T> for Array<T, N> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn max_len(&self) -> Option<usize> {
        Some(N)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.slots[index].as_ref()
        } else {
            None
        }
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            self.slots[index].as_mut()
        } else {
            None
        }
    }

    fn push(&mut self, value: T) -> Result<(), BackendError> {
        if self.len == N {
            return Err(BackendError::Full { capacity: N });
        }
        self.slots[self.len] = Some(value);
        self.len += 1;
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> Result<(), BackendError> {
        if additional > N - self.len {
            Err(BackendError::Full { capacity: N })
        } else {
            Ok(())
        }
    }

    fn clear(&mut self) {
        for slot in &mut self.slots[..self.len] {
            *slot = None;
        }
        self.len = 0;
    }
}
