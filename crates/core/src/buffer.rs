//! Growable contiguous storage with an explicit doubling policy.
//!
//! Unlike a bare `Vec`, every fallible step reports a [`BufferError`]
//! instead of aborting: growth goes through `try_reserve_exact`, and
//! element access is bounds-checked.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Failed to allocate storage for {requested} elements")]
    Allocation { requested: usize },
    #[error("Index {index} out of bounds (size={size})")]
    IndexOutOfBounds { index: usize, size: usize },
    #[error("Buffer is empty")]
    Empty,
}

pub type BufferResult<T> = Result<T, BufferError>;

/// Append-oriented buffer of `T` values in insertion order.
///
/// Capacity never shrinks. When a push finds `size == capacity` the
/// capacity doubles (minimum 1), so N pushes copy O(N) elements in total.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowableBuffer<T> {
    data: Vec<T>,
}

impl<T> Default for GrowableBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GrowableBuffer<T> {
    /// Empty buffer with no storage yet; the first push allocates.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Buffer with room for at least `initial_capacity` elements.
    pub fn with_capacity(initial_capacity: usize) -> BufferResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(initial_capacity)
            .map_err(|_| BufferError::Allocation {
                requested: initial_capacity,
            })?;
        Ok(Self { data })
    }

    /// Append `value`, growing first if full.
    ///
    /// Growing moves the storage: slices obtained earlier from
    /// [`as_slice`](Self::as_slice) must be fetched again.
    pub fn push(&mut self, value: T) -> BufferResult<()> {
        if self.data.len() == self.data.capacity() {
            self.grow()?;
        }
        self.data.push(value);
        Ok(())
    }

    fn grow(&mut self) -> BufferResult<()> {
        let capacity = self.data.capacity();
        let target = capacity.saturating_mul(2).max(1);
        let additional = target - self.data.len();
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| BufferError::Allocation { requested: target })
    }

    pub fn get(&self, index: usize) -> BufferResult<&T> {
        self.data.get(index).ok_or(BufferError::IndexOutOfBounds {
            index,
            size: self.data.len(),
        })
    }

    /// Overwrite the element at `index`; the old value is dropped.
    pub fn set(&mut self, index: usize, value: T) -> BufferResult<()> {
        let size = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(BufferError::IndexOutOfBounds { index, size })?;
        *slot = value;
        Ok(())
    }

    pub fn pop(&mut self) -> BufferResult<T> {
        self.data.pop().ok_or(BufferError::Empty)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<'a, T> IntoIterator for &'a GrowableBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
