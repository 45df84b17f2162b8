//! Wrap-around indexing over closed sequences.

use crate::error::{Result, SplineError};

/// Normalizes `j + offset` into `[0, len)`.
///
/// Any offset is accepted, including negative offsets larger than `len`.
pub fn cyclic_index(len: usize, j: usize, offset: isize) -> Result<usize> {
    if len == 0 {
        return Err(SplineError::EmptyContour);
    }
    let n = len as isize;
    let base = (j % len) as isize;
    Ok((base + offset % n).rem_euclid(n) as usize)
}

/// Cyclic element access on a closed sequence.
pub trait Cyclic<T> {
    /// Gets the element at `j + offset`, wrapping around.
    fn term(&self, j: usize, offset: isize) -> Result<&T>;

    /// Gets a mutable reference to the element at `j + offset`, wrapping around.
    fn term_mut(&mut self, j: usize, offset: isize) -> Result<&mut T>;

    /// Replaces the element at `j + offset` and returns the previous one.
    fn replace_term(&mut self, j: usize, offset: isize, value: T) -> Result<T> {
        let slot = self.term_mut(j, offset)?;
        Ok(std::mem::replace(slot, value))
    }
}

impl<T> Cyclic<T> for [T] {
    fn term(&self, j: usize, offset: isize) -> Result<&T> {
        let idx = cyclic_index(self.len(), j, offset)?;
        Ok(&self[idx])
    }

    fn term_mut(&mut self, j: usize, offset: isize) -> Result<&mut T> {
        let idx = cyclic_index(self.len(), j, offset)?;
        Ok(&mut self[idx])
    }
}

/// Inserts `value` at the normalized index of `j + offset`, shifting later elements.
/// Returns the index the value was stored at.
pub fn insert_term<T>(seq: &mut Vec<T>, j: usize, offset: isize, value: T) -> Result<usize> {
    let idx = cyclic_index(seq.len(), j, offset)?;
    seq.insert(idx, value);
    Ok(idx)
}
