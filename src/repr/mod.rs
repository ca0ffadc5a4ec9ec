#![allow(non_camel_case_types)]

mod matrix;
mod scalar;
mod vector;

pub use self::{matrix::*, scalar::*, vector::*};

/// Value that can be written into uniform block leaves.
///
/// Scalars and vectors fill one leaf.
/// A matrix fills one leaf per column, matching the array-of-columns
/// layout produced by [`Item::column_matrix`](crate::Item::column_matrix).
pub trait UniformValue {
    /// Number of consecutive leaves the value fills.
    const LEAVES: usize;

    /// Raw bytes for leaf `index`.
    ///
    /// `index` must be less than [`Self::LEAVES`].
    fn leaf_bytes(&self, index: usize) -> &[u8];
}

impl<T> UniformValue for &T
where
    T: UniformValue,
{
    const LEAVES: usize = T::LEAVES;

    fn leaf_bytes(&self, index: usize) -> &[u8] {
        T::leaf_bytes(self, index)
    }
}
