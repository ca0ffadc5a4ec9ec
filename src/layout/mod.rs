mod item;
mod leaves;
mod shape;

pub use self::{item::*, leaves::*, shape::*};

/// Rounds `offset` up to the next multiple of `align_mask + 1`.
pub(crate) const fn align_offset(align_mask: u32, offset: u32) -> u32 {
    (offset + align_mask) & !align_mask
}

/// Error that may occur while building a layout.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutError {
    #[error("Vector width must be 2, 3 or 4, got {width}")]
    InvalidVectorWidth { width: u32 },

    #[error("Array length must be at least 1")]
    InvalidArrayLength,

    #[error("Matrix must have 2 to 4 columns and rows, got {columns}x{rows}")]
    InvalidMatrixShape { columns: u32, rows: u32 },

    #[error("Struct must have at least one member")]
    EmptyStruct,

    /// Block root must be a struct.
    #[error("Layout root must be a struct")]
    RootNotStruct,

    #[error("Layout size does not fit into 32 bits")]
    Overflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_arithmetic() {
        assert_eq!(align_offset(15, 0), 0);
        assert_eq!(align_offset(15, 1), 16);
        assert_eq!(align_offset(15, 16), 16);
        assert_eq!(align_offset(3, 13), 16);
    }
}
