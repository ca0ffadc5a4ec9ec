//! std140 uniform block layouts and a cursor that fills them.
//!
//! A layout is described once as a tree of [`Item`]s: scalars, vectors,
//! fixed-length arrays and structs. Sizes and alignments are computed when
//! the tree is built.\
//! [`BlockWriter`] then walks the tree leaf by leaf while values are pushed
//! into it, inserting padding, entering and leaving nested arrays and
//! structs on its own. Unused array tails can be skipped in one call.
//!
//! Uploading the produced bytes is left to the renderer, see [`UniformSink`].

#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace {
    ($($tokens:tt)*) => {
        tracing::trace!($($tokens)*)
    };
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! debug {
    ($($tokens:tt)*) => {
        tracing::debug!($($tokens)*)
    };
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! info {
    ($($tokens:tt)*) => {
        tracing::info!($($tokens)*)
    };
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! warn {
    ($($tokens:tt)*) => {
        tracing::warn!($($tokens)*)
    };
}

#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! error {
    ($($tokens:tt)*) => {
        tracing::error!($($tokens)*)
    };
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($e:expr),*) => {{ $(let _ = &$e;)* }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($e:expr),*) => {{ $( let _ = &$e;)* }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($e:expr),*) => {{ $(let _ = &$e;)* }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($e:expr),*) => {{ $(let _ = &$e;)* }};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! error {
    ($($e:expr),*) => {{ $(let _ = &$e;)* }};
}

mod block;
mod cursor;
mod layout;
mod repr;

pub use self::{block::*, cursor::*, layout::*, repr::*};

/// Re-exporting for value types.
#[doc(hidden)]
pub use bytemuck;

/// Returns minimal aligned integer not smaller than value.
/// `None` if it does not fit into `u32`.
pub fn align_up(align_mask: u32, value: u32) -> Option<u32> {
    Some(value.checked_add(align_mask)? & !align_mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_helpers() {
        assert_eq!(align_up(15, 17), Some(32));
        assert_eq!(align_up(15, u32::MAX - 3), None);

        for value in 0..64 {
            assert_eq!(align_up(7, value), Some(crate::layout::align_offset(7, value)));
        }
    }
}
