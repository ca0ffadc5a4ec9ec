use {super::UniformValue, bytemuck::Pod};

/// 4-byte type usable as a scalar or a vector component.
///
/// # Safety
///
/// Must be implemented only for `Pod` types that are exactly 4 bytes
/// wide with alignment not greater than 4.
pub unsafe trait Component: Pod {}

unsafe impl Component for i32 {}
unsafe impl Component for u32 {}
unsafe impl Component for f32 {}

macro_rules! impl_scalar_value {
    ($($t:ty),*) => {
        $(
            impl UniformValue for $t {
                const LEAVES: usize = 1;

                fn leaf_bytes(&self, _index: usize) -> &[u8] {
                    bytemuck::bytes_of(self)
                }
            }
        )*
    };
}

impl_scalar_value!(i32, u32, f32);
