use {
    super::{scalar::Component, UniformValue},
    bytemuck::{Pod, Zeroable},
};

/// `N` packed components, written as a single vector leaf.
///
/// Only `N` of 2, 3 and 4 with [`Component`] items can be written.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct vec<T, const N: usize>(pub [T; N]);

unsafe impl<T: Zeroable, const N: usize> Zeroable for vec<T, N> {}
unsafe impl<T: Pod, const N: usize> Pod for vec<T, N> {}

impl<T: Zeroable, const N: usize> Default for vec<T, N> {
    fn default() -> Self {
        Zeroable::zeroed()
    }
}

impl<T, const N: usize> From<[T; N]> for vec<T, N> {
    fn from(components: [T; N]) -> Self {
        vec(components)
    }
}

impl<T, const N: usize> vec<T, N> {
    pub fn into_array(self) -> [T; N] {
        self.0
    }
}

macro_rules! impl_vector_value {
    ($($n:literal),*) => {
        $(
            impl<T: Component> UniformValue for vec<T, $n> {
                const LEAVES: usize = 1;

                fn leaf_bytes(&self, _index: usize) -> &[u8] {
                    bytemuck::bytes_of(self)
                }
            }
        )*
    };
}

impl_vector_value!(2, 3, 4);

pub type vec2<T = f32> = vec<T, 2>;
pub type vec3<T = f32> = vec<T, 3>;
pub type vec4<T = f32> = vec<T, 4>;
