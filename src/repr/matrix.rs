use {
    super::{vector::vec, UniformValue},
    bytemuck::{Pod, Zeroable},
};

/// Column-major matrix with `N` columns of `M` rows.
///
/// Written as `N` vector leaves, one per column.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct mat<T, const N: usize, const M: usize>(pub [vec<T, M>; N]);

unsafe impl<T: Zeroable, const N: usize, const M: usize> Zeroable for mat<T, N, M> {}
unsafe impl<T: Pod, const N: usize, const M: usize> Pod for mat<T, N, M> {}

impl<T: Zeroable, const N: usize, const M: usize> Default for mat<T, N, M> {
    fn default() -> Self {
        Zeroable::zeroed()
    }
}

/// Builds matrix from an array of columns.
impl<T, const N: usize, const M: usize> From<[[T; M]; N]> for mat<T, N, M> {
    fn from(columns: [[T; M]; N]) -> Self {
        mat(columns.map(vec))
    }
}

impl<T, const N: usize, const M: usize> mat<T, N, M> {
    pub fn column(&self, index: usize) -> Option<&vec<T, M>> {
        self.0.get(index)
    }
}

impl<const N: usize> mat<f32, N, N> {
    pub fn identity() -> Self {
        let mut m = mat([vec([0.0; N]); N]);
        for (i, column) in m.0.iter_mut().enumerate() {
            column.0[i] = 1.0;
        }
        m
    }
}

impl<T, const N: usize, const M: usize> UniformValue for mat<T, N, M>
where
    vec<T, M>: UniformValue,
{
    const LEAVES: usize = N;

    fn leaf_bytes(&self, index: usize) -> &[u8] {
        self.0[index].leaf_bytes(0)
    }
}

pub type mat2<T = f32> = mat<T, 2, 2>;
pub type mat3<T = f32> = mat<T, 3, 3>;
pub type mat4<T = f32> = mat<T, 4, 4>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mat4_fills_four_column_leaves() {
        let m = mat4::from([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);

        assert_eq!(<mat4 as UniformValue>::LEAVES, 4);
        assert_eq!(
            bytemuck::cast_slice::<u8, f32>(m.leaf_bytes(2)),
            [9.0, 10.0, 11.0, 12.0]
        );
    }

    #[test]
    fn identity_has_ones_on_diagonal() {
        let m = mat3::identity();
        assert_eq!(m.column(0), Some(&vec([1.0, 0.0, 0.0])));
        assert_eq!(m.column(1), Some(&vec([0.0, 1.0, 0.0])));
        assert_eq!(m.column(2), Some(&vec([0.0, 0.0, 1.0])));
        assert_eq!(m.column(3), None);
    }

    #[test]
    fn non_square_columns() {
        let m = mat::<f32, 2, 3>::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(<mat<f32, 2, 3> as UniformValue>::LEAVES, 2);
        assert_eq!(m.leaf_bytes(1).len(), 12);
        assert_eq!(m.column(1), Some(&vec([4.0, 5.0, 6.0])));
    }
}
