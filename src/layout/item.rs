use {
    super::{align_offset, LayoutError, Leaves},
    crate::align_up,
};

/// Kind of a layout [`Item`].
///
/// The set of kinds is closed. Matrices have no kind of their own,
/// see [`Item::column_matrix`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// 4-byte scalar. `int`, `uint` and `float` share this kind.
    Scalar,
    Vector2,
    Vector3,
    Vector4,

    /// Fixed-length array of copies of `element`.
    Array { length: u32, element: Box<Item> },

    /// Ordered list of members.
    Struct { members: Vec<Item> },
}

/// Node of a uniform block shape.
///
/// Size and alignment are computed once, when the item is built,
/// following std140 rules.
/// Items are immutable afterwards and can be shared freely between writers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-1",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "super::Shape", into = "super::Shape")
)]
pub struct Item {
    name: Option<Box<str>>,
    kind: ItemKind,
    align_mask: u32,
    size: u32,
}

impl Item {
    const fn leaf(kind: ItemKind, align_mask: u32, size: u32) -> Self {
        Item {
            name: None,
            kind,
            align_mask,
            size,
        }
    }

    /// Single 4-byte scalar.
    pub const fn scalar() -> Self {
        Item::leaf(ItemKind::Scalar, 3, 4)
    }

    /// Vector of `width` 4-byte components.
    pub fn vector(width: u32) -> Result<Self, LayoutError> {
        match width {
            2 => Ok(Item::leaf(ItemKind::Vector2, 7, 8)),
            3 => Ok(Item::leaf(ItemKind::Vector3, 15, 12)),
            4 => Ok(Item::leaf(ItemKind::Vector4, 15, 16)),
            width => Err(LayoutError::InvalidVectorWidth { width }),
        }
    }

    /// Array of `length` elements shaped as `element`.
    ///
    /// Array alignment is the element alignment rounded up to 16 bytes.
    /// Arrays of structs keep the struct alignment, which is already a
    /// multiple of 16.
    pub fn array(length: u32, element: Item) -> Result<Self, LayoutError> {
        if length == 0 {
            return Err(LayoutError::InvalidArrayLength);
        }

        let align_mask = match element.kind {
            ItemKind::Struct { .. } => element.align_mask,
            _ => element.align_mask | 15,
        };

        let stride = align_up(align_mask, element.size).ok_or(LayoutError::Overflow)?;
        let size = stride.checked_mul(length).ok_or(LayoutError::Overflow)?;

        Ok(Item {
            name: None,
            kind: ItemKind::Array {
                length,
                element: Box::new(element),
            },
            align_mask,
            size,
        })
    }

    /// Struct with `members` laid out in order.
    ///
    /// Each member starts at the next multiple of its alignment.
    /// Struct size is rounded up to the struct alignment, so a member
    /// following a nested struct starts on a 16-byte boundary.
    pub fn structure(members: impl IntoIterator<Item = Item>) -> Result<Self, LayoutError> {
        let members: Vec<Item> = members.into_iter().collect();

        if members.is_empty() {
            return Err(LayoutError::EmptyStruct);
        }

        let mut align_mask = 15;
        let mut offset = 0u32;

        for member in &members {
            align_mask |= member.align_mask;
            offset = align_up(member.align_mask, offset).ok_or(LayoutError::Overflow)?;
            offset = offset
                .checked_add(member.size)
                .ok_or(LayoutError::Overflow)?;
        }

        let size = align_up(align_mask, offset).ok_or(LayoutError::Overflow)?;

        Ok(Item {
            name: None,
            kind: ItemKind::Struct { members },
            align_mask,
            size,
        })
    }

    /// Column-major matrix with `columns` columns of `rows`-wide vectors.
    ///
    /// Same as `array(columns, vector(rows))`.
    pub fn column_matrix(columns: u32, rows: u32) -> Result<Self, LayoutError> {
        if !(2..=4).contains(&columns) || !(2..=4).contains(&rows) {
            return Err(LayoutError::InvalidMatrixShape { columns, rows });
        }

        Item::array(columns, Item::vector(rows)?)
    }

    /// Returns this item with `name` attached.
    pub fn named(mut self, name: impl Into<Box<str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Size in bytes.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Base alignment in bytes.
    pub fn alignment(&self) -> u32 {
        self.align_mask + 1
    }

    pub fn align_mask(&self) -> u32 {
        self.align_mask
    }

    /// Returns `true` for scalars and vectors.
    pub fn is_leaf(&self) -> bool {
        !self.is_aggregate()
    }

    /// Returns `true` for arrays and structs.
    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, ItemKind::Array { .. } | ItemKind::Struct { .. })
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, ItemKind::Struct { .. })
    }

    /// Repeat count for arrays, member count for structs, zero for leaves.
    pub fn length(&self) -> u32 {
        match &self.kind {
            ItemKind::Array { length, .. } => *length,
            // Member count is bounded by the size computation.
            ItemKind::Struct { members } => members.len() as u32,
            _ => 0,
        }
    }

    /// Child at `index`.
    ///
    /// For arrays this is the element template regardless of `index`.
    pub fn child(&self, index: u32) -> Option<&Item> {
        match &self.kind {
            ItemKind::Array { element, .. } => Some(&**element),
            ItemKind::Struct { members } => members.get(index as usize),
            _ => None,
        }
    }

    /// Distance between consecutive array elements.
    pub fn stride(&self) -> Option<u32> {
        match &self.kind {
            ItemKind::Array { element, .. } => {
                Some(align_offset(self.align_mask, element.size))
            }
            _ => None,
        }
    }

    /// Offsets of struct members relative to the struct start.
    /// Empty for anything but structs.
    pub fn member_offsets(&self) -> Vec<u32> {
        match &self.kind {
            ItemKind::Struct { members } => {
                let mut offset = 0;
                members
                    .iter()
                    .map(|member| {
                        let start = align_offset(member.align_mask, offset);
                        offset = start + member.size;
                        start
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Offset of the struct member called `name`.
    pub fn member_offset(&self, name: &str) -> Option<u32> {
        match &self.kind {
            ItemKind::Struct { members } => members
                .iter()
                .zip(self.member_offsets())
                .find(|(member, _)| member.name() == Some(name))
                .map(|(_, offset)| offset),
            _ => None,
        }
    }

    /// Iterates over every leaf in declaration order together with its
    /// offset from the start of this item.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }
}
