use std::convert::TryFrom;

use super::{Item, ItemKind, LayoutError};

/// Plain description of a layout item.
///
/// Unlike [`Item`] it carries no computed size or alignment,
/// so it is what layouts are stored as in configuration files.
/// Converting into [`Item`] runs the regular validation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Scalar,
    Vector(u32),
    Matrix { columns: u32, rows: u32 },
    Array { length: u32, element: Box<Shape> },
    Struct { members: Vec<Shape> },
    Named(String, Box<Shape>),
}

impl TryFrom<Shape> for Item {
    type Error = LayoutError;

    fn try_from(shape: Shape) -> Result<Item, LayoutError> {
        match shape {
            Shape::Scalar => Ok(Item::scalar()),
            Shape::Vector(width) => Item::vector(width),
            Shape::Matrix { columns, rows } => Item::column_matrix(columns, rows),
            Shape::Array { length, element } => Item::array(length, Item::try_from(*element)?),
            Shape::Struct { members } => Item::structure(
                members
                    .into_iter()
                    .map(Item::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Shape::Named(name, shape) => Ok(Item::try_from(*shape)?.named(name)),
        }
    }
}

impl From<&Item> for Shape {
    fn from(item: &Item) -> Shape {
        let shape = match item.kind() {
            ItemKind::Scalar => Shape::Scalar,
            ItemKind::Vector2 => Shape::Vector(2),
            ItemKind::Vector3 => Shape::Vector(3),
            ItemKind::Vector4 => Shape::Vector(4),
            ItemKind::Array { length, element } => Shape::Array {
                length: *length,
                element: Box::new(Shape::from(&**element)),
            },
            ItemKind::Struct { members } => Shape::Struct {
                members: members.iter().map(Shape::from).collect(),
            },
        };

        match item.name() {
            Some(name) => Shape::Named(name.to_owned(), Box::new(shape)),
            None => shape,
        }
    }
}

impl From<Item> for Shape {
    fn from(item: Item) -> Shape {
        Shape::from(&item)
    }
}
