use {
    super::{align_offset, Item, ItemKind},
    smallvec::SmallVec,
};

#[derive(Clone, Copy, Debug)]
struct Frame<'a> {
    item: &'a Item,
    index: u32,
    /// Offset of the next child.
    offset: u32,
}

/// Iterator over leaves of an [`Item`] in declaration order.
///
/// Yields `(offset, leaf)` pairs where `offset` is relative to the
/// start of the item the iterator was created from.
#[derive(Clone, Debug)]
pub struct Leaves<'a> {
    stack: SmallVec<[Frame<'a>; 8]>,
    root_leaf: Option<&'a Item>,
}

impl<'a> Leaves<'a> {
    pub(super) fn new(item: &'a Item) -> Self {
        let mut stack = SmallVec::new();
        let mut root_leaf = None;

        if item.is_leaf() {
            root_leaf = Some(item);
        } else {
            stack.push(Frame {
                item,
                index: 0,
                offset: 0,
            });
        }

        Leaves { stack, root_leaf }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = (u32, &'a Item);

    fn next(&mut self) -> Option<(u32, &'a Item)> {
        if let Some(leaf) = self.root_leaf.take() {
            return Some((0, leaf));
        }

        loop {
            let top = self.stack.last_mut()?;

            if top.index >= top.item.length() {
                self.stack.pop();
                continue;
            }

            let child = top.item.child(top.index)?;
            let start = align_offset(child.align_mask(), top.offset);

            top.offset = match top.item.kind() {
                ItemKind::Array { .. } => start + top.item.stride().unwrap_or(0),
                _ => start + child.size(),
            };
            top.index += 1;

            if child.is_leaf() {
                return Some((start, child));
            }

            self.stack.push(Frame {
                item: child,
                index: 0,
                offset: start,
            });
        }
    }
}
