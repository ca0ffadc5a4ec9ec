mod writer;

use {
    crate::layout::{align_offset, Item, ItemKind, LayoutError},
    smallvec::SmallVec,
    std::ptr,
};

pub use self::writer::*;

/// Error that may occur while writing a uniform block.
///
/// All variants mean that the sequence of calls does not match the
/// declared layout. Session that hit one of them should be abandoned.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq, Hash)]
pub enum WriteError {
    /// More values were written or skipped than the layout has leaves.
    #[error("All layout items are already traversed")]
    ExhaustedLayout,

    /// Leaf, or the whole written range on `write_end`, exceeds the buffer.
    #[error("{size} bytes at offset {offset} do not fit into buffer of {capacity} bytes")]
    BufferOverflow {
        offset: u32,
        size: u32,
        capacity: usize,
    },

    /// Write or advance outside of `write_begin` .. `write_end`.
    #[error("Write session is not started")]
    InvalidState,

    /// Value width differs from the leaf it lands on.
    #[error("Leaf expects {expected} bytes, value has {found}")]
    LeafMismatch { expected: u32, found: usize },
}

/// Leaf located by [`Cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot<'a> {
    /// Aligned offset of the leaf from the start of the block.
    pub offset: u32,
    pub item: &'a Item,
}

#[derive(Clone, Copy, Debug)]
struct Frame<'a> {
    index: u32,
    item: &'a Item,
}

/// Resumable walk over leaves of a struct layout.
///
/// The stack holds the path from the root struct down to the innermost
/// open array or struct. Each frame records which child comes next.
/// The cursor never allocates for paths up to eight levels deep.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    root: &'a Item,
    stack: SmallVec<[Frame<'a>; 8]>,
    position: u32,
    writing: bool,
    /// Leaf returned by the last `peek_leaf`, not yet committed.
    pending: Option<Slot<'a>>,
}

impl<'a> Cursor<'a> {
    /// Creates idle cursor over `root`, which must be a struct.
    pub fn new(root: &'a Item) -> Result<Self, LayoutError> {
        if !root.is_struct() {
            return Err(LayoutError::RootNotStruct);
        }

        Ok(Cursor::new_unchecked(root))
    }

    pub(crate) fn new_unchecked(root: &'a Item) -> Self {
        Cursor {
            root,
            stack: SmallVec::new(),
            position: 0,
            writing: false,
            pending: None,
        }
    }

    pub fn root(&self) -> &'a Item {
        self.root
    }

    /// Starts new session from the first leaf, dropping any previous state.
    pub fn begin(&mut self) {
        self.stack.clear();
        self.stack.push(Frame {
            index: 0,
            item: self.root,
        });
        self.position = 0;
        self.writing = true;
        self.pending = None;
    }

    /// Finishes the session and returns the final position.
    pub fn end(&mut self) -> Result<u32, WriteError> {
        self.ensure_writing()?;
        self.stack.clear();
        self.writing = false;
        self.pending = None;
        Ok(self.position)
    }

    /// Drops the session without reporting a position.
    pub fn abort(&mut self) {
        self.stack.clear();
        self.writing = false;
        self.pending = None;
    }

    pub fn is_writing(&self) -> bool {
        self.writing
    }

    /// Returns `true` when every leaf was consumed.
    pub fn is_exhausted(&self) -> bool {
        self.writing && self.stack.is_empty()
    }

    /// Current byte offset.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Number of open arrays and structs, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn ensure_writing(&self) -> Result<(), WriteError> {
        if self.writing {
            Ok(())
        } else {
            Err(WriteError::InvalidState)
        }
    }

    /// Locates the next leaf without moving past it.
    ///
    /// Descends into any arrays and structs on the way, aligning the
    /// position to each of them and finally to the leaf itself.
    pub fn peek_leaf(&mut self) -> Result<Slot<'a>, WriteError> {
        self.ensure_writing()?;

        let top = *self.stack.last().ok_or(WriteError::ExhaustedLayout)?;
        let mut item = top.item.child(top.index).ok_or(WriteError::ExhaustedLayout)?;
        let mut offset = self.position;

        while item.is_aggregate() {
            offset = align_offset(item.align_mask(), offset);
            self.stack.push(Frame { index: 0, item });
            item = item.child(0).ok_or(WriteError::ExhaustedLayout)?;
        }

        offset = align_offset(item.align_mask(), offset);
        self.position = offset;

        let slot = Slot { offset, item };
        self.pending = Some(slot);
        Ok(slot)
    }

    /// Moves past `slot`, which must be the result of the last
    /// [`Cursor::peek_leaf`] call.
    ///
    /// Fails with [`WriteError::InvalidState`] for any other slot,
    /// including one already committed.
    pub fn commit(&mut self, slot: Slot<'a>) -> Result<(), WriteError> {
        self.ensure_writing()?;

        match self.pending {
            Some(pending) if pending.offset == slot.offset && ptr::eq(pending.item, slot.item) => {
                self.step(slot.offset + slot.item.size(), 1);
                Ok(())
            }
            _ => Err(WriteError::InvalidState),
        }
    }

    /// Locates the next leaf and moves past it.
    pub fn next_leaf(&mut self) -> Result<Slot<'a>, WriteError> {
        let slot = self.peek_leaf()?;
        self.commit(slot)?;
        Ok(slot)
    }

    /// Moves past `count` leaves.
    pub fn skip_leaves(&mut self, count: u32) -> Result<(), WriteError> {
        for _ in 0..count {
            self.next_leaf()?;
        }
        Ok(())
    }

    /// Skips up to `count` whole elements of the innermost open array.
    ///
    /// If the innermost open scope is a struct, the cursor first enters
    /// the array reached by following first members from the struct's
    /// next member. Does nothing if there is no such array.
    ///
    /// Returns number of elements skipped.
    pub fn skip_elements(&mut self, count: u32) -> Result<u32, WriteError> {
        self.ensure_writing()?;

        let top = *self.stack.last().ok_or(WriteError::ExhaustedLayout)?;

        if count == 0 {
            return Ok(0);
        }

        if top.item.is_struct() {
            let mut entered = SmallVec::<[Frame<'a>; 4]>::new();
            let mut item = top.item.child(top.index).ok_or(WriteError::ExhaustedLayout)?;

            while item.is_struct() {
                entered.push(Frame { index: 0, item });
                item = item.child(0).ok_or(WriteError::ExhaustedLayout)?;
            }

            if !matches!(item.kind(), ItemKind::Array { .. }) {
                return Ok(0);
            }

            entered.push(Frame { index: 0, item });

            for frame in &entered {
                self.position = align_offset(frame.item.align_mask(), self.position);
            }
            self.stack.extend(entered);
        }

        let top = *self.stack.last().ok_or(WriteError::ExhaustedLayout)?;
        let stride = top.item.stride().unwrap_or(0);
        let skipped = count.min(top.item.length() - top.index);

        self.step(self.position + skipped * stride, skipped);

        Ok(skipped)
    }

    /// Advances the innermost frame by `count` children, closing every
    /// scope that runs out of children on the way out.
    ///
    /// Closing a scope pads the position to its alignment.
    /// Moving to the next element of an array pads the position to the
    /// array alignment, so elements start a stride apart.
    fn step(&mut self, mut position: u32, mut count: u32) {
        self.pending = None;

        while let Some(top) = self.stack.last_mut() {
            top.index += count;
            let item = top.item;

            if top.index < item.length() {
                if let ItemKind::Array { .. } = item.kind() {
                    position = align_offset(item.align_mask(), position);
                }
                break;
            }

            self.stack.pop();
            position = align_offset(item.align_mask(), position);
            count = 1;
        }

        self.position = position;
    }
}
