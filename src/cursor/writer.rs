use {
    super::{Cursor, WriteError},
    crate::{
        block::UniformSink,
        layout::{Item, LayoutError},
        repr::{mat4, vec2, vec3, vec4, UniformValue},
    },
};

/// Writes values into a byte buffer following a struct layout.
///
/// Values must be written in the order leaves appear in the layout.
/// Alignment padding is inserted automatically.
///
/// ```
/// # use uniform_block::{BlockWriter, Item, vec3};
/// let layout = Item::structure([Item::vector(3)?, Item::scalar()])?;
/// let mut bytes = vec![0u8; layout.size() as usize];
/// let mut uploaded = Vec::<u8>::new();
///
/// let mut writer = BlockWriter::new(&layout, &mut bytes)?;
/// writer.write_begin();
/// writer.write_vec3(vec3::from([1.0, 2.0, 3.0]))?;
/// writer.write_float(0.5)?;
/// writer.write_end(&mut uploaded)?;
///
/// assert_eq!(uploaded.len(), 16);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BlockWriter<'a> {
    cursor: Cursor<'a>,
    data: &'a mut [u8],
}

impl<'a> BlockWriter<'a> {
    /// Creates idle writer for `layout` over `data`.
    ///
    /// `data` should be at least `layout.size()` bytes long,
    /// otherwise writes past its end and [`BlockWriter::write_end`] after
    /// skipping past it fail with [`WriteError::BufferOverflow`].
    pub fn new(layout: &'a Item, data: &'a mut [u8]) -> Result<Self, LayoutError> {
        Ok(BlockWriter {
            cursor: Cursor::new(layout)?,
            data,
        })
    }

    pub(crate) fn new_unchecked(layout: &'a Item, data: &'a mut [u8]) -> Self {
        BlockWriter {
            cursor: Cursor::new_unchecked(layout),
            data,
        }
    }

    /// Starts new write session.
    ///
    /// Zeroes the buffer, so skipped leaves and padding read as zeroes.
    pub fn write_begin(&mut self) {
        crate::trace!("Begin writing {} bytes", self.data.len());

        self.cursor.begin();
        self.data.fill(0);
    }

    /// Finishes the session and uploads written bytes to `sink`.
    ///
    /// Returns number of bytes uploaded.
    /// Nothing is uploaded if skipped leaves moved the position past the
    /// end of the buffer.
    pub fn write_end(&mut self, sink: &mut impl UniformSink) -> Result<usize, WriteError> {
        let position = self.cursor.end().map_err(log_error)?;
        let end = position as usize;

        if end > self.data.len() {
            return Err(log_error(WriteError::BufferOverflow {
                offset: 0,
                size: position,
                capacity: self.data.len(),
            }));
        }

        crate::trace!("End writing at {}", end);

        sink.upload(&self.data[..end]);
        Ok(end)
    }

    /// Drops the session without uploading anything.
    pub fn abort(&mut self) {
        self.cursor.abort();
    }

    pub fn is_writing(&self) -> bool {
        self.cursor.is_writing()
    }

    /// Current byte offset.
    pub fn position(&self) -> u32 {
        self.cursor.position()
    }

    pub fn layout(&self) -> &'a Item {
        self.cursor.root()
    }

    /// Bytes written so far.
    pub fn bytes(&self) -> &[u8] {
        self.data
    }

    /// Writes `value` into the next leaves.
    pub fn write<V>(&mut self, value: V) -> Result<(), WriteError>
    where
        V: UniformValue,
    {
        for index in 0..V::LEAVES {
            self.write_leaf(value.leaf_bytes(index))?;
        }
        Ok(())
    }

    /// Copies raw `bytes` into the next leaf.
    pub fn write_leaf(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        let slot = self.cursor.peek_leaf().map_err(log_error)?;
        let size = slot.item.size();
        let start = slot.offset as usize;
        let end = start + size as usize;

        if end > self.data.len() {
            return Err(log_error(WriteError::BufferOverflow {
                offset: slot.offset,
                size,
                capacity: self.data.len(),
            }));
        }

        if bytes.len() != size as usize {
            return Err(log_error(WriteError::LeafMismatch {
                expected: size,
                found: bytes.len(),
            }));
        }

        self.data[start..end].copy_from_slice(bytes);
        self.cursor.commit(slot).map_err(log_error)
    }

    pub fn write_int(&mut self, value: i32) -> Result<(), WriteError> {
        self.write(value)
    }

    pub fn write_uint(&mut self, value: u32) -> Result<(), WriteError> {
        self.write(value)
    }

    pub fn write_float(&mut self, value: f32) -> Result<(), WriteError> {
        self.write(value)
    }

    pub fn write_vec2(&mut self, value: vec2) -> Result<(), WriteError> {
        self.write(value)
    }

    pub fn write_vec3(&mut self, value: vec3) -> Result<(), WriteError> {
        self.write(value)
    }

    pub fn write_vec4(&mut self, value: vec4) -> Result<(), WriteError> {
        self.write(value)
    }

    /// Writes four columns of `value`.
    pub fn write_mat4(&mut self, value: &mat4) -> Result<(), WriteError> {
        self.write(value)
    }

    /// Skips `count` leaves, leaving their bytes zeroed.
    pub fn advance_cursor(&mut self, count: u32) -> Result<(), WriteError> {
        self.cursor.skip_leaves(count).map_err(log_error)
    }

    /// Skips up to `count` elements of the innermost open array.
    /// See [`Cursor::skip_elements`].
    ///
    /// Returns number of elements skipped.
    pub fn advance_array(&mut self, count: u32) -> Result<u32, WriteError> {
        let skipped = self.cursor.skip_elements(count).map_err(log_error)?;

        crate::trace!(
            "Advanced array by {} elements, position {}",
            skipped,
            self.cursor.position()
        );

        Ok(skipped)
    }
}

fn log_error(err: WriteError) -> WriteError {
    crate::error!("Uniform block write failed: {}", err);
    err
}
