use crate::{
    cursor::{BlockWriter, WriteError},
    layout::{Item, LayoutError},
};

/// Receiver of finished uniform block bytes.
///
/// Usually implemented by renderer's GPU buffer wrapper.
pub trait UniformSink {
    /// Uploads `bytes` to the start of the destination.
    fn upload(&mut self, bytes: &[u8]);
}

/// Keeps a copy of the last upload.
impl UniformSink for Vec<u8> {
    fn upload(&mut self, bytes: &[u8]) {
        self.clear();
        self.extend_from_slice(bytes);
    }
}

impl<S> UniformSink for &mut S
where
    S: UniformSink + ?Sized,
{
    fn upload(&mut self, bytes: &[u8]) {
        S::upload(self, bytes)
    }
}

/// Uniform block contract bound to a binding index,
/// together with its CPU-side image.
#[derive(Clone, Debug)]
pub struct UniformBlock {
    name: Box<str>,
    binding: u32,
    layout: Item,
    data: Vec<u8>,
}

impl UniformBlock {
    /// Creates block with zeroed image of `layout.size()` bytes.
    /// `layout` must be a struct.
    pub fn new(name: impl Into<Box<str>>, binding: u32, layout: Item) -> Result<Self, LayoutError> {
        if !layout.is_struct() {
            return Err(LayoutError::RootNotStruct);
        }

        let name = name.into();
        let data = vec![0; layout.size() as usize];

        crate::debug!(
            "Uniform block '{}' at binding {} with {} bytes",
            name,
            binding,
            data.len()
        );

        Ok(UniformBlock {
            name,
            binding,
            layout,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn binding(&self) -> u32 {
        self.binding
    }

    pub fn layout(&self) -> &Item {
        &self.layout
    }

    /// Size of the block image in bytes.
    pub fn size(&self) -> u32 {
        self.layout.size()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns idle writer over the block image.
    pub fn writer(&mut self) -> BlockWriter<'_> {
        BlockWriter::new_unchecked(&self.layout, &mut self.data)
    }

    /// Runs one complete write session.
    ///
    /// If `f` fails the session is dropped and nothing is uploaded.
    pub fn update<F>(&mut self, sink: &mut impl UniformSink, f: F) -> Result<usize, WriteError>
    where
        F: FnOnce(&mut BlockWriter<'_>) -> Result<(), WriteError>,
    {
        let mut writer = BlockWriter::new_unchecked(&self.layout, &mut self.data);
        writer.write_begin();

        match f(&mut writer) {
            Ok(()) => writer.write_end(sink),
            Err(err) => {
                crate::warn!("Uniform block '{}' update dropped: {}", self.name, err);
                writer.abort();
                Err(err)
            }
        }
    }

    /// Iterates over every leaf with its offset and current bytes.
    pub fn read_leaves(&self) -> impl Iterator<Item = (u32, &Item, &[u8])> + '_ {
        self.layout.leaves().map(move |(offset, item)| {
            let start = offset as usize;
            let bytes = &self.data[start..start + item.size() as usize];
            (offset, item, bytes)
        })
    }
}
