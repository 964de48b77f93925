//! Non-owning buffer descriptors exchanged between callers and tasks.
//!
//! A descriptor records where a buffer lives and how many elements it is
//! declared to hold, never its interpretation. The caller owns the memory;
//! descriptors borrow it for the lifetime of the set, and the consuming
//! task's `validate` phase is responsible for rejecting shapes it cannot
//! work with.

use bytemuck::Pod;

use super::error::{TaskError, TaskResult};

/// A read-only view over caller-owned input memory.
#[derive(Debug, Clone, Copy)]
pub struct InputDescriptor<'a> {
    bytes: &'a [u8],
    elements: usize,
}

impl<'a> InputDescriptor<'a> {
    /// Creates a descriptor over a typed slice.
    #[must_use]
    pub fn of_slice<T: Pod>(slice: &'a [T]) -> Self {
        Self {
            bytes: bytemuck::cast_slice(slice),
            elements: slice.len(),
        }
    }

    /// Creates a descriptor over raw bytes with an explicit element count.
    ///
    /// The count is taken on faith here; it is checked against the byte
    /// length when the consuming task requests a typed view.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8], elements: usize) -> Self {
        Self { bytes, elements }
    }

    /// Declared number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements
    }

    /// Returns `true` if the descriptor declares zero elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    /// Raw byte view of the referenced memory.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Reinterprets the referenced memory as a slice of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MalformedDescriptor`] if the byte length is
    /// inconsistent with the declared element count for `T`, or if the
    /// memory is not suitably aligned for `T`.
    pub fn as_slice<T: Pod>(&self) -> TaskResult<&'a [T]> {
        check_extent::<T>(self.bytes.len(), self.elements)?;
        bytemuck::try_cast_slice(self.bytes)
            .map_err(|e| TaskError::MalformedDescriptor(e.to_string()))
    }
}

/// A mutable view over caller-owned output memory.
#[derive(Debug)]
pub struct OutputDescriptor<'a> {
    bytes: &'a mut [u8],
    elements: usize,
}

impl<'a> OutputDescriptor<'a> {
    /// Creates a descriptor over a typed mutable slice.
    #[must_use]
    pub fn of_slice<T: Pod>(slice: &'a mut [T]) -> Self {
        let elements = slice.len();
        Self {
            bytes: bytemuck::cast_slice_mut(slice),
            elements,
        }
    }

    /// Creates a descriptor over raw bytes with an explicit element count.
    #[must_use]
    pub fn from_bytes(bytes: &'a mut [u8], elements: usize) -> Self {
        Self { bytes, elements }
    }

    /// Declared number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements
    }

    /// Returns `true` if the descriptor declares zero elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements == 0
    }

    /// Reinterprets the referenced memory as a mutable slice of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::MalformedDescriptor`] under the same conditions
    /// as [`InputDescriptor::as_slice`].
    pub fn as_slice_mut<T: Pod>(&mut self) -> TaskResult<&mut [T]> {
        check_extent::<T>(self.bytes.len(), self.elements)?;
        bytemuck::try_cast_slice_mut(self.bytes)
            .map_err(|e| TaskError::MalformedDescriptor(e.to_string()))
    }
}

fn check_extent<T>(byte_len: usize, elements: usize) -> TaskResult<()> {
    let expected = elements
        .checked_mul(std::mem::size_of::<T>())
        .ok_or_else(|| {
            TaskError::MalformedDescriptor(format!("element count {elements} overflows"))
        })?;
    if byte_len != expected {
        return Err(TaskError::MalformedDescriptor(format!(
            "{elements} elements of {} bytes declared over {byte_len} bytes",
            std::mem::size_of::<T>(),
        )));
    }
    Ok(())
}

/// An ordered set of input and output buffer descriptors.
///
/// Purely structural: it exposes ordered access to its descriptors and never
/// interprets or mutates the referenced memory. Interpretation belongs to the
/// consuming task.
#[derive(Debug, Default)]
pub struct BufferDescriptorSet<'a> {
    inputs: Vec<InputDescriptor<'a>>,
    outputs: Vec<OutputDescriptor<'a>>,
}

impl<'a> BufferDescriptorSet<'a> {
    /// Creates a set with no buffers, as used by non-coordinator
    /// participants of a parallel task.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts building a descriptor set.
    #[must_use]
    pub fn builder() -> BufferSetBuilder<'a> {
        BufferSetBuilder::default()
    }

    /// Number of input buffers.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of output buffers.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// The ordered input descriptors.
    #[must_use]
    pub fn inputs(&self) -> &[InputDescriptor<'a>] {
        &self.inputs
    }

    /// The ordered output descriptors.
    #[must_use]
    pub fn outputs(&self) -> &[OutputDescriptor<'a>] {
        &self.outputs
    }

    /// The input descriptor at `index`, if present.
    #[must_use]
    pub fn input(&self, index: usize) -> Option<&InputDescriptor<'a>> {
        self.inputs.get(index)
    }

    /// The output descriptor at `index`, if present.
    #[must_use]
    pub fn output(&self, index: usize) -> Option<&OutputDescriptor<'a>> {
        self.outputs.get(index)
    }

    /// Mutable access to the output descriptor at `index`, if present.
    pub fn output_mut(&mut self, index: usize) -> Option<&mut OutputDescriptor<'a>> {
        self.outputs.get_mut(index)
    }

    /// Mutable access to all output descriptors.
    pub fn outputs_mut(&mut self) -> &mut [OutputDescriptor<'a>] {
        &mut self.outputs
    }
}

/// Builder for [`BufferDescriptorSet`].
#[derive(Debug, Default)]
pub struct BufferSetBuilder<'a> {
    inputs: Vec<InputDescriptor<'a>>,
    outputs: Vec<OutputDescriptor<'a>>,
}

impl<'a> BufferSetBuilder<'a> {
    /// Appends an input buffer described by a typed slice.
    #[must_use]
    pub fn input<T: Pod>(mut self, slice: &'a [T]) -> Self {
        self.inputs.push(InputDescriptor::of_slice(slice));
        self
    }

    /// Appends an input buffer described by raw bytes and an element count.
    #[must_use]
    pub fn input_bytes(mut self, bytes: &'a [u8], elements: usize) -> Self {
        self.inputs.push(InputDescriptor::from_bytes(bytes, elements));
        self
    }

    /// Appends an output buffer described by a typed mutable slice.
    #[must_use]
    pub fn output<T: Pod>(mut self, slice: &'a mut [T]) -> Self {
        self.outputs.push(OutputDescriptor::of_slice(slice));
        self
    }

    /// Appends an output buffer described by raw bytes and an element count.
    #[must_use]
    pub fn output_bytes(mut self, bytes: &'a mut [u8], elements: usize) -> Self {
        self.outputs
            .push(OutputDescriptor::from_bytes(bytes, elements));
        self
    }

    /// Finishes the set.
    #[must_use]
    pub fn build(self) -> BufferDescriptorSet<'a> {
        BufferDescriptorSet {
            inputs: self.inputs,
            outputs: self.outputs,
        }
    }
}
