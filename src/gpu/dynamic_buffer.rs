//! Dynamic GPU buffer management with automatic resizing.
//!
//! The cube instance and point vertex buffers are replaced wholesale every
//! time the scene producer delivers a frame, so they grow with a 2x strategy
//! to keep reallocations rare. Buffers never shrink (GPU buffers cannot be
//! resized in place).

/// A GPU buffer holding a contiguous array of `T` that grows on demand.
///
/// Tracks item count rather than byte length.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize, // capacity in bytes
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with the given initial capacity in items.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_items: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = (size_of::<T>() * initial_items).max(64);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Empty input only resets the count; no zero-length GPU write is issued.
    /// Returns `true` if the buffer was reallocated (any bind groups built
    /// on it need recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        let reallocated = if needed > self.capacity {
            // 2x growth, minimum 1KB step
            let new_capacity = (needed * 2).max(self.capacity + 1024);

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }
        self.count = data.len();

        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of items currently stored.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the buffer currently holds no items.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
