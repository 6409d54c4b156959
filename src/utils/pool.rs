use std::ops::{Deref, DerefMut};

/// Recycles large scratch buffers (flood-fill visited maps) between calls.
#[derive(Debug, Default)]
pub struct BufferPool {
    free: Vec<Vec<bool>>,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rent a zeroed buffer of `len` flags. It goes back to the pool when the
    /// guard is dropped, including during unwinding.
    pub fn rent(&mut self, len: usize) -> PooledBuffer<'_> {
        let mut buffer = self.free.pop().unwrap_or_default();
        buffer.clear();
        buffer.resize(len, false);
        PooledBuffer { pool: self, buffer }
    }

    /// Number of buffers currently waiting to be reused.
    pub fn available(&self) -> usize {
        self.free.len()
    }
}

/// Scoped loan of a buffer from a [`BufferPool`].
pub struct PooledBuffer<'a> {
    pool: &'a mut BufferPool,
    buffer: Vec<bool>,
}

impl Deref for PooledBuffer<'_> {
    type Target = [bool];

    fn deref(&self) -> &[bool] {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut [bool] {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.free.push(std::mem::take(&mut self.buffer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_are_returned_and_cleared() {
        let mut pool = BufferPool::new();
        {
            let mut buf = pool.rent(16);
            buf[3] = true;
        }
        assert_eq!(pool.available(), 1);

        let buf = pool.rent(8);
        assert_eq!(buf.len(), 8);
        assert!(buf.iter().all(|v| !v));
        drop(buf);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn buffer_returns_on_panic() {
        let mut pool = BufferPool::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _buf = pool.rent(4);
            panic!("fill aborted");
        }));
        assert!(result.is_err());
        assert_eq!(pool.available(), 1);
    }
}
