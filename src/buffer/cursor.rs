//! `std::io` adapter over a view's cursor.
//!
//! `ViewCursor` lets any `BufferView` act as a `Read + Write + Seek` stream,
//! for example as the source or sink of a `Base64Codec` transform. It holds
//! no position of its own: reads, writes and seeks move the wrapped view's
//! cursor, so a `ViewCursor` over a `ThreadLocalBufferView` streams with a
//! per-thread position.

use std::io::{self, Read, Seek, SeekFrom, Write};

use super::BufferView;

#[derive(Debug, Clone)]
pub struct ViewCursor<V> {
    view: V,
}

impl<V: BufferView> ViewCursor<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn get_ref(&self) -> &V {
        &self.view
    }

    pub fn into_inner(self) -> V {
        self.view
    }
}

fn to_io(err: eyre::Report) -> io::Error {
    io::Error::other(format!("{:#}", err))
}

impl<V: BufferView> Read for ViewCursor<V> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.view.read_next(buf).map_err(to_io)
    }
}

impl<V: BufferView> Write for ViewCursor<V> {
    /// Writes as much of `buf` as fits before `limit()`; returns 0 once the
    /// view is full, which `write_all` reports as `WriteZero`.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = (buf.len() as u64).min(self.view.remaining()) as usize;
        self.view.write_next(&buf[..n]).map_err(to_io)?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.view.force().map_err(to_io)
    }
}

impl<V: BufferView> Seek for ViewCursor<V> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::End(delta) => self.view.limit().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.view.position().checked_add_signed(delta),
        };
        let target = target.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek before start of buffer")
        })?;
        self.view.set_position(target).map_err(|err| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("{:#}", err))
        })?;
        Ok(target)
    }
}
