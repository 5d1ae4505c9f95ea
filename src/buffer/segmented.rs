//! # Segmented File Buffer
//!
//! `SegmentedFileBuffer` presents `[0, file_size)` as one flat address space
//! over a file that may be far larger than a single mapping should be. The
//! file is covered by overlapping windows: segment `i` maps
//! `[i * S, i * S + min(2 * S, file_size - i * S))`.
//!
//! ## Why Overlap
//!
//! A fixed-width scalar must never straddle two independent mappings. With
//! double-width windows, an access that starts in nominal segment `i` and is
//! no wider than `S` always ends inside segment `i`'s mapping, so scalar
//! access resolves exactly one segment: `idx / S` at offset `idx % S`.
//! Byte ranges wider than that are copied segment by segment, each step
//! taking as many bytes as the current segment holds past the offset.
//!
//! ## Lifecycle
//!
//! The file size is fixed when the buffer is opened; the buffer never grows
//! or truncates the file. The `File` handle is only needed while mapping and
//! is closed before `open` returns, whether mapping succeeded or not. The
//! mappings are released when the last clone is dropped.
//!
//! ## Clones
//!
//! `clone()` is shallow: the new instance shares every mapping and copies
//! only the cursor. Writes through any clone are visible through all of
//! them. `ThreadLocalBufferView` uses this to hand each thread its own
//! cursor over the same bytes.
//!
//! ## Durability
//!
//! - `force()` schedules write-back of every writable segment and returns
//!   without waiting (`msync(MS_ASYNC)` on unix).
//! - `sync()` blocks until every writable segment has been written back.
//!
//! ## Error Handling
//!
//! Construction failures (bad segment size, open/metadata/map failures)
//! return an `eyre` report with the file path as context; no partially
//! mapped buffer is ever returned. Access failures carry a `BufferError`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use eyre::{Result, WrapErr};
use memmap2::{Mmap, MmapMut, MmapOptions};
use parking_lot::RwLock;
use tracing::debug;

use super::error::check_range;
use super::{BufferError, BufferView, ByteOrder};
use crate::config::{DEFAULT_SEGMENT_SIZE, MAX_SEGMENT_SIZE, SEGMENT_WINDOW_FACTOR};

#[derive(Debug)]
enum SegmentMap {
    ReadOnly(Mmap),
    ReadWrite(RwLock<MmapMut>),
}

#[derive(Debug)]
struct Segment {
    map: SegmentMap,
    len: usize,
}

impl Segment {
    /// Copies as much of `dst` as this segment holds past `offset`.
    fn read(&self, offset: usize, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len - offset);
        match &self.map {
            SegmentMap::ReadOnly(map) => dst[..n].copy_from_slice(&map[offset..offset + n]),
            SegmentMap::ReadWrite(map) => {
                dst[..n].copy_from_slice(&map.read()[offset..offset + n]);
            }
        }
        n
    }

    fn write(&self, offset: usize, src: &[u8]) -> Result<usize> {
        match &self.map {
            SegmentMap::ReadOnly(_) => Err(BufferError::ReadOnly.into()),
            SegmentMap::ReadWrite(map) => {
                let n = src.len().min(self.len - offset);
                map.write()[offset..offset + n].copy_from_slice(&src[..n]);
                Ok(n)
            }
        }
    }

    fn flush(&self, blocking: bool) -> std::io::Result<()> {
        match &self.map {
            SegmentMap::ReadOnly(_) => Ok(()),
            SegmentMap::ReadWrite(map) if blocking => map.read().flush(),
            SegmentMap::ReadWrite(map) => map.read().flush_async(),
        }
    }

    #[cfg(unix)]
    fn advise_will_need(&self, offset: usize, len: usize) {
        let advise = |base: *const u8| {
            // SAFETY: madvise with MADV_WILLNEED is only a hint to the kernel.
            // The range is valid because:
            // 1. offset + len <= self.len, checked by the caller
            // 2. the start is rounded down to a page boundary, and memmap2 maps
            //    from the page boundary below the requested file offset, so the
            //    rounded address still lies inside this mapping
            unsafe {
                let addr = base.add(offset) as usize;
                let page = page_size();
                let aligned = addr - addr % page;
                libc::madvise(
                    aligned as *mut libc::c_void,
                    len + (addr - aligned),
                    libc::MADV_WILLNEED,
                );
            }
        };
        match &self.map {
            SegmentMap::ReadOnly(map) => advise(map.as_ptr()),
            SegmentMap::ReadWrite(map) => advise(map.read().as_ptr()),
        }
    }
}

#[cfg(unix)]
fn page_size() -> usize {
    // SAFETY: sysconf has no preconditions.
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 {
        size as usize
    } else {
        4096
    }
}

#[derive(Debug)]
struct MappedFile {
    path: PathBuf,
    file_size: u64,
    segment_size: u64,
    writable: bool,
    segments: Vec<Segment>,
}

/// A 64-bit addressable view over a memory-mapped file, split into
/// overlapping segments.
#[derive(Debug)]
pub struct SegmentedFileBuffer {
    shared: Arc<MappedFile>,
    byte_order: ByteOrder,
    position: AtomicU64,
}

impl SegmentedFileBuffer {
    pub fn builder<P: AsRef<Path>>(path: P) -> SegmentedFileBufferBuilder {
        SegmentedFileBufferBuilder::new(path)
    }

    /// Opens an existing file read-write with the default segment size.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder(path).open()
    }

    /// Opens an existing file read-only with the default segment size.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder(path).read_only().open()
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    pub fn segment_size(&self) -> u64 {
        self.shared.segment_size
    }

    pub fn segment_count(&self) -> usize {
        self.shared.segments.len()
    }

    /// Mapped length of segment `i`, or `None` past the last segment.
    pub fn segment_len(&self, i: usize) -> Option<usize> {
        self.shared.segments.get(i).map(|s| s.len)
    }

    /// Blocks until every writable segment has been written back.
    pub fn sync(&self) -> Result<()> {
        for (i, segment) in self.shared.segments.iter().enumerate() {
            segment.flush(true).wrap_err_with(|| {
                format!(
                    "failed to sync segment {} of '{}'",
                    i,
                    self.shared.path.display()
                )
            })?;
        }
        Ok(())
    }

    /// Hints the OS to page in `[idx, idx + len)`. No-op off unix.
    pub fn prefetch(&self, idx: u64, len: u64) -> Result<()> {
        check_range(idx, len, self.limit())?;

        #[cfg(unix)]
        {
            let end = idx + len;
            let mut idx = idx;
            while idx < end {
                let (seg, offset) = self.locate(idx);
                let segment = &self.shared.segments[seg];
                let n = ((end - idx).min((segment.len - offset) as u64)) as usize;
                segment.advise_will_need(offset, n);
                idx += n as u64;
            }
        }

        Ok(())
    }

    #[inline]
    fn locate(&self, idx: u64) -> (usize, usize) {
        let size = self.shared.segment_size;
        ((idx / size) as usize, (idx % size) as usize)
    }
}

impl Clone for SegmentedFileBuffer {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            byte_order: self.byte_order,
            position: AtomicU64::new(self.position.load(Ordering::Relaxed)),
        }
    }
}

impl BufferView for SegmentedFileBuffer {
    fn capacity(&self) -> u64 {
        self.shared.file_size
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    fn is_read_only(&self) -> bool {
        !self.shared.writable
    }

    fn get_bytes_into(&self, idx: u64, dst: &mut [u8]) -> Result<()> {
        check_range(idx, dst.len() as u64, self.limit())?;

        let mut idx = idx;
        let mut done = 0;
        while done < dst.len() {
            let (seg, offset) = self.locate(idx);
            let n = self.shared.segments[seg].read(offset, &mut dst[done..]);
            done += n;
            idx += n as u64;
        }
        Ok(())
    }

    fn put_bytes(&self, idx: u64, src: &[u8]) -> Result<()> {
        if !self.shared.writable {
            return Err(BufferError::ReadOnly.into());
        }
        check_range(idx, src.len() as u64, self.limit())?;

        let mut idx = idx;
        let mut done = 0;
        while done < src.len() {
            let (seg, offset) = self.locate(idx);
            let n = self.shared.segments[seg].write(offset, &src[done..])?;
            done += n;
            idx += n as u64;
        }
        Ok(())
    }

    fn force(&self) -> Result<()> {
        if !self.shared.writable {
            return Ok(());
        }
        debug!(
            path = %self.shared.path.display(),
            segments = self.shared.segments.len(),
            "requesting segment write-back"
        );
        for (i, segment) in self.shared.segments.iter().enumerate() {
            segment.flush(false).wrap_err_with(|| {
                format!(
                    "failed to schedule write-back of segment {} of '{}'",
                    i,
                    self.shared.path.display()
                )
            })?;
        }
        Ok(())
    }

    fn position(&self) -> u64 {
        self.position.load(Ordering::Relaxed)
    }

    fn set_position(&self, pos: u64) -> Result<()> {
        check_range(pos, 0, self.limit())?;
        self.position.store(pos, Ordering::Relaxed);
        Ok(())
    }
}

/// Configures and opens a `SegmentedFileBuffer`.
///
/// | Option       | Default                | Description                          |
/// |--------------|------------------------|--------------------------------------|
/// | segment_size | `DEFAULT_SEGMENT_SIZE` | Nominal segment width in bytes       |
/// | writable     | true                   | Map read-write instead of read-only  |
/// | byte_order   | `ByteOrder::Big`       | Order used by typed scalar accessors |
#[derive(Debug, Clone)]
pub struct SegmentedFileBufferBuilder {
    path: PathBuf,
    segment_size: u64,
    writable: bool,
    byte_order: ByteOrder,
}

impl SegmentedFileBufferBuilder {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            segment_size: DEFAULT_SEGMENT_SIZE,
            writable: true,
            byte_order: ByteOrder::default(),
        }
    }

    pub fn segment_size(mut self, segment_size: u64) -> Self {
        self.segment_size = segment_size;
        self
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn read_only(self) -> Self {
        self.writable(false)
    }

    pub fn byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Maps the existing file at the configured path.
    pub fn open(self) -> Result<SegmentedFileBuffer> {
        let segment_size = self.segment_size;
        if segment_size == 0 || segment_size > MAX_SEGMENT_SIZE {
            return Err(BufferError::InvalidSegmentSize {
                requested: segment_size,
                max: MAX_SEGMENT_SIZE,
            }
            .into());
        }

        let path = self.path;
        let file = OpenOptions::new()
            .read(true)
            .write(self.writable)
            .open(&path)
            .wrap_err_with(|| format!("failed to open buffer file '{}'", path.display()))?;

        let file_size = file
            .metadata()
            .wrap_err_with(|| format!("failed to get metadata for '{}'", path.display()))?
            .len();

        let segment_count = file_size.div_ceil(segment_size);
        let window = segment_size * SEGMENT_WINDOW_FACTOR;
        let mut segments = Vec::with_capacity(segment_count as usize);

        for i in 0..segment_count {
            let start = i * segment_size;
            let len = window.min(file_size - start) as usize;
            let mut options = MmapOptions::new();
            options.offset(start).len(len);

            // SAFETY: mapping a file is unsafe because the file may be modified
            // externally while mapped. This is acceptable because:
            // 1. start + len <= file_size, which was read from the open handle
            // 2. the buffer never resizes the file, so the window stays backed
            // 3. every access is bounds-checked against file_size before it
            //    touches a segment
            let map = if self.writable {
                let map = unsafe { options.map_mut(&file) }.wrap_err_with(|| {
                    format!(
                        "failed to memory-map segment {} ({} bytes at {}) of '{}'",
                        i,
                        len,
                        start,
                        path.display()
                    )
                })?;
                SegmentMap::ReadWrite(RwLock::new(map))
            } else {
                let map = unsafe { options.map(&file) }.wrap_err_with(|| {
                    format!(
                        "failed to memory-map segment {} ({} bytes at {}) of '{}'",
                        i,
                        len,
                        start,
                        path.display()
                    )
                })?;
                SegmentMap::ReadOnly(map)
            };

            segments.push(Segment { map, len });
        }

        drop(file);

        debug!(
            path = %path.display(),
            file_size,
            segment_size,
            segments = segments.len(),
            writable = self.writable,
            "mapped segmented file buffer"
        );

        Ok(SegmentedFileBuffer {
            shared: Arc::new(MappedFile {
                path,
                file_size,
                segment_size,
                writable: self.writable,
                segments,
            }),
            byte_order: self.byte_order,
            position: AtomicU64::new(0),
        })
    }

    /// Creates (or truncates) the file at `len` bytes, then maps it
    /// read-write.
    pub fn create(self, len: u64) -> Result<SegmentedFileBuffer> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
            .wrap_err_with(|| format!("failed to create buffer file '{}'", self.path.display()))?;

        file.set_len(len)
            .wrap_err_with(|| format!("failed to set file size to {} bytes", len))?;
        drop(file);

        self.writable(true).open()
    }
}
