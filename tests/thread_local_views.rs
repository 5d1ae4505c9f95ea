//! # Thread-Local View Tests
//!
//! Checks the per-thread clone contract over a file-backed buffer:
//! - each thread gets its own instance, distinct from the prototype
//! - all instances see the same bytes
//! - cursors move independently per thread
//! - offset views compose with thread-local dispatch

use std::io::{Read, Write};
use std::sync::{Arc, Barrier};
use std::thread;

use segmap::buffer::{
    BufferView, OffsetBufferView, SegmentedFileBuffer, ThreadLocalBufferView,
    ThreadLocalOffsetView, ViewCursor,
};
use tempfile::{tempdir, TempDir};

fn shared_buffer(len: u64) -> (TempDir, ThreadLocalBufferView<SegmentedFileBuffer>) {
    let dir = tempdir().unwrap();
    let buffer = SegmentedFileBuffer::builder(dir.path().join("shared.bin"))
        .segment_size(256)
        .create(len)
        .unwrap();
    (dir, ThreadLocalBufferView::new(buffer))
}

#[test]
fn distinct_instances_observe_each_others_writes() {
    let (_dir, view) = shared_buffer(1024);
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = (0..2u64)
        .map(|t| {
            let view = view.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mine = view.get();
                mine.put_u64(t * 8, 100 + t).unwrap();
                barrier.wait();
                let other = mine.get_u64((1 - t) * 8).unwrap();
                (mine, other)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(!Arc::ptr_eq(&results[0].0, &results[1].0));
    for (buffer, _) in &results {
        assert!(!std::ptr::eq(&**buffer, view.prototype()));
    }
    assert_eq!(results[0].1, 101);
    assert_eq!(results[1].1, 100);
    assert_eq!(view.prototype().get_u64(0).unwrap(), 100);
}

#[test]
fn sequential_streams_do_not_share_a_cursor() {
    let (_dir, view) = shared_buffer(8 * 1024);
    let threads = 4u64;
    let chunk = 2048u64;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let view = view.clone();
            thread::spawn(move || {
                view.set_position(t * chunk).unwrap();
                let mut cursor = ViewCursor::new(view.clone());
                let payload = vec![t as u8 + 1; chunk as usize];
                for piece in payload.chunks(100) {
                    cursor.write_all(piece).unwrap();
                }
                view.position()
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), (t as u64 + 1) * chunk);
    }

    let prototype = view.prototype();
    for t in 0..threads {
        let bytes = prototype.get_bytes(t * chunk, chunk as usize).unwrap();
        assert!(bytes.iter().all(|&b| b == t as u8 + 1));
    }
    assert_eq!(view.thread_count(), threads as usize);
}

#[test]
fn offset_over_thread_local_rebases_each_threads_cursor() {
    let (_dir, view) = shared_buffer(512);
    let region: ThreadLocalOffsetView<SegmentedFileBuffer> = OffsetBufferView::new(view.clone(), 300);

    assert_eq!(region.capacity(), 212);
    region.put_u32(0, 7).unwrap();
    assert_eq!(view.prototype().get_u32(300).unwrap(), 7);

    let seen = {
        let region = region.clone();
        thread::spawn(move || {
            let mut cursor = ViewCursor::new(region.clone());
            let mut word = [0u8; 4];
            cursor.read_exact(&mut word).unwrap();
            (u32::from_be_bytes(word), region.position())
        })
        .join()
        .unwrap()
    };

    assert_eq!(seen, (7, 4));
    assert_eq!(region.position(), 0);
}

#[test]
fn offset_over_thread_handle() {
    let (_dir, view) = shared_buffer(64);
    let handle = view.get();
    let offset = OffsetBufferView::new(Arc::clone(&handle), 32);

    offset.put_u16(0, 0xFEED).unwrap();

    assert_eq!(handle.get_u16(32).unwrap(), 0xFEED);
}
