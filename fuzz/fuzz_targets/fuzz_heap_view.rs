//! Fuzz testing for view index arithmetic.
//!
//! Applies arbitrary reads and writes through an offset view over a heap
//! buffer and checks them against a plain Vec model. Out-of-range accesses
//! must fail without touching the model.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use segmap::buffer::{BufferView, HeapBuffer, OffsetBufferView};

#[derive(Debug, Arbitrary)]
struct ViewInput {
    capacity: u8,
    base: u8,
    operations: Vec<Operation>,
}

#[derive(Debug, Arbitrary)]
enum Operation {
    PutU32 { idx: u16, value: u32 },
    PutBytes { idx: u16, bytes: Vec<u8> },
    GetU64 { idx: u16 },
    GetBytes { idx: u16, len: u8 },
}

fuzz_target!(|input: ViewInput| {
    let capacity = input.capacity as usize;
    let base = input.base as usize;
    let buffer = HeapBuffer::new(capacity);
    let view = OffsetBufferView::new(buffer.clone(), base as u64);
    let mut model = vec![0u8; capacity];

    let fits = |idx: usize, len: usize| base + idx + len <= capacity;

    for op in input.operations {
        match op {
            Operation::PutU32 { idx, value } => {
                let idx = idx as usize;
                let ok = view.put_u32(idx as u64, value).is_ok();
                assert_eq!(ok, fits(idx, 4));
                if ok {
                    model[base + idx..base + idx + 4].copy_from_slice(&value.to_be_bytes());
                }
            }
            Operation::PutBytes { idx, bytes } => {
                let idx = idx as usize;
                let ok = view.put_bytes(idx as u64, &bytes).is_ok();
                assert_eq!(ok, fits(idx, bytes.len()));
                if ok {
                    model[base + idx..base + idx + bytes.len()].copy_from_slice(&bytes);
                }
            }
            Operation::GetU64 { idx } => {
                let idx = idx as usize;
                match view.get_u64(idx as u64) {
                    Ok(value) => {
                        let mut raw = [0u8; 8];
                        raw.copy_from_slice(&model[base + idx..base + idx + 8]);
                        assert_eq!(value, u64::from_be_bytes(raw));
                    }
                    Err(_) => assert!(!fits(idx, 8)),
                }
            }
            Operation::GetBytes { idx, len } => {
                let (idx, len) = (idx as usize, len as usize);
                match view.get_bytes(idx as u64, len) {
                    Ok(bytes) => assert_eq!(bytes, &model[base + idx..base + idx + len]),
                    Err(_) => assert!(!fits(idx, len)),
                }
            }
        }
    }

    assert_eq!(buffer.to_vec(), model);
});
