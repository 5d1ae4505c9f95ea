//! # Base64 Codec Tests
//!
//! End-to-end behavior of the presets and the streaming entry points:
//! - RFC 4648 test vectors
//! - decode(encode(x)) == x for every preset
//! - typed decode errors vs. wrapped I/O failures
//! - streaming a buffer region through the codec

use std::io::{self, Read};

use proptest::prelude::*;
use segmap::base64::{Alphabet, Base64Codec, Base64Error};
use segmap::buffer::{BufferView, HeapBuffer, OffsetBufferView, ViewCursor};

const PRESETS: [Base64Codec; 4] = [
    Base64Codec::STANDARD,
    Base64Codec::PEM,
    Base64Codec::MIME,
    Base64Codec::FILENAME_SAFE,
];

#[test]
fn rfc4648_vectors() {
    let vectors: [(&str, &str, &str); 7] = [
        ("", "", ""),
        ("f", "Zg==", "Zg"),
        ("fo", "Zm8=", "Zm8"),
        ("foo", "Zm9v", "Zm9v"),
        ("foob", "Zm9vYg==", "Zm9vYg"),
        ("fooba", "Zm9vYmE=", "Zm9vYmE"),
        ("foobar", "Zm9vYmFy", "Zm9vYmFy"),
    ];

    for (plain, padded, unpadded) in vectors {
        assert_eq!(Base64Codec::STANDARD.encode_str(plain), padded);
        assert_eq!(Base64Codec::FILENAME_SAFE.encode_str(plain), unpadded);
        assert_eq!(Base64Codec::STANDARD.decode_to_string(padded).unwrap(), plain);
        assert_eq!(Base64Codec::FILENAME_SAFE.decode_to_string(unpadded).unwrap(), plain);
    }
}

#[test]
fn hello_examples() {
    assert_eq!(Base64Codec::STANDARD.encode_to_string(b"Hello"), "SGVsbG8=");
    assert_eq!(Base64Codec::STANDARD.decode_str("SGVsbG8=").unwrap(), b"Hello");
    assert_eq!(Base64Codec::FILENAME_SAFE.encode_to_string(&[0, 1, 2, 3, 4]), "AAECAwQ");
    assert_eq!(
        Base64Codec::FILENAME_SAFE.decode_str("AAECAwQ").unwrap(),
        vec![0, 1, 2, 3, 4]
    );
}

#[test]
fn invalid_source_byte_carries_value() {
    match Base64Codec::STANDARD.decode_str("SGVsbG8h!") {
        Err(Base64Error::InvalidSourceByte(byte)) => assert_eq!(byte, 0x21),
        other => panic!("expected InvalidSourceByte, got {:?}", other),
    }
}

#[test]
fn missing_symbols_with_padding_is_unexpected_end() {
    assert!(matches!(
        Base64Codec::STANDARD.decode_str("SGVsbG8"),
        Err(Base64Error::UnexpectedEndOfInput)
    ));
    assert!(matches!(
        Base64Codec::STANDARD.decode_str("SGVsbG8h"),
        Ok(ref bytes) if bytes == b"Hello!"
    ));
}

#[test]
fn mime_output_decodes_with_any_whitespace_layout() {
    let data: Vec<u8> = (0..500u32).map(|i| (i * 7) as u8).collect();
    let encoded = Base64Codec::MIME.encode_to_string(&data);
    assert!(encoded.split("\r\n").all(|line| line.len() <= 76));

    let reflowed = encoded.replace("\r\n", "").replace('A', " A\n");

    assert_eq!(Base64Codec::STANDARD.decode_str(&reflowed).unwrap(), data);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "source went away"))
    }
}

#[test]
fn io_failure_is_wrapped_with_cause() {
    let mut out = Vec::new();

    let err = Base64Codec::STANDARD
        .encode(FailingReader, &mut out)
        .unwrap_err();

    match err {
        Base64Error::Io(cause) => assert_eq!(cause.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected Io, got {:?}", other),
    }
    assert!(Base64Codec::STANDARD.decode(FailingReader, &mut out).is_err());
}

#[test]
fn custom_alphabet_round_trip() {
    let mut symbols = *Alphabet::STANDARD.symbols();
    symbols.reverse();
    let codec = Base64Codec::builder()
        .alphabet(Alphabet::new(&symbols).unwrap())
        .padding(Some(b'*'))
        .build()
        .unwrap();

    let encoded = codec.encode_to_string(b"any carnal pleas");

    assert!(encoded.ends_with('*'));
    assert_eq!(codec.decode_str(&encoded).unwrap(), b"any carnal pleas");
}

#[test]
fn buffer_region_streams_through_codec() {
    let buffer = HeapBuffer::new(64);
    buffer.put_bytes(16, b"segment payload!").unwrap();
    let region = OffsetBufferView::new(buffer.clone(), 16);
    region.set_position(0).unwrap();
    let mut limited = ViewCursor::new(region).take(16);

    let mut encoded = Vec::new();
    Base64Codec::STANDARD.encode(&mut limited, &mut encoded).unwrap();

    let target = OffsetBufferView::new(buffer.clone(), 40);
    target.set_position(0).unwrap();
    Base64Codec::STANDARD
        .decode(&encoded[..], ViewCursor::new(target))
        .unwrap();

    assert_eq!(buffer.get_bytes(40, 16).unwrap(), b"segment payload!");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_decode_inverts_encode(data in proptest::collection::vec(any::<u8>(), 0..400)) {
        for codec in &PRESETS {
            let encoded = codec.encode_to_vec(&data);
            prop_assert_eq!(codec.decode_to_vec(&encoded).unwrap(), data.clone());
        }
    }

    #[test]
    fn prop_padded_encode_inverts_decode(data in proptest::collection::vec(any::<u8>(), 0..200)) {
        let encoded = Base64Codec::PEM.encode_to_vec(&data);
        let decoded = Base64Codec::PEM.decode_to_vec(&encoded).unwrap();

        prop_assert_eq!(Base64Codec::PEM.encode_to_vec(&decoded), encoded);
    }

    #[test]
    fn prop_stream_matches_slice(data in proptest::collection::vec(any::<u8>(), 0..300)) {
        for codec in &PRESETS {
            let mut streamed = Vec::new();
            codec.encode(&data[..], &mut streamed).unwrap();
            prop_assert_eq!(&streamed, &codec.encode_to_vec(&data));
        }
    }
}
