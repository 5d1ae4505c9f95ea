//! Fuzz testing for the Base64 decoder.
//!
//! Feeds arbitrary bytes to every preset. Decoding must never panic, and
//! whatever decodes successfully must re-encode and decode to the same bytes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use segmap::base64::Base64Codec;

#[derive(Debug, Arbitrary, Clone, Copy)]
enum Preset {
    Standard,
    Pem,
    Mime,
    FilenameSafe,
}

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    preset: Preset,
    data: Vec<u8>,
}

fuzz_target!(|input: DecodeInput| {
    let codec = match input.preset {
        Preset::Standard => Base64Codec::STANDARD,
        Preset::Pem => Base64Codec::PEM,
        Preset::Mime => Base64Codec::MIME,
        Preset::FilenameSafe => Base64Codec::FILENAME_SAFE,
    };

    if let Ok(decoded) = codec.decode_to_vec(&input.data) {
        let encoded = codec.encode_to_vec(&decoded);
        let again = codec
            .decode_to_vec(&encoded)
            .expect("re-encoded output must decode");
        assert_eq!(again, decoded);
    }
});
