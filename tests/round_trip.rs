//! Property tests for the encoder and decoder.

mod common;

use bsdvis::charset::{CharSet, VIS_DQ, VIS_SHELL};
use bsdvis::decode::decode_bytes;
use bsdvis::encode::encode_to_chars_with;
use bsdvis::{decode_to_vec, encode_bytes_with, encode_to_vec, encoded_len};
use common::{init_test_logging, proptest_config};
use proptest::prelude::*;

fn arb_charset() -> impl Strategy<Value = CharSet> {
    prop::collection::vec(0_u8..0x80, 0..32)
        .prop_map(|bytes| CharSet::from_bytes(&bytes).unwrap())
}

/// Sets that escape `\`. Without it, literal text such as `\101` decodes
/// to something else.
fn arb_reversible_charset() -> impl Strategy<Value = CharSet> {
    arb_charset().prop_map(|set| set.with(b'\\').unwrap())
}

/// Bytes weighted towards backslashes and octal digits, so that literal
/// text resembling escapes shows up often.
fn arb_tricky_bytes() -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        3 => Just(b'\\'),
        3 => b'0'..=b'9',
        1 => any::<u8>(),
    ];
    prop::collection::vec(byte, 0..64)
}

proptest! {
    #![proptest_config(proptest_config(512))]

    #[test]
    fn round_trip_default(input in prop::collection::vec(any::<u8>(), 0..256)) {
        init_test_logging();
        let encoded = encode_to_vec(&input, None).unwrap();
        prop_assert_eq!(decode_to_vec(&encoded).unwrap(), input);
    }

    #[test]
    fn round_trip_custom(
        input in arb_tricky_bytes(),
        set in arb_reversible_charset(),
    ) {
        let encoded = encode_to_vec(&input, Some(&set)).unwrap();
        prop_assert_eq!(decode_to_vec(&encoded).unwrap(), input);
    }

    #[test]
    fn output_is_printable(input in any::<Vec<u8>>(), set in arb_charset()) {
        let encoded = encode_to_vec(&input, Some(&set)).unwrap();
        prop_assert!(encoded.iter().all(|&b| b == b' ' || b.is_ascii_graphic()));
        prop_assert!(encoded.len() >= input.len());
        prop_assert_eq!(Some(encoded.len()), encoded_len(&input, Some(&set)));
    }

    #[test]
    fn decode_without_escapes_is_identity(
        input in prop::collection::vec(any::<u8>(), 0..128)
            .prop_filter("no backslash", |v| !v.contains(&b'\\'))
    ) {
        prop_assert_eq!(decode_to_vec(&input).unwrap(), input);
    }

    #[test]
    fn decode_never_lengthens(input in arb_tricky_bytes()) {
        let decoded = decode_to_vec(&input).unwrap();
        prop_assert!(decoded.len() <= input.len());
    }

    #[test]
    fn round_trip_without_escape_lookalikes(
        input in prop::collection::vec(any::<u8>(), 0..128)
            .prop_filter("no backslash", |v| !v.contains(&b'\\')),
        set in arb_charset(),
    ) {
        let encoded = encode_to_vec(&input, Some(&set)).unwrap();
        prop_assert_eq!(decode_to_vec(&encoded).unwrap(), input);
    }

    #[test]
    fn streaming_matches_buffer(
        input in arb_tricky_bytes(),
        set in arb_charset(),
    ) {
        let encoded = encode_to_vec(&input, Some(&set)).unwrap();
        let streamed: Vec<u8> =
            encode_bytes_with(input.iter().copied(), &set).collect();
        prop_assert_eq!(&streamed, &encoded);

        let chars: String =
            encode_to_chars_with(input.iter().copied(), &set).collect();
        prop_assert_eq!(chars.as_bytes(), &encoded[..]);

        let decoded: Vec<u8> = decode_bytes(input.iter().copied()).collect();
        prop_assert_eq!(decoded, decode_to_vec(&input).unwrap());
    }
}

#[test]
fn special_inputs_round_trip() {
    init_test_logging();
    let inputs: [Vec<u8>; 5] = [
        Vec::new(),
        vec![0; 32],
        (0x80..=0xff).collect(),
        b"\\\\101\\12\\".to_vec(),
        (0..=255).collect(),
    ];
    let sets = [
        CharSet::DEFAULT,
        VIS_SHELL,
        VIS_DQ.with(b'\\').unwrap(),
    ];
    for input in &inputs {
        for set in &sets {
            let encoded = encode_to_vec(input, Some(set)).unwrap();
            assert_eq!(&decode_to_vec(&encoded).unwrap(), input);
        }
    }
}

#[test]
fn literal_backslash_without_escape_in_set() {
    // A backslash outside the set is written as-is, and the decoder copies a
    // backslash through when it isn't followed by three octal digits.
    let input = b"C:\\dir\\9\\";
    let encoded = encode_to_vec(input, Some(&CharSet::EMPTY)).unwrap();
    assert_eq!(encoded, input);
    assert_eq!(decode_to_vec(&encoded).unwrap(), input);

    // A literal backslash followed by three octal digits is indistinguishable
    // from an escape.
    let encoded = encode_to_vec(b"\\101", Some(&CharSet::EMPTY)).unwrap();
    assert_eq!(encoded, b"\\101");
    assert_eq!(decode_to_vec(&encoded).unwrap(), b"A");

    // The default set escapes backslashes, so the same input survives.
    let encoded = encode_to_vec(b"\\101", None).unwrap();
    assert_eq!(encoded, b"\\134101");
    assert_eq!(decode_to_vec(&encoded).unwrap(), b"\\101");
}

#[test]
fn escape_bijection() {
    for v in 0..=255_u8 {
        let escaped = format!("\\{:03o}", v);
        assert_eq!(decode_to_vec(escaped.as_bytes()).unwrap(), [v]);
        assert_eq!(
            encode_to_vec(&[v], Some(&CharSet::EMPTY)).unwrap().len(),
            if v == b' ' || v.is_ascii_graphic() { 1 } else { 4 },
        );
    }
}
