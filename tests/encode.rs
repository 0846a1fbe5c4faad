//! Tests for encoding.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use proptest::prelude::*;
use websafe64::{encode_to_bytes, encode_to_chars, encode_to_slice};
use websafe64::{encode_to_string, encoded_capacity, encoded_len};
use websafe64::{ALPHABET, PAD};

#[test]
fn empty_input() {
    assert_eq!(encode_to_string(""), "");
    assert_eq!(encode_to_bytes(Vec::new()).count(), 0);
    let mut buf = [0; 1];
    assert_eq!(encode_to_slice(b"", &mut buf), Ok(0));
}

#[test]
fn one_two_three_bytes() {
    assert_eq!(encode_to_string("f"), "Zg..");
    assert_eq!(encode_to_string("fo"), "Zm8.");
    assert_eq!(encode_to_string("foo"), "Zm9v");
    assert_eq!(encode_to_string("foob"), "Zm9vYg..");
    assert_eq!(encode_to_string("fooba"), "Zm9vYmE.");
    assert_eq!(encode_to_string("foobar"), "Zm9vYmFy");
}

#[test]
fn substituted_symbols() {
    assert_eq!(encode_to_string([0xfb, 0xff]), "-_8.");
    assert_eq!(encode_to_string([0xff; 3]), "____");
    assert_eq!(encode_to_string([0xf8]), "-A..");
}

#[test]
fn alphabet_order() {
    // Each group of three bytes below holds four consecutive 6-bit values.
    let bytes: Vec<u8> = (0..16_u32)
        .flat_map(|i| {
            let n = ((4 * i) << 18)
                | ((4 * i + 1) << 12)
                | ((4 * i + 2) << 6)
                | (4 * i + 3);
            let [_, a, b, c] = n.to_be_bytes();
            [a, b, c]
        })
        .collect();
    assert_eq!(encode_to_string(&bytes).as_bytes(), &ALPHABET[..]);
}

#[test]
fn slice_exact_and_capacity() {
    let mut exact = [0; 8];
    assert_eq!(encode_to_slice(b"hello", &mut exact), Ok(8));
    assert_eq!(&exact, b"aGVsbG8.");

    let mut buf = [b'x'; encoded_capacity(5)];
    assert_eq!(encode_to_slice(b"hello", &mut buf), Ok(8));
    assert_eq!(&buf, b"aGVsbG8.x");
}

#[test]
fn slice_too_small() {
    let mut buf = [0; 3];
    let err = encode_to_slice(b"a", &mut buf).unwrap_err();
    assert_eq!((err.needed, err.actual), (4, 3));
    assert_eq!(
        err.to_string(),
        "destination too small: need 4 bytes, got 3",
    );
}

#[test]
fn chars_match_bytes() {
    let s: String = encode_to_chars(*b"hello world").collect();
    assert_eq!(s, "aGVsbG8gd29ybGQ.");
}

#[test]
fn lazy_input() {
    let mut pulled = 0;
    let mut enc = encode_to_bytes((0..10_u8).inspect(|_| pulled += 1));
    enc.next();
    drop(enc);
    assert_eq!(pulled, 3);
}

proptest! {
    #[test]
    fn matches_reference(bytes in prop::collection::vec(any::<u8>(), 0..300)) {
        let expected = URL_SAFE.encode(&bytes).replace('=', ".");
        prop_assert_eq!(encode_to_string(&bytes), expected);
    }

    #[test]
    fn length_law(bytes in prop::collection::vec(any::<u8>(), 0..300)) {
        let encoded = encode_to_string(&bytes);
        prop_assert_eq!(encoded.len(), encoded_len(bytes.len()));
        prop_assert_eq!(encoded.len() % 4, 0);
        prop_assert_eq!(encoded.is_empty(), bytes.is_empty());
    }

    #[test]
    fn alphabet_closure(bytes in prop::collection::vec(any::<u8>(), 0..300)) {
        let encoded = encode_to_string(&bytes);
        prop_assert!(encoded
            .bytes()
            .all(|c| ALPHABET.contains(&c) || c == PAD));
        let data = encoded.trim_end_matches(char::from(PAD));
        prop_assert!(!data.contains(char::from(PAD)));
        prop_assert!(encoded.len() - data.len() <= 2);
    }

    #[test]
    fn iterator_matches_slice(
        bytes in prop::collection::vec(any::<u8>(), 0..300)
    ) {
        let mut buf = vec![0; encoded_capacity(bytes.len())];
        let len = encode_to_slice(&bytes, &mut buf).unwrap();
        let enc = encode_to_bytes(bytes.iter().copied());
        prop_assert_eq!(enc.size_hint(), (len, Some(len)));
        prop_assert_eq!(enc.collect::<Vec<u8>>(), &buf[..len]);
    }
}
