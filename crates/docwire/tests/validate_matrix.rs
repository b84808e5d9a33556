//! Structural validation: framing, terminators, element names and payload sizes.

use docwire::{is_valid, validate, validate_with, BsonError, CodecOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EMPTY: [u8; 5] = [0x05, 0x00, 0x00, 0x00, 0x00];

fn frame(elements: &[u8]) -> Vec<u8> {
    let len = (elements.len() + 5) as i32;
    let mut out = len.to_le_bytes().to_vec();
    out.extend_from_slice(elements);
    out.push(0x00);
    out
}

fn element(tag: u8, name: &str, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend_from_slice(name.as_bytes());
    out.push(0x00);
    out.extend_from_slice(payload);
    out
}

fn int32(name: &str, value: i32) -> Vec<u8> {
    element(0x10, name, &value.to_le_bytes())
}

// ---------------------------------------------------------------------------
// Framing
// ---------------------------------------------------------------------------

#[test]
fn basic_validation() {
    assert!(!is_valid(b"test"));
    assert!(is_valid(&EMPTY));
    assert!(!is_valid(&[0x04, 0x00, 0x00, 0x00, 0x00]));
    assert!(!is_valid(&[0x05, 0x00, 0x00, 0x00, 0x01]));
    assert!(!is_valid(&[0x05, 0x00, 0x00, 0x00]));
    assert!(!is_valid(&[0x05, 0x00, 0x00, 0x00, 0x00, 0x00]));
}

#[test]
fn every_truncation_is_invalid() {
    let mike = frame(&int32("mike", 100));
    assert!(is_valid(&mike));
    for buf in [&EMPTY[..], &mike[..]] {
        for len in 0..buf.len() {
            assert!(!is_valid(&buf[..len]), "prefix of length {len} validated");
        }
    }
}

#[test]
fn trailing_garbage_is_invalid() {
    let mike = frame(&int32("mike", 100));
    for extra in [0x00u8, 0x01, 0x05, 0xFF] {
        for base in [EMPTY.to_vec(), mike.clone()] {
            let mut buf = base;
            buf.push(extra);
            assert_eq!(
                validate(&buf),
                Err(BsonError::MalformedBuffer("trailing bytes after document"))
            );
        }
    }
}

#[test]
fn corrupt_terminator_is_invalid() {
    let mike = frame(&int32("mike", 100));
    for byte in 1..=0xFFu8 {
        for base in [EMPTY.to_vec(), mike.clone()] {
            let mut buf = base;
            let last = buf.len() - 1;
            buf[last] = byte;
            assert!(!is_valid(&buf), "terminator 0x{byte:02x} validated");
        }
    }
}

#[test]
fn declared_length_must_reach_terminator() {
    // Declared length stops one byte short: the int32 payload's last byte is
    // taken for the terminator.
    let mut buf = frame(&int32("a", 0x0100_0000));
    buf[0] -= 1;
    buf.pop();
    assert!(!is_valid(&buf));

    let huge = [0xFF, 0xFF, 0xFF, 0x7F, 0x00];
    assert_eq!(
        validate(&huge),
        Err(BsonError::MalformedBuffer("document length exceeds buffer"))
    );
}

#[test]
fn unterminated_name_is_invalid() {
    // The only NUL after the name is the document terminator, which does not
    // belong to the element bytes.
    assert_eq!(
        validate(&[0x07, 0x00, 0x00, 0x00, 0x10, b'a', 0x00]),
        Err(BsonError::MalformedBuffer("unterminated C-string"))
    );
}

#[test]
fn name_must_be_utf8() {
    let buf = frame(&element(0x0A, "", &[]));
    assert!(is_valid(&buf));
    let mut bad = frame(&[0x0A, 0xC3, 0x28, 0x00]);
    assert_eq!(validate(&bad), Err(BsonError::InvalidUtf8));
    bad[5] = 0xA9;
    assert!(!is_valid(&bad));
}

// ---------------------------------------------------------------------------
// Tags and payloads
// ---------------------------------------------------------------------------

#[test]
fn unknown_tags_are_invalid() {
    for tag in [0x00u8, 0x0F, 0x11, 0x12, 0x13, 0x7F, 0xFF] {
        let buf = frame(&element(tag, "a", &[]));
        assert_eq!(validate(&buf), Err(BsonError::UnsupportedType(tag)));
    }
}

#[test]
fn fixed_size_payloads_must_be_complete() {
    let cases: [(u8, usize); 5] = [(0x01, 8), (0x07, 12), (0x08, 1), (0x09, 8), (0x10, 4)];
    for (tag, size) in cases {
        let full = frame(&element(tag, "x", &vec![0u8; size]));
        assert!(is_valid(&full), "tag 0x{tag:02x} with full payload");
        let short = frame(&element(tag, "x", &vec![0u8; size - 1]));
        assert!(!is_valid(&short), "tag 0x{tag:02x} with short payload");
        let long = frame(&element(tag, "x", &vec![0u8; size + 1]));
        assert!(!is_valid(&long), "tag 0x{tag:02x} with long payload");
    }
}

#[test]
fn string_like_payloads() {
    for tag in [0x02u8, 0x0D, 0x0E] {
        let ok = frame(&element(tag, "s", &[3, 0, 0, 0, b'h', b'i', 0]));
        assert!(is_valid(&ok));
        // Declared length overruns the element bytes.
        let overrun = frame(&element(tag, "s", &[9, 0, 0, 0, b'h', b'i', 0]));
        assert!(!is_valid(&overrun));
        // Last counted byte is not NUL.
        let unterminated = frame(&element(tag, "s", &[2, 0, 0, 0, b'h', b'i', 0]));
        assert!(!is_valid(&unterminated));
        let negative = frame(&element(tag, "s", &[0xFF, 0xFF, 0xFF, 0xFF, 0]));
        assert!(!is_valid(&negative));
    }
}

#[test]
fn binary_payload_is_length_prefixed() {
    assert!(is_valid(&frame(&element(0x05, "b", &[3, 0, 0, 0, 1, 2, 3]))));
    assert!(is_valid(&frame(&element(0x05, "b", &[0, 0, 0, 0]))));
    assert!(!is_valid(&frame(&element(0x05, "b", &[4, 0, 0, 0, 1, 2, 3]))));
    assert_eq!(
        validate(&frame(&element(0x05, "b", &[0xFE, 0xFF, 0xFF, 0xFF]))),
        Err(BsonError::MalformedBuffer("negative binary length"))
    );
}

#[test]
fn regex_and_dbpointer_payloads() {
    assert!(is_valid(&frame(&element(0x0B, "re", b"^a.*\0i\0"))));
    assert!(!is_valid(&frame(&element(0x0B, "re", b"^a.*\0i"))));

    let mut pointer = b"db.users\0".to_vec();
    pointer.extend_from_slice(&[7u8; 12]);
    assert!(is_valid(&frame(&element(0x0C, "ref", &pointer))));
    pointer.pop();
    assert!(!is_valid(&frame(&element(0x0C, "ref", &pointer))));
}

// ---------------------------------------------------------------------------
// Nesting and array keys
// ---------------------------------------------------------------------------

#[test]
fn embedded_documents_use_their_own_framing() {
    let inner = frame(&int32("x", 1));
    assert!(is_valid(&frame(&element(0x03, "obj", &inner))));

    let mut bad_inner = inner.clone();
    let last = bad_inner.len() - 1;
    bad_inner[last] = 0x01;
    assert!(!is_valid(&frame(&element(0x03, "obj", &bad_inner))));

    // Inner document claims more bytes than the outer element holds.
    let mut long_inner = inner;
    long_inner[0] += 1;
    assert!(!is_valid(&frame(&element(0x03, "obj", &long_inner))));
}

#[test]
fn array_keys_must_be_digits() {
    let ok = frame(&[int32("0", 1), int32("1", 2)].concat());
    assert!(is_valid(&frame(&element(0x04, "a", &ok))));

    let named = frame(&int32("x", 1));
    assert_eq!(
        validate(&frame(&element(0x04, "a", &named))),
        Err(BsonError::MalformedBuffer("array key is not a decimal index"))
    );
    let empty_key = frame(&int32("", 1));
    assert!(!is_valid(&frame(&element(0x04, "a", &empty_key))));

    // The same keys are fine in an object.
    assert!(is_valid(&frame(&element(0x03, "o", &named))));
}

#[test]
fn array_numbering_is_not_checked() {
    let gappy = frame(&[int32("0", 1), int32("2", 3), int32("07", 7)].concat());
    assert!(is_valid(&frame(&element(0x04, "a", &gappy))));
}

#[test]
fn nesting_depth_is_bounded() {
    let mut buf = EMPTY.to_vec();
    for _ in 0..101 {
        buf = frame(&element(0x03, "n", &buf));
    }
    assert_eq!(validate(&buf), Err(BsonError::DepthLimitExceeded(100)));
    assert!(!is_valid(&buf));
    assert_eq!(validate_with(&buf, &CodecOptions::with_max_depth(101)), Ok(()));
}

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

#[test]
fn random_data_is_not_bson() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut accepted = 0usize;
    for len in 0..100 {
        for _ in 0..20 {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            if is_valid(&data) {
                accepted += 1;
            }
        }
    }
    // A structural coincidence is possible in principle, just vanishingly rare.
    assert!(accepted <= 1, "{accepted} random buffers validated");
}
