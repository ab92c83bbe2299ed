//! Property-based tests for the ASCII85 encoder

use draw2pdf::ascii85::{decode, encode, LINE_WIDTH};
use proptest::prelude::*;

// Inputs biased towards zero runs so the `z` shortcut gets exercised.
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..512),
        prop::collection::vec(prop_oneof![3 => Just(0u8), 1 => any::<u8>()], 0..256),
    ]
}

proptest! {
    #[test]
    fn test_round_trip(data in bytes_strategy()) {
        let encoded = encode(&data);
        prop_assert_eq!(decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_lines_never_exceed_width(data in bytes_strategy()) {
        let encoded = encode(&data);
        let text = std::str::from_utf8(&encoded).unwrap();
        prop_assert!(text.ends_with("~>\r\n"));
        for line in text.split("\r\n") {
            prop_assert!(line.len() <= LINE_WIDTH, "line of {} chars", line.len());
        }
    }

    #[test]
    fn test_output_is_printable(data in bytes_strategy()) {
        let encoded = encode(&data);
        let body = &encoded[..encoded.len() - 4];
        for &c in body {
            prop_assert!(c == b'\r' || c == b'\n' || (b'!'..=b'u').contains(&c) || c == b'z');
        }
    }

    #[test]
    fn test_z_only_for_full_zero_groups(data in bytes_strategy()) {
        let encoded = encode(&data);
        let expected = data
            .chunks_exact(4)
            .filter(|group| group.iter().all(|&b| b == 0))
            .count();
        let actual = encoded.iter().filter(|&&c| c == b'z').count();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_encoded_length(data in prop::collection::vec(1u8..=255, 0..300)) {
        // Without zero groups every full group is five digits and a partial
        // group of n bytes is n + 1 digits.
        let encoded = encode(&data);
        let digits = encoded[..encoded.len() - 4]
            .iter()
            .filter(|&&c| (b'!'..=b'u').contains(&c))
            .count();
        let rest = data.len() % 4;
        let expected = data.len() / 4 * 5 + if rest == 0 { 0 } else { rest + 1 };
        prop_assert_eq!(digits, expected);
    }
}

#[test]
fn test_terminator_placement() {
    // 56 bytes -> 70 digits; the terminator would end at column 72 exactly.
    let encoded = encode(&[1u8; 56]);
    let text = std::str::from_utf8(&encoded).unwrap();
    assert!(text.ends_with("~>\r\n"));
    assert!(!text.contains("\r\n~>"));

    // 60 bytes -> 75 digits: a full line of 72, then 3 more and the terminator.
    let encoded = encode(&[1u8; 60]);
    let text = std::str::from_utf8(&encoded).unwrap();
    let lines: Vec<&str> = text.split("\r\n").collect();
    assert_eq!(lines[0].len(), 72);
    assert_eq!(lines[1].len(), 5);
    assert!(lines[1].ends_with("~>"));
}
