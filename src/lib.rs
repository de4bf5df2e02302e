//! Convert byte strings between character encodings through the system
//! `iconv(3)`, with three reserved source names that guess the encoding:
//!
//! ```no_run
//! let utf8 = transcoder::convert("UTF-8", "autodetect_jp", b"\x82\xb1\x82\xf1").unwrap();
//! assert_eq!(String::from_utf8(utf8).unwrap(), "こん");
//! ```

mod detect;
mod engine;
mod error;
mod system;
mod transcoder;

pub use crate::detect::Autodetect;
pub use crate::engine::{CodecEngine, ConversionContext, Status, Step};
pub use crate::error::{Error, Result};
pub use crate::system::{SystemContext, SystemEngine};
pub use crate::transcoder::{Transcoder, SCRATCH_SIZE};

/// convert `input` from `from` to `to` with the system engine
pub fn convert(to: &str, from: &str, input: &[u8]) -> Result<Vec<u8>> {
    Transcoder::system().convert(to, from, input)
}

/// length in bytes of what [`convert`] would return
pub fn converted_len(to: &str, from: &str, input: &[u8]) -> Result<usize> {
    Transcoder::system().converted_len(to, from, input)
}

#[cfg(test)]
mod tests {
    use super::{convert, converted_len, Error};
    use proptest::prelude::*;

    const SJIS_HELLO: &[u8] = b"\x82\xb1\x82\xf1\x82\xc9\x82\xbf\x82\xed\x90\xa2\x8a\x45";

    #[test]
    fn test_cp932_to_utf8() {
        let out = convert("UTF-8", "CP932", SJIS_HELLO).unwrap();
        assert_eq!(out, "こんにちわ世界".as_bytes());
    }

    #[test]
    fn test_flush_bytes_are_counted() {
        assert_eq!(converted_len("ISO-2022-JP", "EUC-JP", b"\xB4\xC1").unwrap(), 8);
        assert_eq!(convert("ISO-2022-JP", "EUC-JP", b"\xB4\xC1").unwrap(), b"\x1b$B4A\x1b(B");
    }

    #[test]
    fn test_empty_input() {
        assert!(convert("UTF-16LE", "UTF-8", b"").unwrap().is_empty());
        assert!(convert("ISO-2022-JP", "EUC-JP", b"").unwrap().is_empty());
        assert_eq!(converted_len("UTF-8", "autodetect_kr", b"").unwrap(), 0);
    }

    #[test]
    fn test_larger_than_scratch() {
        let input = "€".repeat(5000);
        let utf16 = convert("UTF-16LE", "UTF-8", input.as_bytes()).unwrap();
        assert_eq!(utf16.len(), 10000);
        assert_eq!(&utf16[..2], b"\xAC\x20");
        let back = convert("UTF-8", "UTF-16LE", &utf16).unwrap();
        assert_eq!(back, input.as_bytes());
    }

    #[test]
    fn test_autodetect_utf8_keeps_valid_utf8() {
        assert_eq!(convert("UTF-8", "autodetect_utf8", b"\xE2\x82\xAC").unwrap(), b"\xE2\x82\xAC");
        assert_eq!(convert("UTF-16LE", "autodetect_utf8", b"\xE2\x82\xAC").unwrap(), b"\xAC\x20");
    }

    #[test]
    fn test_autodetect_utf8_falls_back_to_latin1() {
        assert_eq!(convert("UTF-8", "autodetect_utf8", b"\x80").unwrap(), b"\xC2\x80");
        assert_eq!(convert("UTF-8", "autodetect_utf8", b"caf\xE9 au lait").unwrap(), "café au lait".as_bytes());
    }

    #[test]
    fn test_autodetect_falls_back_when_target_lacks_character() {
        // the euro sign has no ISO-8859-1 code, so the UTF-8 trial is rejected
        assert_eq!(convert("ISO-8859-1", "autodetect_utf8", b"\xE2\x82\xAC").unwrap(), b"\xE2\x82\xAC");
    }

    #[test]
    fn test_autodetect_jp() {
        let out = convert("UTF-8", "autodetect_jp", SJIS_HELLO).unwrap();
        assert_eq!(out, "こんにちわ世界".as_bytes());
        assert_eq!(convert("UTF-8", "autodetect_jp", b"\xB4\xC1").unwrap(), "漢".as_bytes());
        assert_eq!(convert("UTF-8", "autodetect_jp", b"\x1b$B4A\x1b(B").unwrap(), "漢".as_bytes());
    }

    #[test]
    fn test_autodetect_kr() {
        assert_eq!(convert("UTF-8", "autodetect_kr", b"\xC7\xD1").unwrap(), "한".as_bytes());
        assert_eq!(convert("UTF-8", "autodetect_kr", b"plain").unwrap(), b"plain");
    }

    #[test]
    fn test_unsupported() {
        assert!(convert("NOT-A-REAL-ENCODING", "UTF-8", b"abc").unwrap_err().is_unsupported());
        assert!(convert("UTF-8", "NOT-A-REAL-ENCODING", b"abc").unwrap_err().is_unsupported());
        assert!(converted_len("UTF-8", "autodetect_xx", b"abc").unwrap_err().is_unsupported());
    }

    #[test]
    fn test_invalid_sequence() {
        match convert("UTF-16LE", "UTF-8", b"ab\xFFcd") {
            Err(Error::InvalidSequence { encoding, offset }) => {
                assert_eq!(encoding, "UTF-8");
                assert_eq!(offset, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_truncated_tail_dropped() {
        assert_eq!(convert("UTF-16LE", "UTF-8", b"a\xE2\x82").unwrap(), b"a\x00");
        assert_eq!(converted_len("UTF-16LE", "UTF-8", b"a\xE2\x82").unwrap(), 2);
        assert!(convert("UTF-8", "UTF-8", b"\xE2\x82").unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_utf16_round_trip(s in "\\PC{0,300}") {
            let len = converted_len("UTF-16LE", "UTF-8", s.as_bytes()).unwrap();
            let utf16 = convert("UTF-16LE", "UTF-8", s.as_bytes()).unwrap();
            prop_assert_eq!(len, utf16.len());
            let back = convert("UTF-8", "UTF-16LE", &utf16).unwrap();
            prop_assert_eq!(back, s.as_bytes());
        }

        #[test]
        fn prop_autodetect_utf8_never_fails(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
            let out = convert("UTF-8", "autodetect_utf8", &bytes).unwrap();
            prop_assert_eq!(converted_len("UTF-8", "autodetect_utf8", &bytes).unwrap(), out.len());
            if std::str::from_utf8(&bytes).is_ok() {
                prop_assert_eq!(out, bytes);
            }
        }
    }
}
