use crate::domain::error::{TtyDbgError, TtyDbgResult};

/// How the payload text is turned into bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    /// Verbatim bytes of the text
    #[default]
    Utf8Bytes,
    /// Text is a string of hex digits, two per byte
    Hex,
}

/// Outgoing payload as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePayload {
    raw_text: String,
    encoding: PayloadEncoding,
}

/// Bytes ready for transmission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBytes(Vec<u8>);

impl WritePayload {
    pub fn new(raw_text: impl Into<String>, encoding: PayloadEncoding) -> Self {
        Self {
            raw_text: raw_text.into(),
            encoding,
        }
    }

    pub fn text(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, PayloadEncoding::Utf8Bytes)
    }

    pub fn hex(raw_text: impl Into<String>) -> Self {
        Self::new(raw_text, PayloadEncoding::Hex)
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn encoding(&self) -> PayloadEncoding {
        self.encoding
    }

    pub fn encode(&self) -> TtyDbgResult<EncodedBytes> {
        let bytes = match self.encoding {
            PayloadEncoding::Utf8Bytes => self.raw_text.as_bytes().to_vec(),
            PayloadEncoding::Hex => decode_hex(&self.raw_text)?,
        };
        Ok(EncodedBytes(bytes))
    }
}

impl EncodedBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Decode every hex digit pair of `text` into a byte.
///
/// An odd-length input is read as if it had a leading `0`, so `"ABC"`
/// yields `[0x0A, 0xBC]` and the output is always `ceil(len / 2)` bytes.
pub fn decode_hex(text: &str) -> TtyDbgResult<Vec<u8>> {
    if let Some(bad) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(TtyDbgError::Encoding(format!(
            "'{}' is not a hex digit in \"{}\"",
            bad.escape_default(),
            text
        )));
    }

    let decoded = if text.len() % 2 == 1 {
        hex::decode(format!("0{}", text))
    } else {
        hex::decode(text)
    };
    decoded.map_err(|e| TtyDbgError::Unknown(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_hex_byte() {
        let bytes = WritePayload::hex("41").encode().unwrap();
        assert_eq!(bytes.as_slice(), &[0x41]);
    }

    #[test]
    fn test_long_hex_payload_fully_decoded() {
        let bytes = WritePayload::hex("DEADBEEF0102030405").encode().unwrap();
        assert_eq!(
            bytes.as_slice(),
            &[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04, 0x05]
        );
    }

    #[test]
    fn test_odd_length_hex() {
        assert_eq!(decode_hex("ABC").unwrap(), vec![0x0A, 0xBC]);
        assert_eq!(decode_hex("f").unwrap(), vec![0x0F]);
    }

    #[test]
    fn test_empty_hex_is_empty() {
        assert!(WritePayload::hex("").encode().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_hex_rejected() {
        for input in ["4G", "0x41", "41 42", "zz", "4\n"] {
            let result = WritePayload::hex(input).encode();
            assert!(matches!(result, Err(TtyDbgError::Encoding(_))), "{input:?}");
        }
    }

    #[test]
    fn test_text_payload_is_verbatim() {
        let bytes = WritePayload::text("AT+GMR\r\n").encode().unwrap();
        assert_eq!(bytes.as_slice(), b"AT+GMR\r\n");

        let bytes = WritePayload::text("zz").encode().unwrap();
        assert_eq!(bytes.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_hex_byte_count(input in "[0-9a-fA-F]{0,64}") {
            let bytes = decode_hex(&input).unwrap();
            prop_assert_eq!(bytes.len(), (input.len() + 1) / 2);
        }

        #[test]
        fn prop_hex_reencodes_to_input(input in "([0-9a-f]{2}){0,32}") {
            let bytes = decode_hex(&input).unwrap();
            prop_assert_eq!(hex::encode(bytes), input);
        }

        #[test]
        fn prop_non_hex_rejected(
            prefix in "[0-9a-fA-F]{0,8}",
            bad in "[^0-9a-fA-F]",
            suffix in "[0-9a-fA-F]{0,8}",
        ) {
            let input = format!("{}{}{}", prefix, bad, suffix);
            let result = decode_hex(&input);
            prop_assert!(matches!(result, Err(TtyDbgError::Encoding(_))));
        }
    }
}
