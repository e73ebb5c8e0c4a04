use crate::domain::model::{ByteValue, TextValue};
use crate::utils::error::{BoundaryError, Result};
use std::fmt;

/// Invertible mapping between [`TextValue`] and [`ByteValue`].
///
/// Both directions are strict: a character the target cannot represent, or
/// a byte sequence that is not valid input, is an `EncodingError`. Nothing is
/// replaced or escaped.
#[derive(Clone, Copy)]
pub struct Encoding {
    inner: &'static encoding_rs::Encoding,
}

impl Encoding {
    pub fn utf8() -> Self {
        Self {
            inner: encoding_rs::UTF_8,
        }
    }

    /// 依 WHATWG 標籤查找編碼，例如 "utf-8"、"ascii"、"latin1"
    pub fn for_label(label: &str) -> Result<Self> {
        encoding_rs::Encoding::for_label(label.trim().as_bytes())
            .map(|inner| Self { inner })
            .ok_or_else(|| BoundaryError::UnknownEncoding {
                label: label.to_string(),
            })
    }

    /// The legacy default used when a runtime formats text into a byte-only
    /// string without being told an encoding.
    pub fn legacy_default() -> Self {
        // "ascii" resolves to windows-1252 under WHATWG rules; neither covers CJK.
        Self {
            inner: encoding_rs::WINDOWS_1252,
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    pub fn is_utf8(&self) -> bool {
        std::ptr::eq(self.inner, encoding_rs::UTF_8)
    }

    pub fn encode(&self, text: &TextValue) -> Result<ByteValue> {
        self.encode_in("encode", text)
    }

    pub fn decode(&self, bytes: &ByteValue) -> Result<TextValue> {
        self.decode_in("decode", bytes)
    }

    pub(crate) fn encode_in(&self, context: &str, text: &TextValue) -> Result<ByteValue> {
        if !std::ptr::eq(self.inner.output_encoding(), self.inner) {
            return Err(self.error(context, "encoding cannot be used for output".to_string()));
        }

        let (bytes, _, had_errors) = self.inner.encode(text.as_str());
        if had_errors {
            let culprit = text
                .as_str()
                .chars()
                .find(|c| self.inner.encode(c.encode_utf8(&mut [0u8; 4])).2);
            let detail = match culprit {
                Some(c) => format!("character {:?} (U+{:04X}) is not representable", c, c as u32),
                None => "text is not representable".to_string(),
            };
            return Err(self.error(context, detail));
        }

        Ok(ByteValue::new(bytes.into_owned()))
    }

    pub(crate) fn decode_in(&self, context: &str, bytes: &ByteValue) -> Result<TextValue> {
        self.inner
            .decode_without_bom_handling_and_without_replacement(bytes.as_bytes())
            .map(|text| TextValue::new(text.into_owned()))
            .ok_or_else(|| self.error(context, format!("{} is not valid input", bytes.escaped())))
    }

    fn error(&self, context: &str, detail: String) -> BoundaryError {
        BoundaryError::EncodingError {
            context: context.to_string(),
            encoding: self.name().to_string(),
            detail,
        }
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl PartialEq for Encoding {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for Encoding {}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Encoding").field(&self.name()).finish()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "汉语/漢語";

    #[test]
    fn test_utf8_round_trip() {
        let enc = Encoding::utf8();
        let text = TextValue::from(MESSAGE);
        let bytes = enc.encode(&text).unwrap();
        assert_eq!(bytes.as_bytes(), MESSAGE.as_bytes());
        assert_eq!(enc.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn test_labels() {
        assert!(Encoding::for_label("UTF-8").unwrap().is_utf8());
        assert!(Encoding::for_label("utf8").unwrap().is_utf8());
        assert_eq!(Encoding::for_label("ascii").unwrap(), Encoding::legacy_default());
        assert!(matches!(
            Encoding::for_label("klingon"),
            Err(BoundaryError::UnknownEncoding { .. })
        ));
    }

    #[test]
    fn test_legacy_encode_is_strict() {
        let err = Encoding::legacy_default()
            .encode(&TextValue::from(MESSAGE))
            .unwrap_err();
        match err {
            BoundaryError::EncodingError { detail, encoding, .. } => {
                assert!(detail.contains("U+6C49"));
                assert_eq!(encoding, "windows-1252");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let ascii = Encoding::legacy_default()
            .encode(&TextValue::from("plain"))
            .unwrap();
        assert_eq!(ascii.as_bytes(), b"plain");
    }

    #[test]
    fn test_decode_rejects_malformed_utf8() {
        let err = Encoding::utf8()
            .decode(&ByteValue::new(vec![0xe6, 0xb1]))
            .unwrap_err();
        assert!(err.is_encoding_class());
    }

    #[test]
    fn test_utf16_cannot_encode() {
        let enc = Encoding::for_label("utf-16le").unwrap();
        assert!(enc.encode(&TextValue::from("a")).is_err());
    }
}
