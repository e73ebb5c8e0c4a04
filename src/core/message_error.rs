use crate::core::encoding::Encoding;
use crate::domain::model::{BoundaryOperation, ByteValue, Representation, TextValue, Value};
use crate::utils::error::{BoundaryError, Result};
use std::fmt;

/// An error carrying a caller-supplied message, built by
/// `BoundaryTextPolicy::raise_error_with_message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageError {
    message: Value,
}

impl MessageError {
    pub fn new(message: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &Value {
        &self.message
    }

    /// 以文字取得錯誤訊息。位元組訊息只會得到跳脫後的 `b'...'` 形式
    pub fn render_text(&self) -> TextValue {
        match &self.message {
            Value::Text(text) => text.clone(),
            Value::Bytes(bytes) => TextValue::new(bytes.escaped()),
        }
    }

    /// Byte-only rendering through `formatting`, the encoding a legacy
    /// error-formatting path writes with.
    pub fn render_bytes(&self, formatting: &Encoding) -> Result<ByteValue> {
        match &self.message {
            Value::Text(text) => formatting.encode_in("error formatting", text),
            Value::Bytes(_) => Err(BoundaryError::RepresentationTypeError {
                operation: BoundaryOperation::ConstructError,
                expected: Representation::Text,
                found: Representation::Bytes,
            }),
        }
    }
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_text())
    }
}

impl std::error::Error for MessageError {}
