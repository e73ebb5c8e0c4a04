use serde::{Deserialize, Serialize};
use std::fmt;

/// 抽象字元序列，尚未決定編碼
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextValue(String);

impl TextValue {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl PartialEq<str> for TextValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TextValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 已編碼的位元組序列，作業系統層級 I/O 唯一接受的表示
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteValue(Vec<u8>);

impl ByteValue {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// `b'...'` literal form; this is what a byte message looks like when
    /// formatted as text without decoding.
    pub fn escaped(&self) -> String {
        format!("b'{}'", self.0.escape_ascii())
    }
}

impl From<Vec<u8>> for ByteValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteValue {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    Text,
    Bytes,
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Text => f.write_str("text"),
            Representation::Bytes => f.write_str("bytes"),
        }
    }
}

/// A value sitting in a boundary slot, in whichever representation the
/// caller chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(TextValue),
    Bytes(ByteValue),
}

impl Value {
    pub fn representation(&self) -> Representation {
        match self {
            Value::Text(_) => Representation::Text,
            Value::Bytes(_) => Representation::Bytes,
        }
    }
}

impl From<TextValue> for Value {
    fn from(text: TextValue) -> Self {
        Value::Text(text)
    }
}

impl From<ByteValue> for Value {
    fn from(bytes: ByteValue) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(TextValue::from(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryOperation {
    ConstructError,
    SpawnProcessArgument,
    WriteProcessStdin,
    ReadProcessStdout,
    ReadProcessStderr,
}

impl BoundaryOperation {
    pub const ALL: [BoundaryOperation; 5] = [
        BoundaryOperation::ConstructError,
        BoundaryOperation::SpawnProcessArgument,
        BoundaryOperation::WriteProcessStdin,
        BoundaryOperation::ReadProcessStdout,
        BoundaryOperation::ReadProcessStderr,
    ];

    pub fn required_representation(self) -> Representation {
        match self {
            BoundaryOperation::ConstructError => Representation::Text,
            BoundaryOperation::SpawnProcessArgument
            | BoundaryOperation::WriteProcessStdin
            | BoundaryOperation::ReadProcessStdout
            | BoundaryOperation::ReadProcessStderr => Representation::Bytes,
        }
    }
}

impl fmt::Display for BoundaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryOperation::ConstructError => "construct error",
            BoundaryOperation::SpawnProcessArgument => "spawn process argument",
            BoundaryOperation::WriteProcessStdin => "write process stdin",
            BoundaryOperation::ReadProcessStdout => "read process stdout",
            BoundaryOperation::ReadProcessStderr => "read process stderr",
        };
        f.write_str(name)
    }
}

/// Bytes captured from a finished child process. Both streams stay bytes
/// until somebody decodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: ByteValue,
    pub stderr: ByteValue,
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedOutput {
    pub stdout: TextValue,
    pub stderr: TextValue,
}
