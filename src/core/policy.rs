use crate::core::encoding::Encoding;
use crate::core::message_error::MessageError;
use crate::domain::model::{
    BoundaryOperation, ByteValue, CapturedOutput, DecodedOutput, Representation, TextValue, Value,
};
use crate::domain::ports::{CommandSpec, LocaleProvider, ProcessRunner};
use crate::utils::error::{BoundaryError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::process::ExitStatus;
use std::str::FromStr;

/// Whether text handed to a process argument may be converted implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicitConversion {
    /// Text never crosses a byte boundary without an explicit encode.
    #[default]
    Forbid,
    /// Legacy behavior: convert silently when the ambient locale is UTF-8.
    Locale,
}

impl FromStr for ImplicitConversion {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forbid" => Ok(ImplicitConversion::Forbid),
            "locale" => Ok(ImplicitConversion::Locale),
            other => Err(BoundaryError::InvalidConfigValueError {
                field: "implicit_conversion".to_string(),
                value: other.to_string(),
                reason: "Expected 'forbid' or 'locale'".to_string(),
            }),
        }
    }
}

/// The encode/decode contract at every boundary.
pub struct BoundaryTextPolicy<R: ProcessRunner> {
    runner: R,
    encoding: Encoding,
    ambient: Option<String>,
    implicit: ImplicitConversion,
}

impl<R: ProcessRunner> BoundaryTextPolicy<R> {
    /// The locale is read once here and never consulted again.
    pub fn new(runner: R, locale: &dyn LocaleProvider) -> Self {
        let ambient = locale.default_encoding();
        tracing::debug!("Ambient locale encoding: {:?}", ambient);
        Self {
            runner,
            encoding: Encoding::utf8(),
            ambient,
            implicit: ImplicitConversion::Forbid,
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_implicit_conversion(mut self, implicit: ImplicitConversion) -> Self {
        self.implicit = implicit;
        self
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    pub fn ambient_encoding(&self) -> Option<&str> {
        self.ambient.as_deref()
    }

    pub fn implicit_conversion(&self) -> ImplicitConversion {
        self.implicit
    }

    /// True when the ambient locale names UTF-8 under any of its labels.
    pub fn ambient_is_utf8(&self) -> bool {
        self.ambient_codec().is_some_and(|enc| enc.is_utf8())
    }

    fn ambient_codec(&self) -> Option<Encoding> {
        self.ambient
            .as_deref()
            .and_then(|label| Encoding::for_label(label).ok())
    }

    /// Would a raw text argument be converted implicitly under this policy?
    pub fn permits_implicit_argument(&self) -> bool {
        self.implicit == ImplicitConversion::Locale && self.ambient_is_utf8()
    }

    pub fn encode(&self, text: &TextValue) -> Result<ByteValue> {
        self.encoding.encode(text)
    }

    pub fn decode(&self, bytes: &ByteValue) -> Result<TextValue> {
        self.encoding.decode(bytes)
    }

    pub fn check(&self, operation: BoundaryOperation, value: &Value) -> Result<()> {
        let expected = operation.required_representation();
        let found = value.representation();
        if expected != found {
            return Err(BoundaryError::RepresentationTypeError {
                operation,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Take a value as text. Bytes are refused rather than guessed at.
    pub fn expect_text(&self, operation: BoundaryOperation, value: Value) -> Result<TextValue> {
        match value {
            Value::Text(text) => Ok(text),
            Value::Bytes(_) => Err(BoundaryError::RepresentationTypeError {
                operation,
                expected: Representation::Text,
                found: Representation::Bytes,
            }),
        }
    }

    fn expect_bytes(&self, operation: BoundaryOperation, value: Value) -> Result<ByteValue> {
        match value {
            Value::Bytes(bytes) => Ok(bytes),
            Value::Text(_) => Err(BoundaryError::RepresentationTypeError {
                operation,
                expected: Representation::Bytes,
                found: Representation::Text,
            }),
        }
    }

    pub fn raise_error_with_message(&self, message: impl Into<Value>) -> MessageError {
        let message = message.into();
        if let Err(e) = self.check(BoundaryOperation::ConstructError, &message) {
            tracing::warn!("⚠️ {}", e);
        }
        MessageError::new(message)
    }

    pub async fn spawn_with_argument(
        &self,
        command: &CommandSpec,
        message: impl Into<Value>,
    ) -> Result<ExitStatus> {
        let arg = match message.into() {
            Value::Bytes(bytes) => self.os_arg(&self.encoding, bytes)?,
            // 隱式轉換用的是語系的編碼，不是政策設定的編碼
            Value::Text(text) => match self.ambient_codec() {
                Some(locale) if self.permits_implicit_argument() => {
                    tracing::warn!(
                        "⚠️ Implicitly encoding a text argument because the locale is {:?}; this breaks under any other locale",
                        self.ambient
                    );
                    let bytes = locale.encode_in("implicit argument conversion", &text)?;
                    self.os_arg(&locale, bytes)?
                }
                _ => {
                    let bytes =
                        self.expect_bytes(BoundaryOperation::SpawnProcessArgument, Value::Text(text))?;
                    self.os_arg(&self.encoding, bytes)?
                }
            },
        };

        self.runner.call(command, vec![arg]).await
    }

    pub async fn write_stdin(
        &self,
        command: &CommandSpec,
        message: impl Into<Value>,
    ) -> Result<ExitStatus> {
        let bytes = self.expect_bytes(BoundaryOperation::WriteProcessStdin, message.into())?;
        self.runner.feed(command, &bytes).await
    }

    pub async fn read_stdout_stderr(
        &self,
        command: &CommandSpec,
        message: impl Into<Value>,
    ) -> Result<CapturedOutput> {
        let bytes = self.expect_bytes(BoundaryOperation::WriteProcessStdin, message.into())?;
        self.runner.communicate(command, &bytes).await
    }

    pub fn decode_output(&self, captured: &CapturedOutput) -> Result<DecodedOutput> {
        captured.decode(&self.encoding)
    }

    #[cfg(unix)]
    fn os_arg(&self, _encoding: &Encoding, bytes: ByteValue) -> Result<OsString> {
        use std::os::unix::ffi::OsStringExt;
        Ok(OsString::from_vec(bytes.into_vec()))
    }

    // 非 Unix 平台的參數是 UTF-16，必須先解碼回文字
    #[cfg(not(unix))]
    fn os_arg(&self, encoding: &Encoding, bytes: ByteValue) -> Result<OsString> {
        let text = encoding
            .decode_in(&BoundaryOperation::SpawnProcessArgument.to_string(), &bytes)?;
        Ok(OsString::from(text.into_string()))
    }
}

impl CapturedOutput {
    pub fn stdout_value(&self) -> Value {
        Value::Bytes(self.stdout.clone())
    }

    pub fn stderr_value(&self) -> Value {
        Value::Bytes(self.stderr.clone())
    }

    pub fn decode(&self, encoding: &Encoding) -> Result<DecodedOutput> {
        Ok(DecodedOutput {
            stdout: encoding.decode_in(&BoundaryOperation::ReadProcessStdout.to_string(), &self.stdout)?,
            stderr: encoding.decode_in(&BoundaryOperation::ReadProcessStderr.to_string(), &self.stderr)?,
        })
    }
}
