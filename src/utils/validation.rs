use crate::core::encoding::Encoding;
use crate::domain::model::TextValue;
use crate::domain::ports::CommandSpec;
use crate::utils::error::{BoundaryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BoundaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BoundaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoundaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 測試訊息必須含有預設編碼無法表示的字元，否則錯誤的路徑不會出錯
pub fn validate_demo_message(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.contains('\0') {
        return Err(BoundaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.escape_default().to_string(),
            reason: "Message contains null bytes and cannot be a process argument".to_string(),
        });
    }
    let legacy = Encoding::legacy_default();
    if legacy.encode(&TextValue::from(value)).is_ok() {
        return Err(BoundaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!(
                "Message must contain a character outside {}, e.g. CJK text",
                legacy
            ),
        });
    }
    Ok(())
}

pub fn validate_command(field_name: &str, line: &str) -> Result<CommandSpec> {
    if line.contains('\0') {
        return Err(BoundaryError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: line.escape_default().to_string(),
            reason: "Command contains null bytes".to_string(),
        });
    }
    CommandSpec::parse(line).ok_or_else(|| BoundaryError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_demo_message() {
        assert!(validate_demo_message("message", "汉语/漢語").is_ok());
        assert!(validate_demo_message("message", "Ελληνικά").is_ok());
        assert!(validate_demo_message("message", "plain").is_err());
        // é 在 windows-1252 裡，示範不出錯誤
        assert!(validate_demo_message("message", "café").is_err());
        assert!(validate_demo_message("message", "   ").is_err());
        assert!(validate_demo_message("message", "漢\0語").is_err());
    }

    #[test]
    fn test_validate_command() {
        let spec = validate_command("commands.passthrough", "cat -").unwrap();
        assert_eq!(spec.program, "cat");
        assert!(matches!(
            validate_command("commands.echo", ""),
            Err(BoundaryError::MissingConfigError { .. })
        ));
        assert!(validate_command("commands.echo", "ec\0ho").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("config", "boundary.toml").is_ok());
        assert!(validate_path("config", "").is_err());
    }
}
