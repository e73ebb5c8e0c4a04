use crate::utils::error::{BoundaryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub suite: Option<SuiteSection>,
    pub commands: Option<CommandsSection>,
    pub locale: Option<LocaleSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteSection {
    pub message: Option<String>,
    pub implicit_conversion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsSection {
    pub echo: Option<String>,
    pub passthrough: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleSection {
    pub encoding: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BoundaryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BoundaryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOUNDARY_MESSAGE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BoundaryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}
