#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::{EnvLocale, FixedLocale};
use crate::core::policy::ImplicitConversion;
use crate::domain::ports::{ConfigProvider, LocaleProvider};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MESSAGE: &str = "汉语/漢語";
pub const DEFAULT_ECHO_COMMAND: &str = "echo";
pub const DEFAULT_PASSTHROUGH_COMMAND: &str = "cat -";

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// Settings after defaults, the config file and flags have been layered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub message: String,
    pub echo_command: String,
    pub passthrough_command: String,
    pub implicit_conversion: String,
    pub locale: Option<String>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            echo_command: DEFAULT_ECHO_COMMAND.to_string(),
            passthrough_command: DEFAULT_PASSTHROUGH_COMMAND.to_string(),
            implicit_conversion: "forbid".to_string(),
            locale: None,
        }
    }
}

impl BoundaryConfig {
    pub fn apply_toml(&mut self, file: &TomlConfig) {
        if let Some(suite) = &file.suite {
            if let Some(message) = &suite.message {
                self.message = message.clone();
            }
            if let Some(implicit) = &suite.implicit_conversion {
                self.implicit_conversion = implicit.clone();
            }
        }
        if let Some(commands) = &file.commands {
            if let Some(echo) = &commands.echo {
                self.echo_command = echo.clone();
            }
            if let Some(passthrough) = &commands.passthrough {
                self.passthrough_command = passthrough.clone();
            }
        }
        if let Some(locale) = file.locale.as_ref().and_then(|l| l.encoding.clone()) {
            self.locale = Some(locale);
        }
    }

    pub fn locale_provider(&self) -> Box<dyn LocaleProvider> {
        locale_provider_for(self)
    }
}

/// 指定語系時使用固定值，否則讀取環境變數
pub fn locale_provider_for<C: ConfigProvider + ?Sized>(config: &C) -> Box<dyn LocaleProvider> {
    match config.locale_override() {
        Some(encoding) => Box::new(FixedLocale::new(encoding)),
        None => Box::new(EnvLocale::new()),
    }
}

impl ConfigProvider for BoundaryConfig {
    fn message(&self) -> &str {
        &self.message
    }

    fn echo_command(&self) -> &str {
        &self.echo_command
    }

    fn passthrough_command(&self) -> &str {
        &self.passthrough_command
    }

    fn implicit_conversion(&self) -> &str {
        &self.implicit_conversion
    }

    fn locale_override(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

impl Validate for BoundaryConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_demo_message("suite.message", &self.message)?;
        validation::validate_command("commands.echo", &self.echo_command)?;
        validation::validate_command("commands.passthrough", &self.passthrough_command)?;
        self.implicit_conversion.parse::<ImplicitConversion>()?;
        if let Some(locale) = &self.locale {
            validation::validate_non_empty_string("locale.encoding", locale)?;
        }
        Ok(())
    }
}
