use crate::config::BoundaryConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "text-boundary")]
#[command(about = "Demonstrates correct and incorrect text handling at process boundaries")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Non-ASCII message pushed across every boundary
    #[arg(long)]
    pub message: Option<String>,

    /// Echo-style command that receives the message as an argument
    #[arg(long)]
    pub echo_command: Option<String>,

    /// Command that copies stdin to stdout unchanged
    #[arg(long)]
    pub passthrough_command: Option<String>,

    /// forbid (default) or locale
    #[arg(long)]
    pub implicit_conversion: Option<String>,

    /// Override the ambient locale encoding, e.g. UTF-8 or ISO-8859-1
    #[arg(long)]
    pub locale: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋設定檔
    pub fn apply_to(&self, config: &mut BoundaryConfig) {
        if let Some(message) = &self.message {
            config.message = message.clone();
        }
        if let Some(echo) = &self.echo_command {
            config.echo_command = echo.clone();
        }
        if let Some(passthrough) = &self.passthrough_command {
            config.passthrough_command = passthrough.clone();
        }
        if let Some(implicit) = &self.implicit_conversion {
            config.implicit_conversion = implicit.clone();
        }
        if let Some(locale) = &self.locale {
            config.locale = Some(locale.clone());
        }
    }
}
