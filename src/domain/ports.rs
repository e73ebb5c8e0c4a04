use crate::domain::model::{ByteValue, CapturedOutput};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::process::ExitStatus;

/// An external command: program plus the fixed arguments that precede the
/// value under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// 以空白切分命令字串，例如 "cat -"
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self {
            program: program.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }

    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Process collaborator. Every slot here is already bytes; representation
/// checks happen before a runner is reached.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawn with extra argv entries, stdout discarded, and wait for exit.
    async fn call(&self, command: &CommandSpec, extra_args: Vec<OsString>) -> Result<ExitStatus>;

    /// Spawn with a stdin pipe, write `input`, close the pipe and wait.
    async fn feed(&self, command: &CommandSpec, input: &ByteValue) -> Result<ExitStatus>;

    /// Write `input`, wait for exit and collect stdout and stderr.
    async fn communicate(&self, command: &CommandSpec, input: &ByteValue) -> Result<CapturedOutput>;
}

/// Locale collaborator: the ambient default encoding name, if any.
pub trait LocaleProvider: Send + Sync {
    fn default_encoding(&self) -> Option<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn message(&self) -> &str;
    fn echo_command(&self) -> &str;
    fn passthrough_command(&self) -> &str;
    fn implicit_conversion(&self) -> &str;
    fn locale_override(&self) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_line() {
        let spec = CommandSpec::parse("cat -").unwrap();
        assert_eq!(spec, CommandSpec::new("cat").arg("-"));
        assert_eq!(spec.display(), "cat -");
        assert!(CommandSpec::parse("   ").is_none());
    }
}
