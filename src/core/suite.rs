use crate::core::encoding::Encoding;
use crate::core::policy::{BoundaryTextPolicy, ImplicitConversion};
use crate::domain::model::{BoundaryOperation, Representation, TextValue};
use crate::domain::ports::{CommandSpec, ConfigProvider, LocaleProvider, ProcessRunner};
use crate::utils::error::{BoundaryError, Result};
use crate::utils::validation;
use chrono::{DateTime, Utc};
use serde::Serialize;

type CaseResult = std::result::Result<String, String>;

#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub boundary: BoundaryOperation,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    pub package: String,
    pub version: String,
    pub encoding: String,
    pub ambient_encoding: Option<String>,
    pub implicit_conversion: ImplicitConversion,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub runtime: RuntimeInfo,
    pub message: TextValue,
    pub cases: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.cases.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }

    pub fn case(&self, name: &str) -> Option<&CaseOutcome> {
        self.cases.iter().find(|c| c.name == name)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the correct and incorrect crossing of every boundary once.
pub struct BoundarySuite<R: ProcessRunner> {
    policy: BoundaryTextPolicy<R>,
    message: TextValue,
    echo: CommandSpec,
    passthrough: CommandSpec,
}

impl<R: ProcessRunner> BoundarySuite<R> {
    pub fn new(
        policy: BoundaryTextPolicy<R>,
        message: TextValue,
        echo: CommandSpec,
        passthrough: CommandSpec,
    ) -> Self {
        Self {
            policy,
            message,
            echo,
            passthrough,
        }
    }

    pub fn from_config<C: ConfigProvider>(
        runner: R,
        locale: &dyn LocaleProvider,
        config: &C,
    ) -> Result<Self> {
        validation::validate_demo_message("suite.message", config.message())?;
        let echo = validation::validate_command("commands.echo", config.echo_command())?;
        let passthrough =
            validation::validate_command("commands.passthrough", config.passthrough_command())?;
        let implicit = config.implicit_conversion().parse::<ImplicitConversion>()?;

        let policy = BoundaryTextPolicy::new(runner, locale).with_implicit_conversion(implicit);
        Ok(Self::new(
            policy,
            TextValue::from(config.message()),
            echo,
            passthrough,
        ))
    }

    pub fn policy(&self) -> &BoundaryTextPolicy<R> {
        &self.policy
    }

    pub fn runtime_info(&self) -> RuntimeInfo {
        RuntimeInfo {
            package: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            encoding: self.policy.encoding().name().to_string(),
            ambient_encoding: self.policy.ambient_encoding().map(str::to_string),
            implicit_conversion: self.policy.implicit_conversion(),
        }
    }

    pub async fn run(&self) -> SuiteReport {
        let started_at = Utc::now();
        let runtime = self.runtime_info();

        tracing::info!(
            "🚀 {} {} (encoding: {}, locale: {})",
            runtime.package,
            runtime.version,
            runtime.encoding,
            runtime.ambient_encoding.as_deref().unwrap_or("none")
        );

        let cases = vec![
            self.record("exception_incorrect", BoundaryOperation::ConstructError, self.exception_incorrect()),
            self.record("exception_correct", BoundaryOperation::ConstructError, self.exception_correct()),
            self.record(
                "argument_incorrect",
                BoundaryOperation::SpawnProcessArgument,
                self.argument_incorrect().await,
            ),
            self.record(
                "argument_correct",
                BoundaryOperation::SpawnProcessArgument,
                self.argument_correct().await,
            ),
            self.record("stdin_incorrect", BoundaryOperation::WriteProcessStdin, self.stdin_incorrect().await),
            self.record("stdin_correct", BoundaryOperation::WriteProcessStdin, self.stdin_correct().await),
            self.record("stdout_incorrect", BoundaryOperation::ReadProcessStdout, self.stdout_incorrect().await),
            self.record("stdout_correct", BoundaryOperation::ReadProcessStdout, self.stdout_correct().await),
        ];

        let report = SuiteReport {
            started_at,
            runtime,
            message: self.message.clone(),
            cases,
        };

        tracing::info!(
            "📊 {} passed, {} failed",
            report.passed_count(),
            report.failed_count()
        );
        report
    }

    fn record(&self, name: &str, boundary: BoundaryOperation, result: CaseResult) -> CaseOutcome {
        let (passed, detail) = match result {
            Ok(detail) => {
                tracing::info!("✅ {}: {}", name, detail);
                (true, detail)
            }
            Err(detail) => {
                tracing::error!("❌ {}: {}", name, detail);
                (false, detail)
            }
        };
        CaseOutcome {
            name: name.to_string(),
            boundary,
            passed,
            detail,
        }
    }

    fn exception_incorrect(&self) -> CaseResult {
        // 位元組訊息：只能得到跳脫字串
        let bytes = self.policy.encode(&self.message).map_err(|e| e.to_string())?;
        let rendered = self.policy.raise_error_with_message(bytes).render_text();
        if !rendered.as_str().starts_with("b'") || rendered == self.message {
            return Err(format!("byte message rendered as {:?}", rendered.as_str()));
        }

        // 文字訊息：無法以預設編碼輸出位元組
        let error = self.policy.raise_error_with_message(self.message.clone());
        match error.render_bytes(&Encoding::legacy_default()) {
            Err(BoundaryError::EncodingError { detail, .. }) => Ok(format!(
                "byte message renders as {}; legacy byte rendering fails: {}",
                rendered, detail
            )),
            Err(other) => Err(format!("expected an encoding error, got {}", other)),
            Ok(_) => Err("legacy byte rendering unexpectedly succeeded".to_string()),
        }
    }

    fn exception_correct(&self) -> CaseResult {
        let rendered = self
            .policy
            .raise_error_with_message(self.message.clone())
            .render_text();
        if rendered == self.message {
            Ok(format!("rendered {:?}", rendered.as_str()))
        } else {
            Err(format!("rendered {:?}", rendered.as_str()))
        }
    }

    async fn argument_incorrect(&self) -> CaseResult {
        let outcome = self
            .policy
            .spawn_with_argument(&self.echo, self.message.clone())
            .await;

        match (self.policy.permits_implicit_argument(), outcome) {
            (true, Ok(status)) => Ok(format!("implicit conversion under a UTF-8 locale, {}", status)),
            (true, Err(e)) => Err(format!("implicit conversion was expected to succeed: {}", e)),
            (false, Err(e @ BoundaryError::RepresentationTypeError { .. })) => Ok(e.to_string()),
            (false, Err(e)) => Err(format!("expected a representation error, got {}", e)),
            (false, Ok(_)) => Err("raw text argument was accepted".to_string()),
        }
    }

    async fn argument_correct(&self) -> CaseResult {
        let bytes = self.policy.encode(&self.message).map_err(|e| e.to_string())?;
        self.policy
            .spawn_with_argument(&self.echo, bytes)
            .await
            .map(|status| format!("{} {}", self.echo.display(), status))
            .map_err(|e| e.to_string())
    }

    async fn stdin_incorrect(&self) -> CaseResult {
        match self
            .policy
            .write_stdin(&self.passthrough, self.message.clone())
            .await
        {
            Err(e) if e.is_encoding_class() => Ok(e.to_string()),
            Err(e) => Err(format!("expected an encoding-class error, got {}", e)),
            Ok(_) => Err("raw text was written to stdin".to_string()),
        }
    }

    async fn stdin_correct(&self) -> CaseResult {
        let bytes = self.policy.encode(&self.message).map_err(|e| e.to_string())?;
        let len = bytes.len();
        self.policy
            .write_stdin(&self.passthrough, bytes)
            .await
            .map(|status| format!("wrote {} bytes, {}", len, status))
            .map_err(|e| e.to_string())
    }

    async fn stdout_incorrect(&self) -> CaseResult {
        let bytes = self.policy.encode(&self.message).map_err(|e| e.to_string())?;
        let captured = self
            .policy
            .read_stdout_stderr(&self.passthrough, bytes)
            .await
            .map_err(|e| e.to_string())?;

        for (operation, value) in [
            (BoundaryOperation::ReadProcessStdout, captured.stdout_value()),
            (BoundaryOperation::ReadProcessStderr, captured.stderr_value()),
        ] {
            if value.representation() != Representation::Bytes {
                return Err(format!("{} returned {}", operation, value.representation()));
            }
            if self.policy.expect_text(operation, value).is_ok() {
                return Err(format!("{} was accepted as text", operation));
            }
        }
        Ok("stdout and stderr are bytes until decoded".to_string())
    }

    async fn stdout_correct(&self) -> CaseResult {
        let bytes = self.policy.encode(&self.message).map_err(|e| e.to_string())?;
        let captured = self
            .policy
            .read_stdout_stderr(&self.passthrough, bytes)
            .await
            .map_err(|e| e.to_string())?;
        let decoded = self
            .policy
            .decode_output(&captured)
            .map_err(|e| e.to_string())?;

        if decoded.stdout != self.message {
            return Err(format!("stdout decoded to {:?}", decoded.stdout.as_str()));
        }
        if decoded.stderr != "" {
            return Err(format!("stderr decoded to {:?}", decoded.stderr.as_str()));
        }
        Ok(format!("stdout round-tripped {:?}", decoded.stdout.as_str()))
    }
}
