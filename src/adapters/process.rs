use crate::adapters::sink::DiscardSink;
use crate::domain::model::{ByteValue, CapturedOutput};
use crate::domain::ports::{CommandSpec, ProcessRunner};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, Command};

/// Runs external commands through `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    sink: DiscardSink,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self {
            sink: DiscardSink,
        }
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        cmd.kill_on_drop(true);
        cmd
    }
}

/// 子行程提早結束而關閉 stdin 時，結果以結束狀態為準
async fn write_and_close(mut stdin: ChildStdin, input: &[u8]) -> io::Result<()> {
    let written = match stdin.write_all(input).await {
        Ok(()) => stdin.shutdown().await,
        Err(e) => Err(e),
    };
    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("Child closed stdin before reading all {} bytes", input.len());
            Ok(())
        }
        other => other,
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn call(&self, command: &CommandSpec, extra_args: Vec<OsString>) -> Result<ExitStatus> {
        tracing::debug!("Spawning {} with {} extra argument(s)", command.display(), extra_args.len());

        let mut cmd = self.command(command);
        cmd.args(extra_args)
            .stdin(Stdio::null())
            .stdout(self.sink.stdio());

        let status = cmd.status().await?;
        tracing::debug!("{} exited with {}", command.program, status);
        Ok(status)
    }

    async fn feed(&self, command: &CommandSpec, input: &ByteValue) -> Result<ExitStatus> {
        tracing::debug!("Feeding {} bytes to {}", input.len(), command.display());

        let mut cmd = self.command(command);
        cmd.stdin(Stdio::piped())
            .stdout(self.sink.stdio())
            .stderr(self.sink.stdio());

        let mut child = cmd.spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("missing stdin"))?;

        let (written, status) = tokio::join!(write_and_close(stdin, input.as_bytes()), child.wait());
        written?;
        Ok(status?)
    }

    async fn communicate(&self, command: &CommandSpec, input: &ByteValue) -> Result<CapturedOutput> {
        tracing::debug!("Communicating {} bytes with {}", input.len(), command.display());

        let mut cmd = self.command(command);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("missing stdin"))?;

        // 同時寫入與收集輸出，避免子行程塞滿管線時互相等待
        let (written, output) = tokio::join!(
            write_and_close(stdin, input.as_bytes()),
            child.wait_with_output()
        );
        written?;
        let output = output?;

        tracing::debug!(
            "{} exited with {} ({} stdout bytes, {} stderr bytes)",
            command.program,
            output.status,
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(CapturedOutput {
            stdout: ByteValue::new(output.stdout),
            stderr: ByteValue::new(output.stderr),
            exit_code: output.status.code(),
        })
    }
}
