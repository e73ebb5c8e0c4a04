use std::process::Stdio;

/// Destination for child output that is not under test.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl DiscardSink {
    pub fn stdio(&self) -> Stdio {
        Stdio::null()
    }
}
