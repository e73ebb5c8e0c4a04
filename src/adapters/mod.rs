// Adapters layer: concrete collaborators for processes, locale and the discard sink.

pub mod locale;
pub mod process;
pub mod sink;

pub use locale::{EnvLocale, FixedLocale};
pub use process::TokioProcessRunner;
pub use sink::DiscardSink;
