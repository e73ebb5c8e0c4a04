pub mod encoding;
pub mod message_error;
pub mod policy;
pub mod suite;

pub use crate::domain::model::{ByteValue, TextValue, Value};
pub use crate::domain::ports::{CommandSpec, LocaleProvider, ProcessRunner};
pub use crate::utils::error::Result;
