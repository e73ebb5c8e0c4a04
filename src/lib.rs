pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{EnvLocale, FixedLocale, TokioProcessRunner};
pub use config::BoundaryConfig;
pub use self::core::{
    encoding::Encoding,
    message_error::MessageError,
    policy::{BoundaryTextPolicy, ImplicitConversion},
    suite::{BoundarySuite, SuiteReport},
};
pub use domain::model::{BoundaryOperation, ByteValue, Representation, TextValue, Value};
pub use domain::ports::CommandSpec;
pub use utils::error::{BoundaryError, Result};
