pub mod errors;
pub mod id;

pub use errors::{ConfigError, SynapseError};
pub use id::SessionId;
