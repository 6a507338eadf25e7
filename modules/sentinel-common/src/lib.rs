pub mod types;
pub mod registry;
pub mod tables;
pub mod classify;
pub mod config;
pub mod error;

pub use types::*;
pub use registry::Registry;
pub use tables::{ActorRule, ActorTrigger, IntelTables};
pub use classify::{classify, FALLBACK_RISK};
pub use config::Config;
pub use error::SentinelError;
