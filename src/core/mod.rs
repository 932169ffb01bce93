/*!
 * Core Module
 * Shared error types, constants, guards and configuration
 */

pub mod config;
pub mod errors;
pub mod guard;
pub mod limits;

pub use config::TimerctlConfig;
pub use errors::{ErrorKind, TimerError, TimerResult};
pub use guard::{Guard, GuardDrop, GuardError, GuardMetadata, GuardResult};
