/*!
 * Signals Module
 * Signal name catalog and identifier resolution
 */

pub mod catalog;
mod resolver;
pub mod types;

// Re-export public API
pub use catalog::{lookup, rt_range};
pub use resolver::{real_time_signal_index, resolve};
pub use types::SignalId;
