//! Shortlist / top-k limit resolution.
//!
//! Limits are tuning knobs, so resolution favours availability: a missing or
//! malformed configuration never surfaces an error, it degrades to defaults.
//! [`LimitResolver`] memoizes results per `(tag, source)`.

pub mod cache;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use cache::LimitResolver;
pub use resolver::{LimitsSource, RetrievalLimits, resolve_limits};
