//! Common utilities and shared types for the Bandhan dispute engine.
//!
//! This crate provides foundational components used across all bandhan crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based identifiers via [`IdGenerator`] and
//!   human-readable dispute IDs via [`DisputeIdFormat`]
//! - **Logging**: Tracing subscriber setup via [`logging::init`]
//! - **Metrics**: Engine counters via [`Metrics`]
//! - **Storage**: Key-value backends (memory, filesystem, Redis)
//!
//! # Example
//!
//! ```no_run
//! use bandhan_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {} in region {}", id, config.disputes.region);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod logging;
pub mod metrics;
pub mod redis_store;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::{DisputeIdFormat, IdGenerator};
pub use metrics::{Metrics, MetricsSnapshot, get_metrics};
pub use redis_store::RedisStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
