//! # myorm
//!
//! A statement-first MySQL CRUD helper for Rust.
//!
//! ## Features
//!
//! - **Pure statement builders**: declarative filters, orderings, and value
//!   maps become parameterized SQL plus a positional argument list, with no
//!   I/O involved (use the [`stmt`] module directly for golden-output tests)
//! - **Pooled execution facade**: [`Client`] binds the builders to named
//!   `mysql_async` pools and normalizes results
//! - **Explicit construction**: configuration is passed at construction;
//!   there is no global instance
//! - **Observable**: a [`SqlLogger`] sees every statement before execution,
//!   a [`PoolMonitor`] sees every connection acquire/release pair
//! - **Safe under failure**: a connection is returned to its pool exactly
//!   once, before the caller observes success or failure
//!
//! ## Usage
//!
//! ```ignore
//! use myorm::{Client, Op, OrderBy, PoolConfig, Record, Where};
//!
//! let client = Client::single(PoolConfig::from_url("main", "mysql://app@localhost/prod"))?;
//!
//! // INSERT
//! let id = client
//!     .insert("users", Record::new().set("name", "alice").set("age", 30))
//!     .await?;
//!
//! // SELECT
//! let adults = client
//!     .select(
//!         "users",
//!         &["id", "name"],
//!         &Where::new().op("age", Op::gte(18)),
//!         Some(10),
//!         &OrderBy::new().desc("age"),
//!     )
//!     .await?;
//!
//! // UPDATE against a named pool
//! client
//!     .using("stats")
//!     .increment("counters", "hits", 1, &Where::new().eq("id", 7))
//!     .await?;
//! ```

pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod monitor;
pub mod order;
pub mod params;
pub mod pool;
pub mod record;
pub mod row;
pub mod stmt;

pub use client::{Client, Connection, ConnectionSource, PoolScope};
pub use condition::{Cond, Op, Where};
pub use config::{ClientConfig, PoolConfig};
pub use error::{DbError, DbResult};
pub use monitor::{NoopMonitor, PoolMonitor, SqlLogger, TracingLogger, TracingMonitor};
pub use order::{Dir, OrderBy};
pub use params::BindArgs;
pub use pool::PoolSet;
pub use record::{Assign, Assignments, Record};
pub use row::{QueryOutput, Row};
pub use stmt::Fragment;

// Re-export the driver's dynamic value type; it is the scalar currency of
// every builder and result in this crate.
pub use mysql_async::Value;
