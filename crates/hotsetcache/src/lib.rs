//! # hotsetcache
//!
//! Concurrent per-key working-set cache with bounded LRU recency lists.
//!
//! ## Architecture
//! - **Key table**: AHash map behind a narrow RwLock, one list per key
//! - **Recency list**: arena-backed doubly-linked list for O(1) promotion
//!   and eviction, duplicate-free by value equality
//! - **Locking**: one exclusive lock per key's list; distinct keys proceed
//!   fully in parallel

#![warn(missing_docs)]

mod cache;
mod error;
mod list;
mod stats;

pub use cache::HotSetCache;
pub use error::{Error, Result};
pub use stats::CacheStats;
