//! Per-service in-memory caches.
//!
//! Each cache guards its state with a `tokio::sync::Mutex`. Locks are held
//! only for the map operation itself, never across a repository call, so two
//! concurrent misses on the same key both fetch and the later insert wins.
//!
//! - [`NodeCache`] - node id -> node, LRU-backed, optionally bounded
//! - [`PageCache`] - parent id -> cursor -> children page
//! - [`SingleSlotCache`] - the value of the most recently stored key

mod node_cache;
mod page_cache;
mod single_slot;

pub use node_cache::NodeCache;
pub use page_cache::PageCache;
pub use single_slot::SingleSlotCache;
