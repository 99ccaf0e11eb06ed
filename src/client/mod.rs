//! The repository API client seam.
//!
//! The tree and fields services never talk to the network themselves; they
//! go through [`RepositoryClient`]. Two implementations exist:
//!
//! - a real HTTP client, supplied by the embedding application
//! - [`MemoryRepositoryClient`] - an in-memory repository for tests, with
//!   call counters and failure injection

mod memory_client;
mod repository_client;

pub use memory_client::{ClientOperation, MemoryRepositoryClient};
pub use repository_client::{
    ACCESS_DENIED_ERROR_CODE, ClientError, CreateEntryRequest, EntryListing, FindEntryResult,
    ListEntriesRequest, RepositoryClient, Result,
};
