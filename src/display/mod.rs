//! Display helpers used when projecting entries into tree nodes.
//!
//! - [`format`] - byte sizes and en-US date/time strings
//! - [`icons`] - icon ids and sprite sheet URLs

pub mod format;
pub mod icons;

pub use icons::IconSet;
