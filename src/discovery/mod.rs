//! Filesystem-side discovery: finding the repository root, mirroring its
//! directory layout, and pulling remote URLs out of the local config.
//!
//! - `fs`: the `FsReader` seam and its `std::fs` implementation
//! - `locator`: `RootLocator`
//! - `topology`: `TopologyBuilder`
//! - `config_urls`: `extract_urls`

pub mod config_urls;
pub mod fs;
pub mod locator;
pub mod topology;

pub use config_urls::extract_urls;
pub use fs::{DirEntryInfo, EntryKind, FsReader, LocalFs};
pub use locator::RootLocator;
pub use topology::TopologyBuilder;
