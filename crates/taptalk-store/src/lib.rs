//! Filesystem artifact store for taptalk.
//!
//! Persists audio clips as one file per phrase key under a configurable
//! root directory. Publication is atomic: payloads are written to a
//! temporary file in the destination directory, synced, and renamed into
//! place, so a concurrent `exists`/`read` for the same key never observes
//! a partially written payload.

#![deny(unused_crate_dependencies)]

mod fs_store;

pub use fs_store::{FsArtifactStore, FsStoreConfig};
