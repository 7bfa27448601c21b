//! Core types for the Docket document store.
//!
//! A document is a metadata record plus the artifacts derived from it on disk
//! (the original upload and its thumbnail). This crate owns the rules that
//! keep the two consistent: artifact paths are recomputed from the record,
//! public filenames are derived from metadata alone, and artifact cleanup
//! runs once per deleted record.
//!
//! This crate is deliberately free of database and CLI dependencies.

pub mod artifact;
pub mod document;
pub mod error;
pub mod filename;
pub mod lifecycle;
pub mod mime;
pub mod paths;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
pub(crate) mod testing;
