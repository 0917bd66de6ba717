//! # hermes-audit
//!
//! Pre-run checks for a WRF-Hydro simulation directory: do the files the
//! namelists point at exist, and in what order were outputs written.
//!
//! Namelists are modelled as a [`Tree`] of [`Scalar`] leaves and loaded
//! from JSON with [`read_namelist`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `tree` | Generic nested map with visit / map / filter / path lookup |
//! | `namelist` | Namelist values and JSON loading |
//! | `inputs` | [`check_input_files`] and its options |
//! | `files` | Colon-tolerant lookup and mtime sorting |
//! | `error` | Error types |

mod error;
mod files;
mod inputs;
mod namelist;
mod tree;

pub use error::AuditError;
pub use files::{find_with_colon_fallback, sort_files_by_time};
pub use inputs::{AuditConfig, AuditReport, MissingFile, NamelistKind, check_input_files};
pub use namelist::{Namelist, Scalar, read_namelist};
pub use tree::Tree;
