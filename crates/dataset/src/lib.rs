//! # hermes-dataset
//!
//! Assemble per-file NWM / WRF-Hydro output into one dataset indexed by
//! forecast cycle (`reference_time`) and lead time (`time`).
//!
//! Files are opened through the [`DatasetOpener`] collaborator
//! ([`NetcdfOpener`] for real files), grouped by reference time in
//! first-seen order, concatenated along lead time within each group and
//! along reference time across groups, using the minimal-coordinate policy
//! described in [`concat`].

mod assemble;
mod collection;
mod concat;
mod dataset;
mod error;
mod nas;
mod netcdf_read;
mod opener;
mod variable;

pub use assemble::{
    AssembleConfig, ForecastGroups, LEAD_TIME, REFERENCE_TIME, assemble_forecast,
    group_by_reference_time, sentinel_reference_time,
};
pub use collection::{ForecastFiles, StaticFile};
pub use concat::concat;
pub use dataset::{ChunkHint, Dataset};
pub use error::DatasetError;
pub use nas::{NaReport, NccmpConfig, check_file_nas};
pub use netcdf_read::NetcdfOpener;
pub use opener::DatasetOpener;
pub use variable::{Values, Variable};
