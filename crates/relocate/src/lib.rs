//! # hermes-relocate
//!
//! Reorganise NWM forcing downloaded in the NOMADS layout into the
//! directory and filename convention WRF-Hydro reads as LDASIN input.
//!
//! ```text
//! <root>/nwm.20200601/forcing_medium_range/nwm.t00z.medium_range.forcing.f003.conus.nc
//!   -> <dest>/2020060100/2020060103.LDASIN_DOMAIN1
//! ```
//!
//! Day, member and file discovery use sorted glob results; names and times
//! come from `hermes-cycle`.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | [`RelocateConfig`] builder and [`OverwritePolicy`] |
//! | `discover` | [`ForcingSource`] and day/member/file globbing |
//! | `materialize` | Copy or symlink one file |
//! | `relocate` | [`relocate_forcing`] pipeline |
//! | `error` | Error types |

mod config;
mod discover;
mod error;
mod materialize;
mod relocate;

pub use config::{OverwritePolicy, RelocateConfig};
pub use discover::{ForcingSource, day_dirs, forcing_files, member_dirs};
pub use error::RelocateError;
pub use relocate::{RelocateSummary, relocate_forcing};
