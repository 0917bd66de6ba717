//! # hermes-cycle
//!
//! Pure time arithmetic and naming rules for NWM forcing files.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["nwm.YYYYMMDD"] -->|"parse_day_dir()"| B["NaiveDate"]
//!     C["nwm.t06z.short_range.forcing.f003.conus.nc"] -->|"ForcingFileName::parse()"| D["(init_hour, cast_value)"]
//!     B --> E["cycle_times()"]
//!     D --> E
//!     F["RangeCategory"] -->|"lead sign"| E
//!     E -->|"init"| G["init_dir_name() -> YYYYMMDDHH"]
//!     E -->|"valid"| H["ForcType::file_name() -> YYYYMMDDHH[00].LDASIN_DOMAIN1"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hermes_cycle::{ForcType, ForcingFileName, RangeCategory, cycle_times, parse_day_dir};
//!
//! let day = parse_day_dir("nwm.20200601").unwrap();
//! let range: RangeCategory = "medium_range".parse().unwrap();
//! let name = ForcingFileName::parse("nwm.t00z.medium_range.forcing.f003.conus.nc").unwrap();
//! let times = cycle_times(day, &name, range).unwrap();
//! assert_eq!(ForcType::Hourly.file_name(times.valid), "2020060103.LDASIN_DOMAIN1");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `range` | Range categories, globs and lead-time sign |
//! | `day` | `nwm.YYYYMMDD` day-directory names |
//! | `filename` | Encoded init hour / cast value in forcing filenames |
//! | `times` | Init and valid time computation |
//! | `naming` | LDASIN destination directory and file names |
//! | `error` | Error types |

mod day;
mod error;
mod filename;
mod naming;
mod range;
mod times;

pub use day::{DAY_DIR_GLOB, day_dir_name, parse_day_dir};
pub use error::CycleError;
pub use filename::{CAST_VALUE_FIELD, ForcingFileName, INIT_HOUR_FIELD};
pub use naming::{ForcType, LDASIN_SUFFIX, init_dir_name};
pub use range::{Product, RangeCategory};
pub use times::{CycleTimes, cycle_times};
