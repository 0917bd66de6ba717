//! Existence audit of the files a pair of namelists refers to.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::AuditError;
use crate::files::find_with_colon_fallback;
use crate::namelist::{Namelist, Scalar};
use crate::tree::Tree;

/// Entries whose value may carry `:` that the filesystem stored as `_`.
const COLON_ENTRIES: [[&str; 2]; 2] = [
    ["hydro_nlist", "restart_file"],
    ["nudging_nlist", "nudginglastobsfile"],
];

/// Keys never reported as missing.
const ALWAYS_EXEMPT: [&str; 2] = ["nudginglastobsfile", "timeslicepath"];

/// Restart keys exempted when restarts are ignored.
const RESTART_KEYS: [&str; 3] = ["restart_file", "nudginglastobsfile", "restart_filename_requested"];

/// Options for [`check_input_files`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditConfig {
    ignore_restarts: bool,
    warn_only: bool,
}

impl AuditConfig {
    /// Do not require restart files to exist.
    pub fn with_ignore_restarts(mut self, ignore: bool) -> Self {
        self.ignore_restarts = ignore;
        self
    }

    /// Log missing files instead of failing.
    pub fn with_warn_only(mut self, warn_only: bool) -> Self {
        self.warn_only = warn_only;
        self
    }

    /// Whether restart files are ignored.
    pub fn ignore_restarts(&self) -> bool {
        self.ignore_restarts
    }

    /// Whether missing files only produce warnings.
    pub fn warn_only(&self) -> bool {
        self.warn_only
    }
}

/// Which namelist an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamelistKind {
    /// The land-model (`namelist.hrldas`) namelist.
    Hrldas,
    /// The routing (`hydro.namelist`) namelist.
    Hydro,
}

/// A file named in a namelist that was not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFile {
    /// Source namelist.
    pub namelist: NamelistKind,
    /// Section and key, e.g. `["hydro_nlist", "geo_static_flnm"]`.
    pub entry: Vec<String>,
    /// The listed path.
    pub value: String,
    /// Whether the entry is exempt under the current configuration.
    pub exempt: bool,
}

impl MissingFile {
    fn message(&self) -> String {
        let key = self.entry.last().map(String::as_str).unwrap_or_default();
        format!("the namelist file {key} = {} does not exist", self.value)
    }
}

/// Outcome of a successful audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// Number of file entries checked.
    pub checked: usize,
    /// Missing entries: exempt ones, plus all of them in warn-only mode.
    pub missing: Vec<MissingFile>,
}

/// Checks that every file path listed in the two namelists exists under
/// `sim_dir`.
///
/// Only non-empty string entries are treated as files. The hydro restart
/// file and the nudging last-observation file are also looked up with `:`
/// replaced by `_`. Exempt entries:
///
/// - `nudginglastobsfile`, `timeslicepath` always;
/// - `udmap_file` when `hydro_nlist.udmp_opt` is 0;
/// - `restart_filename_requested` when `wrf_hydro_offline.forc_typ` is 9 or 10;
/// - `restart_file`, `nudginglastobsfile`, `restart_filename_requested` when
///   restarts are ignored.
///
/// # Errors
///
/// Returns [`AuditError::MissingFiles`] listing every missing non-exempt
/// file, unless `config.warn_only()` is set.
pub fn check_input_files(
    hydro: &Namelist,
    hrldas: &Namelist,
    sim_dir: &Path,
    config: &AuditConfig,
) -> Result<AuditReport, AuditError> {
    let exempt = exempt_keys(hydro, hrldas, config);

    let mut report = AuditReport::default();
    for (kind, nlst) in [(NamelistKind::Hrldas, hrldas), (NamelistKind::Hydro, hydro)] {
        let Some(files) = file_entries(nlst) else {
            continue;
        };
        files.visit(|path, value| {
            report.checked += 1;
            if entry_exists(sim_dir, path, value) {
                debug!(entry = %path.join("."), value = %value, "input file present");
                return;
            }
            let key = path.last().copied().unwrap_or_default();
            report.missing.push(MissingFile {
                namelist: kind,
                entry: path.iter().map(|s| s.to_string()).collect(),
                value: value.clone(),
                exempt: exempt.iter().any(|k| *k == key),
            });
        });
    }

    let fatal: Vec<String> = report
        .missing
        .iter()
        .filter(|m| !m.exempt)
        .map(MissingFile::message)
        .collect();
    if !fatal.is_empty() {
        if !config.warn_only() {
            return Err(AuditError::MissingFiles {
                count: fatal.len(),
                details: fatal.join("; "),
            });
        }
        for message in &fatal {
            warn!("{message}");
        }
    }
    report.missing.retain(|m| m.exempt || config.warn_only());
    Ok(report)
}

/// Non-empty string entries of `nlst`; `None` when there are none.
fn file_entries(nlst: &Namelist) -> Option<Tree<String>> {
    nlst.filter(|_, v| v.as_str().is_some_and(|s| !s.is_empty()))
        .map(|t| t.map(|_, v| v.as_str().unwrap_or_default().to_string()))
}

fn entry_exists(sim_dir: &Path, path: &[&str], value: &str) -> bool {
    if COLON_ENTRIES.iter().any(|e| e.as_slice() == path) {
        return find_with_colon_fallback(sim_dir, value).is_some();
    }
    sim_dir.join(PathBuf::from(value)).exists()
}

fn exempt_keys(hydro: &Namelist, hrldas: &Namelist, config: &AuditConfig) -> Vec<&'static str> {
    let mut keys = ALWAYS_EXEMPT.to_vec();
    if hydro.leaf(&["hydro_nlist", "udmp_opt"]).and_then(Scalar::as_int) == Some(0) {
        keys.push("udmap_file");
    }
    if matches!(
        hrldas.leaf(&["wrf_hydro_offline", "forc_typ"]).and_then(Scalar::as_int),
        Some(9 | 10)
    ) {
        keys.push("restart_filename_requested");
    }
    if config.ignore_restarts() {
        keys.extend(RESTART_KEYS);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nlst(json: &str) -> Namelist {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn file_entries_keep_non_empty_strings() {
        let n = nlst(
            r#"{"hydro_nlist": {"a": "x.nc", "b": "", "c": 3, "d": null},
                "empty": {"e": ""}, "numbers": {"n": 1}}"#,
        );
        let files = file_entries(&n).unwrap();
        assert_eq!(files.leaf(&["hydro_nlist", "a"]).map(String::as_str), Some("x.nc"));
        assert!(files.get_path(&["hydro_nlist", "b"]).is_none());
        assert!(files.get_path(&["empty"]).is_none());
        assert!(files.get_path(&["numbers"]).is_none());
    }

    #[test]
    fn exemptions_depend_on_options() {
        let hydro = nlst(r#"{"hydro_nlist": {"udmp_opt": 0}}"#);
        let hrldas = nlst(r#"{"wrf_hydro_offline": {"forc_typ": 9}}"#);
        let keys = exempt_keys(&hydro, &hrldas, &AuditConfig::default());
        assert!(keys.contains(&"udmap_file"));
        assert!(keys.contains(&"restart_filename_requested"));
        assert!(!keys.contains(&"restart_file"));

        let hydro = nlst(r#"{"hydro_nlist": {"udmp_opt": 1}}"#);
        let hrldas = nlst(r#"{"wrf_hydro_offline": {"forc_typ": 1}}"#);
        let keys = exempt_keys(&hydro, &hrldas, &AuditConfig::default());
        assert_eq!(keys, ALWAYS_EXEMPT.to_vec());

        let keys = exempt_keys(&hydro, &hrldas, &AuditConfig::default().with_ignore_restarts(true));
        assert!(keys.contains(&"restart_file"));
        assert!(keys.contains(&"restart_filename_requested"));
    }
}
