//! Audit command: namelist input-file existence check.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hermes_audit::{AuditConfig, check_input_files, read_namelist};

use crate::cli::AuditArgs;

/// Run the input-file audit.
pub fn run(args: AuditArgs) -> Result<()> {
    let _cmd = info_span!("audit").entered();

    let hydro = read_namelist(&args.hydro)
        .with_context(|| format!("failed to load hydro namelist: {}", args.hydro.display()))?;
    let hrldas = read_namelist(&args.hrldas)
        .with_context(|| format!("failed to load hrldas namelist: {}", args.hrldas.display()))?;

    let audit_cfg = AuditConfig::default()
        .with_ignore_restarts(args.ignore_restarts)
        .with_warn_only(args.warn_only);

    let report = check_input_files(&hydro, &hrldas, &args.sim_dir, &audit_cfg)
        .with_context(|| format!("input check failed in {}", args.sim_dir.display()))?;

    for missing in &report.missing {
        info!(
            entry = %missing.entry.join("."),
            value = %missing.value,
            exempt = missing.exempt,
            "missing input file"
        );
    }
    println!(
        "checked {} file(s), {} missing ({} exempt)",
        report.checked,
        report.missing.len(),
        report.missing.iter().filter(|m| m.exempt).count()
    );
    Ok(())
}
