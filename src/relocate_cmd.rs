//! Relocate command: NOMADS forcing -> LDASIN tree.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hermes_relocate::relocate_forcing;

use crate::cli::RelocateArgs;
use crate::config::HermesConfig;
use crate::convert;

/// Run the forcing relocation.
pub fn run(args: RelocateArgs) -> Result<()> {
    let _cmd = info_span!("relocate").entered();

    // 1. Load optional TOML config; CLI flags override config values
    let mut config = HermesConfig::load(args.config.as_deref())?;
    let toml = &mut config.relocate;
    if let Some(source) = args.source {
        toml.source = Some(source);
        toml.days.clear();
    }
    if !args.days.is_empty() {
        toml.days = args.days;
        toml.source = None;
    }
    if let Some(dest) = args.dest {
        toml.dest = Some(dest);
    }
    if let Some(range) = args.range {
        toml.range = Some(range);
    }
    if args.copy {
        toml.copy = true;
    }
    if let Some(forc_type) = args.forc_type {
        toml.forc_type = forc_type;
    }
    if let Some(overwrite) = args.overwrite {
        toml.overwrite = overwrite;
    }

    // 2. Build and run
    let (source, relocate_cfg) = convert::build_relocate_config(toml)?;
    let summary = relocate_forcing(&source, &relocate_cfg).with_context(|| {
        format!(
            "failed to relocate forcing into {}",
            relocate_cfg.dest().display()
        )
    })?;

    info!(
        days = summary.days,
        members = summary.members,
        files = summary.files,
        init_dirs = summary.init_dirs,
        "relocation finished"
    );
    println!(
        "placed {} file(s) in {} init director{} from {} day director{}",
        summary.files,
        summary.init_dirs,
        if summary.init_dirs == 1 { "y" } else { "ies" },
        summary.days,
        if summary.days == 1 { "y" } else { "ies" },
    );
    Ok(())
}
