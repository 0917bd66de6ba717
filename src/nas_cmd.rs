//! NAs command: run nccmp on each file and print its findings.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use hermes_dataset::{NaReport, check_file_nas};

use crate::cli::NasArgs;
use crate::config::HermesConfig;
use crate::convert;

/// Run the NA audit.
pub fn run(args: NasArgs) -> Result<()> {
    let _cmd = info_span!("nas").entered();

    let mut config = HermesConfig::load(args.config.as_deref())?;
    if let Some(program) = args.nccmp {
        config.nas.program = program;
    }
    let nccmp = convert::build_nccmp_config(&config.nas)?;

    let mut n_with_nas = 0;
    for path in &args.files {
        let report = check_file_nas(path, &nccmp)
            .with_context(|| format!("NA check failed for {}", path.display()))?;
        match report {
            None => info!(path = %path.display(), "no NA values"),
            Some(NaReport::Table(rows)) => {
                n_with_nas += 1;
                println!("{}: {} difference(s)", path.display(), rows.len());
                for row in rows {
                    println!("  {}", row.join(" | "));
                }
            }
            Some(NaReport::Raw(text)) => {
                n_with_nas += 1;
                println!("{}:\n{}", path.display(), text.trim_end());
            }
        }
    }

    info!(n_files = args.files.len(), n_with_nas, "NA check finished");
    Ok(())
}
