//! Assemble command: build the forecast dataset and report its layout.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use hermes_dataset::{Dataset, ForecastFiles, NetcdfOpener, REFERENCE_TIME, Values};

use crate::cli::AssembleArgs;
use crate::config::HermesConfig;
use crate::convert;

/// Layout of an assembled dataset, written as JSON.
#[derive(Debug, Serialize)]
struct AssembleSummary {
    n_files: usize,
    dims: BTreeMap<String, usize>,
    reference_times: Vec<String>,
    coords: Vec<VariableSummary>,
    data_vars: Vec<VariableSummary>,
    chunks: Option<BTreeMap<String, usize>>,
}

#[derive(Debug, Serialize)]
struct VariableSummary {
    name: String,
    dims: Vec<String>,
    shape: Vec<usize>,
    kind: &'static str,
    n_missing: usize,
}

/// Run the forecast assembly.
pub fn run(args: AssembleArgs) -> Result<()> {
    let _cmd = info_span!("assemble").entered();

    // 1. Load optional TOML config and merge CLI flags
    let mut config = HermesConfig::load(args.config.as_deref())?;
    if args.no_forecast {
        config.assemble.forecast = false;
    }
    for spec in &args.chunks {
        let (dim, len) = convert::parse_chunk(spec)?;
        config.assemble.chunks.insert(dim, len);
    }
    let assemble_cfg = convert::build_assemble_config(&config.assemble);

    // 2. Assemble
    let files: ForecastFiles = args.files.into_iter().collect();
    info!(n_files = files.len(), forecast = assemble_cfg.forecast(), "assembling");
    let ds = files
        .open(&NetcdfOpener, &assemble_cfg)
        .context("failed to assemble forecast files")?;

    // 3. Report
    let json = serde_json::to_string_pretty(&summarize(&ds, files.len()))
        .context("failed to serialize summary")?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write summary: {}", path.display()))?;
            info!(path = %path.display(), "summary written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn summarize(ds: &Dataset, n_files: usize) -> AssembleSummary {
    let describe = |v: &hermes_dataset::Variable| VariableSummary {
        name: v.name().to_string(),
        dims: v.dims().to_vec(),
        shape: v.values().shape().to_vec(),
        kind: v.values().kind(),
        n_missing: match v.values() {
            Values::Float(x) => x.iter().filter(|f| f.is_nan()).count(),
            Values::Time(_) => 0,
        },
    };

    AssembleSummary {
        n_files,
        dims: ds.dims().iter().cloned().collect(),
        reference_times: ds
            .coord(REFERENCE_TIME)
            .and_then(|c| c.values().as_time())
            .map(|t| t.iter().map(|t| t.format("%Y-%m-%dT%H:%M:%S").to_string()).collect())
            .unwrap_or_default(),
        coords: ds.coords().iter().map(describe).collect(),
        data_vars: ds.data_vars().iter().map(describe).collect(),
        chunks: ds.chunks().cloned(),
    }
}
