//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use hermes_cycle::RangeCategory;
use hermes_dataset::{AssembleConfig, ChunkHint, NccmpConfig};
use hermes_relocate::{ForcingSource, OverwritePolicy, RelocateConfig};

use crate::config::{AssembleToml, NasToml, RelocateToml};

/// Parses an overwrite policy name.
pub fn parse_overwrite(s: &str) -> Result<OverwritePolicy> {
    match s.to_lowercase().as_str() {
        "reject" => Ok(OverwritePolicy::Reject),
        "replace" => Ok(OverwritePolicy::Replace),
        other => bail!("unknown overwrite policy: {other:?} (expected reject or replace)"),
    }
}

/// Parses a `DIM=LEN` chunk specification.
pub fn parse_chunk(s: &str) -> Result<(String, usize)> {
    let Some((dim, len)) = s.split_once('=') else {
        bail!("chunk must be DIM=LEN, got {s:?}");
    };
    let dim = dim.trim();
    if dim.is_empty() {
        bail!("chunk dimension name is empty in {s:?}");
    }
    let len: usize = len
        .trim()
        .parse()
        .with_context(|| format!("invalid chunk length in {s:?}"))?;
    if len == 0 {
        bail!("chunk length must be positive in {s:?}");
    }
    Ok((dim.to_string(), len))
}

/// Builds an [`AssembleConfig`] from the TOML assemble section.
///
/// An empty chunk table means no hint.
pub fn build_assemble_config(assemble: &AssembleToml) -> AssembleConfig {
    let chunks: Option<ChunkHint> =
        (!assemble.chunks.is_empty()).then(|| assemble.chunks.clone());
    AssembleConfig::default()
        .with_forecast(assemble.forecast)
        .with_chunks(chunks)
}

/// Builds the forcing source and [`RelocateConfig`] from the TOML relocate
/// section.
pub fn build_relocate_config(relocate: &RelocateToml) -> Result<(ForcingSource, RelocateConfig)> {
    let source = match (&relocate.source, relocate.days.is_empty()) {
        (Some(_), false) => bail!("set either a source root or a list of day directories, not both"),
        (Some(root), true) => ForcingSource::Root(root.clone()),
        (None, false) => ForcingSource::Days(relocate.days.clone()),
        (None, true) => bail!("no forcing source: set [relocate].source or use --source/--days"),
    };
    let dest = relocate
        .dest
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no destination: set [relocate].dest or use --dest"))?;
    let range_name = relocate
        .range
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("no range: set [relocate].range or use --range"))?;
    let range: RangeCategory = range_name.parse()?;

    let cfg = RelocateConfig::new(dest, range)
        .with_copy(relocate.copy)
        .with_forc_type(relocate.forc_type)
        .with_overwrite(parse_overwrite(&relocate.overwrite)?);
    cfg.validate()?;
    Ok((source, cfg))
}

/// Builds an [`NccmpConfig`] from the TOML nas section.
pub fn build_nccmp_config(nas: &NasToml) -> Result<NccmpConfig> {
    let cfg = NccmpConfig::default().with_program(&nas.program);
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn overwrite_names() {
        assert_eq!(parse_overwrite("reject").unwrap(), OverwritePolicy::Reject);
        assert_eq!(parse_overwrite("Replace").unwrap(), OverwritePolicy::Replace);
        assert!(parse_overwrite("merge").is_err());
    }

    #[test]
    fn chunk_specs() {
        assert_eq!(parse_chunk("feature_id=1000").unwrap(), ("feature_id".into(), 1000));
        assert_eq!(parse_chunk(" time = 24 ").unwrap(), ("time".into(), 24));
        assert!(parse_chunk("time").is_err());
        assert!(parse_chunk("=5").is_err());
        assert!(parse_chunk("time=0").is_err());
        assert!(parse_chunk("time=x").is_err());
    }

    #[test]
    fn assemble_without_chunks() {
        let cfg = build_assemble_config(&AssembleToml::default());
        assert!(cfg.forecast());
        assert!(cfg.chunks().is_none());
    }

    #[test]
    fn relocate_requires_source_dest_range() {
        let mut toml = RelocateToml::default();
        assert!(build_relocate_config(&toml).is_err());
        toml.source = Some(PathBuf::from("/data"));
        assert!(build_relocate_config(&toml).is_err());
        toml.dest = Some(PathBuf::from("/out"));
        assert!(build_relocate_config(&toml).is_err());
        toml.range = Some("forcing_medium_range".into());

        let (source, cfg) = build_relocate_config(&toml).unwrap();
        assert_eq!(source, ForcingSource::Root(PathBuf::from("/data")));
        assert_eq!(cfg.range().to_string(), "medium_range");
        assert_eq!(cfg.overwrite(), OverwritePolicy::Reject);
    }

    #[test]
    fn relocate_rejects_bad_values() {
        let base = RelocateToml {
            source: Some(PathBuf::from("/data")),
            dest: Some(PathBuf::from("/out")),
            range: Some("medium_range".into()),
            ..RelocateToml::default()
        };
        let bad_range = RelocateToml {
            range: Some("long_range".into()),
            ..RelocateToml::default()
        };
        assert!(build_relocate_config(&RelocateToml { forc_type: 5, ..base }).is_err());
        assert!(build_relocate_config(&RelocateToml {
            source: Some(PathBuf::from("/data")),
            dest: Some(PathBuf::from("/out")),
            ..bad_range
        })
        .is_err());
    }

    #[test]
    fn relocate_source_is_exclusive() {
        let toml = RelocateToml {
            source: Some(PathBuf::from("/data")),
            days: vec![PathBuf::from("/data/nwm.20200601")],
            dest: Some(PathBuf::from("/out")),
            range: Some("medium_range".into()),
            ..RelocateToml::default()
        };
        assert!(build_relocate_config(&toml).is_err());
    }
}
