//! Namelist values and loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::tree::Tree;

/// A namelist entry value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Unset.
    Null,
    /// Logical flag.
    Bool(bool),
    /// Integer option.
    Int(i64),
    /// Real option.
    Float(f64),
    /// Text, usually a file path.
    Str(String),
    /// Array option.
    List(Vec<Scalar>),
}

impl Scalar {
    /// The text, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }
}

/// A parsed namelist: sections of named entries.
pub type Namelist = Tree<Scalar>;

/// Reads a namelist stored as JSON.
///
/// # Errors
///
/// Returns [`AuditError::Io`] if the file cannot be read and
/// [`AuditError::Parse`] if it is not a JSON mapping.
pub fn read_namelist(path: &Path) -> Result<Namelist, AuditError> {
    let text = fs::read_to_string(path).map_err(|e| AuditError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let parse = |reason: String| AuditError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let nlst: Namelist = serde_json::from_str(&text).map_err(|e| parse(e.to_string()))?;
    match nlst {
        Tree::Node(_) => Ok(nlst),
        Tree::Leaf(_) => Err(parse("top level must be a mapping".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scalars_from_json() {
        let nlst: Namelist = serde_json::from_str(
            r#"{"hydro_nlist": {"geo_static_flnm": "DOMAIN/geo_em.d01.nc",
                                "udmp_opt": 0, "dxrt": 250.0, "out_dt": null,
                                "chrtout_domain": true, "ids": [1, 2]}}"#,
        )
        .unwrap();
        assert_eq!(
            nlst.leaf(&["hydro_nlist", "geo_static_flnm"]).and_then(Scalar::as_str),
            Some("DOMAIN/geo_em.d01.nc")
        );
        assert_eq!(nlst.leaf(&["hydro_nlist", "udmp_opt"]).and_then(Scalar::as_int), Some(0));
        assert_eq!(nlst.leaf(&["hydro_nlist", "dxrt"]), Some(&Scalar::Float(250.0)));
        assert_eq!(nlst.leaf(&["hydro_nlist", "out_dt"]), Some(&Scalar::Null));
        assert_eq!(nlst.leaf(&["hydro_nlist", "chrtout_domain"]), Some(&Scalar::Bool(true)));
        assert_eq!(
            nlst.leaf(&["hydro_nlist", "ids"]),
            Some(&Scalar::List(vec![Scalar::Int(1), Scalar::Int(2)]))
        );
    }

    #[test]
    fn read_rejects_non_mapping() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "42").unwrap();
        assert!(matches!(read_namelist(&path), Err(AuditError::Parse { .. })));
    }

    #[test]
    fn read_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            read_namelist(&tmp.path().join("nope.json")),
            Err(AuditError::Io { .. })
        ));
    }
}
