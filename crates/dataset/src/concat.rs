//! Concatenation along one dimension with the minimal-coordinate policy.
//!
//! Rules, applied in order:
//!
//! 1. Every member carries the same coordinate and data variable names.
//! 2. Dimensions indexed by a time-valued coordinate (other than the
//!    concatenation dimension) are outer-aligned: the union of the members'
//!    index values, sorted, unless all members already agree. Float data
//!    missing in a member is filled with NaN. An index that repeats a value
//!    cannot be aligned and is rejected.
//! 3. All other dimensions must have identical sizes.
//! 4. Coordinates spanning the concatenation dimension (or named like it)
//!    are concatenated; all other coordinates are taken from the first
//!    member and must be equal everywhere.
//! 5. Every data variable is concatenated; one lacking the dimension gains
//!    it as its leading axis.

use std::collections::{BTreeSet, HashMap};
use std::iter;

use chrono::NaiveDateTime;

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::variable::{Values, Variable};

#[derive(Clone, Copy)]
enum Role {
    Coord,
    Data,
}

impl Role {
    fn lookup(self, ds: &Dataset, name: &str) -> Option<&Variable> {
        match self {
            Role::Coord => ds.coord(name),
            Role::Data => ds.data_var(name),
        }
    }
}

/// Concatenates `parts` along `dim`, preserving member order.
///
/// If `dim` is not a dimension of the members it is created, with one entry
/// per member.
///
/// # Errors
///
/// Returns [`DatasetError::EmptyInput`] when `parts` is empty and
/// [`DatasetError::ConcatenationMismatch`] when members disagree on
/// variables, non-aligned dimension sizes, or non-concatenated coordinates.
pub fn concat(parts: &[Dataset], dim: &str) -> Result<Dataset, DatasetError> {
    if parts.is_empty() {
        return Err(DatasetError::EmptyInput);
    }
    let mismatch = |reason: String| DatasetError::ConcatenationMismatch {
        dim: dim.to_string(),
        reason,
    };

    check_same_names(parts).map_err(mismatch)?;
    let aligned = outer_align(parts, dim).map_err(mismatch)?;
    check_dims(&aligned, dim).map_err(mismatch)?;

    let first = &aligned[0];
    let total: usize = aligned.iter().map(|p| p.dim_len(dim).unwrap_or(1)).sum();

    let mut out = Dataset::new();
    if first.dim_len(dim).is_none() {
        out.add_dim(dim, total)?;
    }
    for (name, len) in first.dims() {
        out.add_dim(name.as_str(), if name == dim { total } else { *len })?;
    }

    for coord in first.coords() {
        if coord.axis_of(dim).is_some() || coord.name() == dim {
            out.add_coord(concat_variable(&aligned, coord, Role::Coord, dim).map_err(mismatch)?)?;
        } else {
            for (i, member) in aligned.iter().enumerate().skip(1) {
                if member.coord(coord.name()) != Some(coord) {
                    return Err(mismatch(format!(
                        "coordinate '{}' differs between member 0 and member {i}",
                        coord.name()
                    )));
                }
            }
            out.add_coord(coord.clone())?;
        }
    }

    for var in first.data_vars() {
        out.add_data_var(concat_variable(&aligned, var, Role::Data, dim).map_err(mismatch)?)?;
    }

    if let Some(hint) = first.chunks() {
        out = out.chunk(hint.clone());
    }
    Ok(out)
}

fn names(vars: &[Variable]) -> BTreeSet<&str> {
    vars.iter().map(Variable::name).collect()
}

fn check_same_names(parts: &[Dataset]) -> Result<(), String> {
    let coords = names(parts[0].coords());
    let data = names(parts[0].data_vars());
    for (i, member) in parts.iter().enumerate().skip(1) {
        let other_coords = names(member.coords());
        if other_coords != coords {
            return Err(format!(
                "member {i} has coordinates {other_coords:?} but member 0 has {coords:?}"
            ));
        }
        let other_data = names(member.data_vars());
        if other_data != data {
            return Err(format!(
                "member {i} has data variables {other_data:?} but member 0 has {data:?}"
            ));
        }
    }
    Ok(())
}

fn check_dims(parts: &[Dataset], dim: &str) -> Result<(), String> {
    let first = &parts[0];
    for (i, member) in parts.iter().enumerate().skip(1) {
        if first.dim_len(dim).is_some() != member.dim_len(dim).is_some() {
            return Err(format!(
                "dimension '{dim}' is present in only one of member 0 and member {i}"
            ));
        }
        for (name, len) in first.dims().iter().filter(|(n, _)| n != dim) {
            match member.dim_len(name) {
                Some(other) if other == *len => {}
                Some(other) => {
                    return Err(format!(
                        "dimension '{name}' has length {len} in member 0 but {other} in member {i}"
                    ));
                }
                None => return Err(format!("dimension '{name}' is missing from member {i}")),
            }
        }
        if let Some((extra, _)) = member
            .dims()
            .iter()
            .find(|(n, _)| first.dim_len(n).is_none())
        {
            return Err(format!("dimension '{extra}' is missing from member 0"));
        }
    }
    Ok(())
}

/// Time index values of dimension `d` in `ds`, if it has a time-valued
/// dimension coordinate.
fn time_index<'a>(ds: &'a Dataset, d: &str) -> Option<&'a [NaiveDateTime]> {
    ds.coord(d)
        .filter(|c| c.is_index())
        .and_then(|c| c.values().as_time())
        .and_then(|a| a.as_slice())
}

fn outer_align(parts: &[Dataset], dim: &str) -> Result<Vec<Dataset>, String> {
    let mut aligned = parts.to_vec();

    for (d, _) in parts[0].dims().iter().filter(|(n, _)| n != dim) {
        if time_index(&parts[0], d).is_none() {
            continue;
        }

        let mut indexes = Vec::with_capacity(parts.len());
        for (i, member) in parts.iter().enumerate() {
            let index = time_index(member, d)
                .ok_or_else(|| format!("member {i} has no time index for dimension '{d}'"))?;
            indexes.push(index);
        }
        if indexes.iter().all(|ix| *ix == indexes[0]) {
            continue;
        }

        let mut positions = Vec::with_capacity(indexes.len());
        for (i, index) in indexes.iter().enumerate() {
            let mut lookup = HashMap::with_capacity(index.len());
            for (j, t) in index.iter().enumerate() {
                if lookup.insert(*t, j).is_some() {
                    return Err(format!(
                        "index '{d}' of member {i} holds {t} more than once"
                    ));
                }
            }
            positions.push(lookup);
        }

        let mut union: Vec<NaiveDateTime> = indexes.iter().flat_map(|ix| ix.iter().copied()).collect();
        union.sort();
        union.dedup();

        for (i, member) in aligned.iter_mut().enumerate() {
            let mapping: Vec<Option<usize>> =
                union.iter().map(|t| positions[i].get(t).copied()).collect();
            *member = reindex(member, d, &union, &mapping)
                .map_err(|e| format!("aligning '{d}' in member {i}: {e}"))?;
        }
    }

    Ok(aligned)
}

/// Reindexes `ds` along the time-indexed dimension `d` onto `target`, taking
/// lane `mapping[k]` of the source for target entry `k`.
fn reindex(
    ds: &Dataset,
    d: &str,
    target: &[NaiveDateTime],
    mapping: &[Option<usize>],
) -> Result<Dataset, String> {
    let mut out = Dataset::new();
    for (name, len) in ds.dims() {
        let len = if name == d { target.len() } else { *len };
        out.add_dim(name.as_str(), len).map_err(|e| e.to_string())?;
    }

    let remap = |var: &Variable| -> Result<Variable, String> {
        if var.name() == d && var.is_index() {
            return Ok(Variable::new(d, vec![d], Values::from(target.to_vec())));
        }
        let Some(axis) = var.axis_of(d) else {
            return Ok(var.clone());
        };
        let values = var.values().reindex_axis(axis, mapping).ok_or_else(|| {
            format!("cannot fill missing entries of time-valued variable '{}'", var.name())
        })?;
        Ok(Variable::new(var.name(), var.dims().to_vec(), values))
    };

    for coord in ds.coords() {
        out.add_coord(remap(coord)?).map_err(|e| e.to_string())?;
    }
    for var in ds.data_vars() {
        out.add_data_var(remap(var)?).map_err(|e| e.to_string())?;
    }
    if let Some(hint) = ds.chunks() {
        out = out.chunk(hint.clone());
    }
    Ok(out)
}

fn concat_variable(
    parts: &[Dataset],
    template: &Variable,
    role: Role,
    dim: &str,
) -> Result<Variable, String> {
    let name = template.name();
    let has_dim = template.axis_of(dim).is_some();

    let mut pieces = Vec::with_capacity(parts.len());
    for (i, member) in parts.iter().enumerate() {
        let var = role
            .lookup(member, name)
            .ok_or_else(|| format!("variable '{name}' is missing from member {i}"))?;
        if var.dims() != template.dims() {
            return Err(format!(
                "variable '{name}' has dimensions {:?} in member {i} but {:?} in member 0",
                var.dims(),
                template.dims()
            ));
        }
        if var.values().kind() != template.values().kind() {
            return Err(format!(
                "variable '{name}' holds {} values in member {i} but {} in member 0",
                var.values().kind(),
                template.values().kind()
            ));
        }

        if has_dim {
            pieces.push(var.values().clone());
        } else {
            let n = member.dim_len(dim).unwrap_or(1);
            let stacked = var
                .values()
                .with_leading_axis(n)
                .ok_or_else(|| format!("cannot broadcast '{name}' of member {i} along '{dim}'"))?;
            pieces.push(stacked);
        }
    }

    let axis = template.axis_of(dim).unwrap_or(0);
    let dims: Vec<String> = if has_dim {
        template.dims().to_vec()
    } else {
        iter::once(dim.to_string())
            .chain(template.dims().iter().cloned())
            .collect()
    };
    let values = Values::concatenate(&pieces, axis)
        .map_err(|e| format!("variable '{name}': {e}"))?;
    Ok(Variable::new(name, dims, values))
}
