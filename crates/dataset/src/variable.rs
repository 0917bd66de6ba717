//! Named, dimensioned arrays.

use chrono::NaiveDateTime;
use ndarray::{Array1, ArrayD, Axis, IxDyn};

use crate::error::DatasetError;

/// N-dimensional values of a variable, one axis per dimension name.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// Numeric values; missing entries are NaN.
    Float(ArrayD<f64>),
    /// Decoded time instants.
    Time(ArrayD<NaiveDateTime>),
}

impl Values {
    /// Numeric values laid out row-major in `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Shape`] if `data` does not fill `shape`.
    pub fn float(shape: &[usize], data: Vec<f64>) -> Result<Self, DatasetError> {
        Ok(Values::Float(ArrayD::from_shape_vec(IxDyn(shape), data)?))
    }

    /// Time values laid out row-major in `shape`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Shape`] if `data` does not fill `shape`.
    pub fn time(shape: &[usize], data: Vec<NaiveDateTime>) -> Result<Self, DatasetError> {
        Ok(Values::Time(ArrayD::from_shape_vec(IxDyn(shape), data)?))
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        match self {
            Values::Float(a) => a.len(),
            Values::Time(a) => a.len(),
        }
    }

    /// Returns `true` when no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Axis lengths.
    pub fn shape(&self) -> &[usize] {
        match self {
            Values::Float(a) => a.shape(),
            Values::Time(a) => a.shape(),
        }
    }

    /// Short name of the value kind, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Values::Float(_) => "float",
            Values::Time(_) => "time",
        }
    }

    /// Numeric values, if this is a float array.
    pub fn as_float(&self) -> Option<&ArrayD<f64>> {
        match self {
            Values::Float(a) => Some(a),
            Values::Time(_) => None,
        }
    }

    /// Time values, if this is a time array.
    pub fn as_time(&self) -> Option<&ArrayD<NaiveDateTime>> {
        match self {
            Values::Time(a) => Some(a),
            Values::Float(_) => None,
        }
    }

    /// Repeats the whole array `n` times along a new leading axis.
    pub(crate) fn with_leading_axis(&self, n: usize) -> Option<Values> {
        match self {
            Values::Float(a) => broadcast_leading(a, n).map(Values::Float),
            Values::Time(a) => broadcast_leading(a, n).map(Values::Time),
        }
    }

    /// Joins `pieces` along `axis`. All pieces must be of the same kind.
    pub(crate) fn concatenate(pieces: &[Values], axis: usize) -> Result<Values, String> {
        let Some(first) = pieces.first() else {
            return Err("nothing to concatenate".to_string());
        };
        let mixed = || "members mix float and time values".to_string();
        let joined = match first {
            Values::Float(_) => {
                let views = pieces
                    .iter()
                    .map(|p| p.as_float().map(|a| a.view()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(mixed)?;
                ndarray::concatenate(Axis(axis), &views).map(Values::Float)
            }
            Values::Time(_) => {
                let views = pieces
                    .iter()
                    .map(|p| p.as_time().map(|a| a.view()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(mixed)?;
                ndarray::concatenate(Axis(axis), &views).map(Values::Time)
            }
        };
        joined.map_err(|e| e.to_string())
    }

    /// Picks lanes along `axis` by `mapping`; `None` lanes are NaN-filled.
    ///
    /// Returns `None` when a time array would need filling.
    pub(crate) fn reindex_axis(&self, axis: usize, mapping: &[Option<usize>]) -> Option<Values> {
        match self {
            Values::Float(a) => reindex_lanes(a, axis, mapping, Some(f64::NAN)).map(Values::Float),
            Values::Time(a) => reindex_lanes(a, axis, mapping, None).map(Values::Time),
        }
    }

    fn into_standard_layout(self) -> Values {
        match self {
            Values::Float(a) if !a.is_standard_layout() => {
                Values::Float(a.as_standard_layout().into_owned())
            }
            Values::Time(a) if !a.is_standard_layout() => {
                Values::Time(a.as_standard_layout().into_owned())
            }
            other => other,
        }
    }
}

impl From<Vec<f64>> for Values {
    fn from(data: Vec<f64>) -> Self {
        Values::Float(Array1::from(data).into_dyn())
    }
}

impl From<Vec<NaiveDateTime>> for Values {
    fn from(data: Vec<NaiveDateTime>) -> Self {
        Values::Time(Array1::from(data).into_dyn())
    }
}

fn broadcast_leading<A: Clone>(a: &ArrayD<A>, n: usize) -> Option<ArrayD<A>> {
    let mut shape = Vec::with_capacity(a.ndim() + 1);
    shape.push(n);
    shape.extend_from_slice(a.shape());
    a.view()
        .insert_axis(Axis(0))
        .broadcast(IxDyn(&shape))
        .map(|v| v.to_owned())
}

fn reindex_lanes<A: Clone>(
    a: &ArrayD<A>,
    axis: usize,
    mapping: &[Option<usize>],
    fill: Option<A>,
) -> Option<ArrayD<A>> {
    if let Some(indices) = mapping.iter().copied().collect::<Option<Vec<usize>>>() {
        return Some(a.select(Axis(axis), &indices));
    }
    let mut shape = a.shape().to_vec();
    shape[axis] = mapping.len();
    let mut out = ArrayD::from_elem(IxDyn(&shape), fill?);
    for (lane, source) in mapping.iter().enumerate() {
        if let Some(j) = source {
            out.index_axis_mut(Axis(axis), lane)
                .assign(&a.index_axis(Axis(axis), *j));
        }
    }
    Some(out)
}

/// A named array with an ordered list of dimension names.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    dims: Vec<String>,
    values: Values,
}

impl Variable {
    /// Creates a variable. Shape checks happen when it is added to a
    /// [`Dataset`](crate::Dataset).
    pub fn new<S: Into<String>>(name: impl Into<String>, dims: Vec<S>, values: Values) -> Self {
        Self {
            name: name.into(),
            dims: dims.into_iter().map(Into::into).collect(),
            values: values.into_standard_layout(),
        }
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimension names, slowest-varying first.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Stored values, always in standard (row-major) layout.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Position of `dim` in this variable's dimensions.
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Returns `true` for a dimension coordinate: one dimension, named like
    /// the variable.
    pub fn is_index(&self) -> bool {
        self.dims.len() == 1 && self.dims[0] == self.name
    }

    pub(crate) fn set_values(&mut self, values: Values) {
        self.values = values.into_standard_layout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use ndarray::{arr1, arr2};

    fn epoch() -> NaiveDateTime {
        DateTime::<Utc>::UNIX_EPOCH.naive_utc()
    }

    #[test]
    fn index_detection() {
        let t = Variable::new("time", vec!["time"], Values::from(vec![0.0, 1.0]));
        assert!(t.is_index());

        let q = Variable::new(
            "streamflow",
            vec!["time", "feature_id"],
            Values::float(&[0, 2], vec![]).unwrap(),
        );
        assert!(!q.is_index());
        assert_eq!(q.axis_of("feature_id"), Some(1));
        assert_eq!(q.axis_of("reference_time"), None);
    }

    #[test]
    fn values_accessors() {
        let v = Values::from(vec![1.0, 2.0]);
        assert_eq!(v.len(), 2);
        assert_eq!(v.shape(), &[2]);
        assert_eq!(v.kind(), "float");
        assert_eq!(v.as_float(), Some(&arr1(&[1.0, 2.0]).into_dyn()));
        assert!(v.as_time().is_none());
        assert!(Values::from(Vec::<NaiveDateTime>::new()).is_empty());
    }

    #[test]
    fn shaped_constructor_checks_size() {
        let v = Values::float(&[2, 3], vec![0.0; 6]).unwrap();
        assert_eq!(v.shape(), &[2, 3]);
        assert!(matches!(
            Values::float(&[2, 3], vec![0.0; 5]),
            Err(DatasetError::Shape { .. })
        ));
    }

    #[test]
    fn leading_axis_repeats_array() {
        let v = Values::Float(arr2(&[[1.0, 2.0]]).into_dyn());
        let out = v.with_leading_axis(3).unwrap();
        assert_eq!(out.shape(), &[3, 1, 2]);
        let a = out.as_float().unwrap();
        assert_eq!(a.as_slice().unwrap(), &[1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn concatenate_inner_axis() {
        let a = Values::Float(arr2(&[[1.0], [2.0]]).into_dyn());
        let b = Values::Float(arr2(&[[3.0, 4.0], [5.0, 6.0]]).into_dyn());
        let out = Values::concatenate(&[a, b], 1).unwrap();
        assert_eq!(out, Values::Float(arr2(&[[1.0, 3.0, 4.0], [2.0, 5.0, 6.0]]).into_dyn()));
    }

    #[test]
    fn concatenate_rejects_mixed_kinds() {
        let a = Values::from(vec![1.0]);
        let b = Values::from(vec![epoch()]);
        let err = Values::concatenate(&[a, b], 0).unwrap_err();
        assert!(err.contains("mix"), "{err}");
    }

    #[test]
    fn reindex_fills_float_lanes_with_nan() {
        let v = Values::Float(arr2(&[[1.0, 2.0], [3.0, 4.0]]).into_dyn());
        let out = v.reindex_axis(0, &[Some(1), None, Some(0)]).unwrap();
        let a = out.as_float().unwrap();
        assert_eq!(a.shape(), &[3, 2]);
        assert_eq!(a[[0, 0]], 3.0);
        assert!(a[[1, 0]].is_nan() && a[[1, 1]].is_nan());
        assert_eq!(a[[2, 1]], 2.0);
    }

    #[test]
    fn reindex_refuses_time_fill() {
        let v = Values::from(vec![epoch()]);
        assert!(v.reindex_axis(0, &[Some(0), None]).is_none());
        assert!(v.reindex_axis(0, &[Some(0), Some(0)]).is_some());
    }

    #[test]
    fn transposed_input_is_stored_row_major() {
        let t = arr2(&[[1.0, 2.0], [3.0, 4.0]]).reversed_axes().into_dyn();
        let var = Variable::new("x", vec!["a", "b"], Values::Float(t));
        let a = var.values().as_float().unwrap();
        assert_eq!(a.as_slice().unwrap(), &[1.0, 3.0, 2.0, 4.0]);
    }
}
