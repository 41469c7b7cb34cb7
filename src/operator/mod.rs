//! Date-aligned binary operations on time series.
//!
//! Two series are aligned by applying a set operation to their dates; dates
//! missing from an operand are filled with a constant. A scalar argument is
//! broadcast over the dates of the left operand instead.

pub mod functions;

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crate::config::OperatorConfig;
use crate::error::{Error, Result};
use crate::series::TimeSeries;
use crate::temporal::Timestamp;

use self::functions::BinaryFunction;

/// Set operation applied to the dates of two series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperation {
    Union,
    #[default]
    Intersection,
    Difference,
    SymmetricDifference,
}

impl SetOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOperation::Union => "union",
            SetOperation::Intersection => "intersection",
            SetOperation::Difference => "difference",
            SetOperation::SymmetricDifference => "symmetric_difference",
        }
    }

    /// Resulting dates in ascending order.
    pub fn apply(&self, left: &BTreeSet<Timestamp>, right: &BTreeSet<Timestamp>) -> Vec<Timestamp> {
        match self {
            SetOperation::Union => left.union(right).copied().collect(),
            SetOperation::Intersection => left.intersection(right).copied().collect(),
            SetOperation::Difference => left.difference(right).copied().collect(),
            SetOperation::SymmetricDifference => {
                left.symmetric_difference(right).copied().collect()
            }
        }
    }
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SetOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "union" => Ok(SetOperation::Union),
            "intersection" => Ok(SetOperation::Intersection),
            "difference" => Ok(SetOperation::Difference),
            "symmetric_difference" => Ok(SetOperation::SymmetricDifference),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}

/// Second operand: another series, or a value broadcast over the first.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorArg<'a> {
    Series(&'a TimeSeries),
    Scalar(f64),
    /// Converted to `f64` when broadcast.
    Text(String),
}

impl OperatorArg<'_> {
    fn to_scalar(&self) -> Result<f64> {
        match self {
            OperatorArg::Scalar(v) => Ok(*v),
            OperatorArg::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::NumericValue(format!("cannot broadcast non-float-convertible value '{}'", s))
            }),
            OperatorArg::Series(_) => Err(Error::NumericValue(
                "cannot broadcast a time series".to_string(),
            )),
        }
    }
}

impl<'a> From<&'a TimeSeries> for OperatorArg<'a> {
    fn from(ts: &'a TimeSeries) -> Self {
        OperatorArg::Series(ts)
    }
}

impl From<f64> for OperatorArg<'_> {
    fn from(value: f64) -> Self {
        OperatorArg::Scalar(value)
    }
}

impl From<i32> for OperatorArg<'_> {
    fn from(value: i32) -> Self {
        OperatorArg::Scalar(value as f64)
    }
}

impl From<i64> for OperatorArg<'_> {
    fn from(value: i64) -> Self {
        OperatorArg::Scalar(value as f64)
    }
}

impl From<&str> for OperatorArg<'_> {
    fn from(value: &str) -> Self {
        OperatorArg::Text(value.to_string())
    }
}

impl From<String> for OperatorArg<'_> {
    fn from(value: String) -> Self {
        OperatorArg::Text(value)
    }
}

/// Value returned by a custom binary function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionValue {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl From<f64> for FunctionValue {
    fn from(value: f64) -> Self {
        FunctionValue::Scalar(value)
    }
}

impl From<Vec<f64>> for FunctionValue {
    fn from(values: Vec<f64>) -> Self {
        FunctionValue::Sequence(values)
    }
}

/// Result of [`SeriesOperator::custom`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorOutput {
    /// Elementwise result paired with the aligned dates.
    Series(TimeSeries),
    /// Raw return value of a non-elementwise function.
    Value(FunctionValue),
}

impl OperatorOutput {
    pub fn into_series(self) -> Result<TimeSeries> {
        match self {
            OperatorOutput::Series(ts) => Ok(ts),
            OperatorOutput::Value(_) => Err(Error::ComputationError(
                "operator returned a value, not a time series".to_string(),
            )),
        }
    }

    pub fn into_scalar(self) -> Result<f64> {
        match self {
            OperatorOutput::Value(FunctionValue::Scalar(v)) => Ok(v),
            _ => Err(Error::ComputationError(
                "operator did not return a scalar".to_string(),
            )),
        }
    }

    pub fn as_series(&self) -> Option<&TimeSeries> {
        match self {
            OperatorOutput::Series(ts) => Some(ts),
            OperatorOutput::Value(_) => None,
        }
    }
}

/// Values of both operands over a common set of dates.
#[derive(Debug)]
pub(crate) struct Alignment<'c> {
    pub(crate) dates: Cow<'c, [Timestamp]>,
    pub(crate) left: Cow<'c, [f64]>,
    /// `None` when the argument is to be broadcast.
    pub(crate) right: Option<Cow<'c, [f64]>>,
}

/// Align `left` with `arg` under `operation`, filling missing dates with `fill`.
pub(crate) fn align<'c>(
    left: &'c TimeSeries,
    arg: &OperatorArg<'c>,
    operation: SetOperation,
    fill: f64,
) -> Alignment<'c> {
    let right: &'c TimeSeries = match arg {
        OperatorArg::Series(ts) => *ts,
        _ => {
            return Alignment {
                dates: Cow::Borrowed(left.dates()),
                left: Cow::Borrowed(left.values()),
                right: None,
            }
        }
    };

    let left_dates: BTreeSet<Timestamp> = left.dates().iter().copied().collect();
    let right_dates: BTreeSet<Timestamp> = right.dates().iter().copied().collect();
    let dates = operation.apply(&left_dates, &right_dates);

    if dates.is_empty() {
        log::warn!("time series are empty after {} of dates", operation);
    }

    if left.dates() == dates.as_slice() && right.dates() == dates.as_slice() {
        log::debug!("operands already aligned on {} dates", dates.len());
        return Alignment {
            dates: Cow::Borrowed(left.dates()),
            left: Cow::Borrowed(left.values()),
            right: Some(Cow::Borrowed(right.values())),
        };
    }

    log::debug!(
        "aligned {} and {} entries to {} dates by {}",
        left.len(),
        right.len(),
        dates.len(),
        operation
    );
    let left_values = fill_values(&dates, left, fill);
    let right_values = fill_values(&dates, right, fill);
    Alignment {
        dates: Cow::Owned(dates),
        left: Cow::Owned(left_values),
        right: Some(Cow::Owned(right_values)),
    }
}

/// Values of `ts` at `dates`, with `fill` where `ts` has no entry.
fn fill_values(dates: &[Timestamp], ts: &TimeSeries, fill: f64) -> Vec<f64> {
    dates
        .iter()
        .map(|date| ts.position(date).map_or(fill, |pos| ts.values()[pos]))
        .collect()
}

/// Elementwise combination of two series. Cannot fail: both operands are
/// valid series and the provided binary functions preserve length.
pub(crate) fn combine_series(
    left: &TimeSeries,
    right: &TimeSeries,
    func: BinaryFunction,
    operation: SetOperation,
    fill: f64,
) -> TimeSeries {
    let alignment = align(left, &OperatorArg::Series(right), operation, fill);
    let values = match &alignment.right {
        Some(right) => func(&alignment.left[..], &right[..]),
        None => Vec::new(),
    };
    TimeSeries::from_sorted_parts(alignment.dates.into_owned(), values)
}

/// Elementwise combination of a series with a broadcast scalar.
pub(crate) fn combine_scalar(left: &TimeSeries, scalar: f64, func: BinaryFunction) -> TimeSeries {
    let values = func(left.values(), &vec![scalar; left.len()]);
    TimeSeries::from_sorted_parts(left.dates().to_vec(), values)
}

/// Applies binary functions to a series and a second operand after alignment.
///
/// ```rust
/// use timeseries::operator::{functions, OperatorConfig, SetOperation};
/// use timeseries::TimeSeries;
///
/// let a = TimeSeries::from_iso(&["1970-01-01", "1970-01-02"], vec![1.0, 2.0]).unwrap();
/// let b = TimeSeries::from_iso(&["1970-01-02", "1970-01-03"], vec![5.0, 7.0]).unwrap();
///
/// let config = OperatorConfig::default().with_operation(SetOperation::Union);
/// let sum = a.operator().custom(functions::add, &b, &config).unwrap().into_series().unwrap();
/// assert_eq!(sum.values(), &[1.0, 7.0, 7.0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SeriesOperator<'a> {
    time_series: &'a TimeSeries,
}

impl<'a> SeriesOperator<'a> {
    pub fn new(time_series: &'a TimeSeries) -> Self {
        SeriesOperator { time_series }
    }

    /// Both operands restricted or extended to the dates given by `operation`.
    pub fn align_with(
        &self,
        other: &TimeSeries,
        operation: SetOperation,
        fill: f64,
    ) -> (TimeSeries, TimeSeries) {
        let alignment = align(self.time_series, &OperatorArg::Series(other), operation, fill);
        let right = alignment.right.map(Cow::into_owned).unwrap_or_default();
        let dates = alignment.dates.into_owned();
        (
            TimeSeries::from_sorted_parts(dates.clone(), alignment.left.into_owned()),
            TimeSeries::from_sorted_parts(dates, right),
        )
    }

    /// Apply `func(values1, values2)` after aligning with `arg`.
    ///
    /// Elementwise calls return a series over the aligned dates; otherwise
    /// the function's return value is passed through. Any failure is
    /// reported as [`Error::OperatorApplication`] with the cause attached.
    pub fn custom<'b, F, O, A>(&self, func: F, arg: A, config: &OperatorConfig) -> Result<OperatorOutput>
    where
        F: Fn(&[f64], &[f64]) -> O,
        O: Into<FunctionValue>,
        A: Into<OperatorArg<'b>>,
    {
        let arg = arg.into();
        let alignment = align(self.time_series, &arg, config.operation, config.fill);
        Self::apply_function(alignment, &arg, func, config.elementwise).map_err(Error::operator)
    }

    fn apply_function<F, O>(
        alignment: Alignment<'_>,
        arg: &OperatorArg<'_>,
        func: F,
        elementwise: bool,
    ) -> Result<OperatorOutput>
    where
        F: Fn(&[f64], &[f64]) -> O,
        O: Into<FunctionValue>,
    {
        let len = alignment.left.len();
        let broadcast;
        let right: &[f64] = match &alignment.right {
            Some(values) => &values[..],
            // nothing to broadcast over an empty series
            None if len == 0 => &[],
            None => {
                broadcast = vec![arg.to_scalar()?; len];
                &broadcast
            }
        };

        let value = func(&alignment.left[..], right).into();
        if !elementwise {
            return Ok(OperatorOutput::Value(value));
        }

        match value {
            FunctionValue::Sequence(values) => {
                if values.len() != alignment.dates.len() {
                    return Err(Error::InputDimension {
                        dates: alignment.dates.len(),
                        values: values.len(),
                    });
                }
                Ok(OperatorOutput::Series(TimeSeries::from_sorted_parts(
                    alignment.dates.into_owned(),
                    values,
                )))
            }
            FunctionValue::Scalar(_) => Err(Error::ComputationError(
                "elementwise function must return a sequence".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::parse_iso;

    fn series(dates: &[&str], values: Vec<f64>) -> TimeSeries {
        TimeSeries::from_iso(dates, values).unwrap()
    }

    #[test]
    fn test_set_operations() {
        let a: BTreeSet<Timestamp> = ["1970-01-01", "1970-01-02", "1970-01-03"]
            .iter()
            .map(|s| parse_iso(s).unwrap())
            .collect();
        let b: BTreeSet<Timestamp> = ["1970-01-02", "1970-01-04"]
            .iter()
            .map(|s| parse_iso(s).unwrap())
            .collect();

        assert_eq!(SetOperation::Union.apply(&a, &b).len(), 4);
        assert_eq!(SetOperation::Intersection.apply(&a, &b).len(), 1);
        assert_eq!(SetOperation::Difference.apply(&a, &b).len(), 2);
        assert_eq!(SetOperation::SymmetricDifference.apply(&a, &b).len(), 3);

        let union = SetOperation::Union.apply(&a, &b);
        assert!(union.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_operation_parsing() {
        assert_eq!(
            "symmetric_difference".parse::<SetOperation>().unwrap(),
            SetOperation::SymmetricDifference
        );
        match "xor".parse::<SetOperation>() {
            Err(Error::UnknownOperation(key)) => assert_eq!(key, "xor"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_alignment_borrows_when_dates_match() {
        let a = series(&["1970-01-01", "1970-01-02"], vec![1.0, 2.0]);
        let b = series(&["1970-01-01", "1970-01-02"], vec![3.0, 4.0]);

        let alignment = align(&a, &OperatorArg::Series(&b), SetOperation::Union, 0.0);
        assert!(matches!(alignment.dates, Cow::Borrowed(_)));
        assert!(matches!(alignment.right, Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_alignment_fills_missing_dates() {
        let a = series(&["1970-01-01", "1970-01-02", "1970-01-03"], vec![1.0, 2.0, 3.0]);
        let b = series(&["1970-01-01", "1970-01-02", "1970-01-04"], vec![1.0, 2.0, 4.0]);

        let alignment = align(&a, &OperatorArg::Series(&b), SetOperation::Union, -1.0);
        assert_eq!(alignment.dates.len(), 4);
        assert_eq!(&*alignment.left, &[1.0, 2.0, 3.0, -1.0]);
        assert_eq!(alignment.right.as_deref(), Some(&[1.0, 2.0, -1.0, 4.0][..]));
    }

    #[test]
    fn test_align_with() {
        let a = series(&["1970-01-01", "1970-01-02"], vec![1.0, 2.0]);
        let b = series(&["1970-01-02", "1970-01-03"], vec![5.0, 7.0]);

        let (x, y) = a.operator().align_with(&b, SetOperation::Union, 0.0);
        assert_eq!(x.dates(), y.dates());
        assert_eq!(x.values(), &[1.0, 2.0, 0.0]);
        assert_eq!(y.values(), &[0.0, 5.0, 7.0]);

        let (x, y) = a.operator().align_with(&b, SetOperation::Intersection, 0.0);
        assert_eq!(x.values(), &[2.0]);
        assert_eq!(y.values(), &[5.0]);
    }

    #[test]
    fn test_scalar_broadcast() {
        let a = series(&["1970-01-01", "1970-01-02"], vec![1.0, 2.0]);
        let config = OperatorConfig::default();

        let result = a
            .operator()
            .custom(functions::multiply, 3.0, &config)
            .unwrap()
            .into_series()
            .unwrap();
        assert_eq!(result.values(), &[3.0, 6.0]);

        let result = a
            .operator()
            .custom(functions::add, "0.5", &config)
            .unwrap()
            .into_series()
            .unwrap();
        assert_eq!(result.values(), &[1.5, 2.5]);
    }

    #[test]
    fn test_broadcast_failure_keeps_cause() {
        let a = series(&["1970-01-01"], vec![1.0]);
        let err = a
            .operator()
            .custom(functions::add, "abc", &OperatorConfig::default())
            .unwrap_err();

        match err {
            Error::OperatorApplication { source } => {
                assert!(matches!(*source, Error::NumericValue(_)))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_passes_value_through() {
        let a = series(&["1970-01-01", "1970-01-02", "1970-01-03"], vec![1.0, 2.0, 3.0]);
        let config = OperatorConfig::default().aggregate();

        let total = a
            .operator()
            .custom(
                |x: &[f64], y: &[f64]| x.iter().zip(y).map(|(a, b)| a + b).sum::<f64>(),
                0.0,
                &config,
            )
            .unwrap()
            .into_scalar()
            .unwrap();
        assert_eq!(total, 6.0);
    }

    #[test]
    fn test_elementwise_length_mismatch_fails() {
        let a = series(&["1970-01-01", "1970-01-02"], vec![1.0, 2.0]);
        let result = a.operator().custom(
            |x: &[f64], _: &[f64]| x[..1].to_vec(),
            1.0,
            &OperatorConfig::default(),
        );
        assert!(matches!(result, Err(Error::OperatorApplication { .. })));

        let result = a
            .operator()
            .custom(|_: &[f64], _: &[f64]| 1.0, 1.0, &OperatorConfig::default());
        assert!(matches!(result, Err(Error::OperatorApplication { .. })));
    }

    #[test]
    fn test_empty_result_proceeds() {
        let a = series(&["1970-01-01"], vec![1.0]);
        let b = series(&["1970-01-02"], vec![2.0]);

        let result = a
            .operator()
            .custom(functions::add, &b, &OperatorConfig::default())
            .unwrap()
            .into_series()
            .unwrap();
        assert!(result.is_empty());
    }
}
