//! # Number Lists
//!
//! Numeric-vector operations on [`NumberList`]. Statistics are population
//! statistics (divide by `n`). Element-wise arithmetic accepts either a
//! scalar or another list through [`Operand`]; a list operand shorter than
//! the receiver is reused cyclically (index `i` reads `operand[i % len]`).
//!
//! The normalisations never produce `NaN` or infinities from degenerate
//! input: a constant list normalises to zeros and a zero-sum or zero-max
//! list comes back unchanged.
//!
//! ```rust
//! use listkit::NumberList;
//!
//! let numbers = NumberList::from_vec(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
//! assert_eq!(numbers.get_median(), Some(4.5));
//! assert_eq!(numbers.get_average(), 5.0);
//! assert_eq!(numbers.get_standard_deviation(), 2.0);
//! assert_eq!(numbers.add(1.0).get_sum(), 48.0);
//! ```

use std::cmp::Ordering;

use log::warn;
use num_traits::ToPrimitive;

use super::{DedupKey, Element, NumberList, TypedList, sort::sort_permutation};
use crate::{
    containers::TypedContainer,
    core::TypeTag,
    value::{Interval, Value, coerce},
};

impl Element for f64 {
    const LIST_TAG: TypeTag = TypeTag::NumberList;

    fn kind(&self) -> TypeTag {
        TypeTag::Number
    }

    fn to_value(&self) -> Value {
        Value::Number(*self)
    }

    fn from_value(value: &Value, force: bool) -> Option<Self> {
        match value {
            Value::Number(n) => Some(*n),
            Value::Null | Value::Boolean(_) | Value::String(_) | Value::Date(_) if force => {
                Some(coerce::to_number(value))
            }
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::NumberList(list)
    }

    fn dedup_key(&self) -> Option<DedupKey> {
        if self.is_nan() {
            None
        } else {
            // -0.0 and 0.0 share a key
            Some(DedupKey::Number((*self + 0.0).to_bits()))
        }
    }

    /// Numeric minimum; `NaN` entries are ignored.
    fn min_of(items: &[Self]) -> Option<Self> {
        items
            .iter()
            .copied()
            .filter(|n| !n.is_nan())
            .reduce(f64::min)
    }

    fn max_of(items: &[Self]) -> Option<Self> {
        items
            .iter()
            .copied()
            .filter(|n| !n.is_nan())
            .reduce(f64::max)
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        let list = NumberList::from_vec(items.to_vec());
        let mut lines = Vec::new();
        if let (Some(min), Some(max)) = (list.get_min(), list.get_max()) {
            lines.push(format!("min: {}", coerce::format_number(min)));
            lines.push(format!("max: {}", coerce::format_number(max)));
        }
        lines.push(format!("sum: {}", coerce::format_number(list.get_sum())));
        lines.push(format!("average: {}", coerce::format_number(list.get_average())));
        lines.push(format!(
            "standard deviation: {}",
            coerce::format_number(list.get_standard_deviation())
        ));
        lines
    }
}

/// Right-hand side of an element-wise operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Scalar(f64),
    /// Co-indexed values, reused cyclically.
    List(&'a [f64]),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a [f64]> for Operand<'a> {
    fn from(values: &'a [f64]) -> Self {
        Operand::List(values)
    }
}

impl<'a> From<&'a NumberList> for Operand<'a> {
    fn from(values: &'a NumberList) -> Self {
        Operand::List(values.items())
    }
}

impl<'a> From<&'a Vec<f64>> for Operand<'a> {
    fn from(values: &'a Vec<f64>) -> Self {
        Operand::List(values)
    }
}

impl TypedList<f64> {
    /// Builds a list from any primitive numbers. Values that do not fit an
    /// `f64` become `NaN`.
    pub fn from_numbers<I, N>(numbers: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: ToPrimitive,
    {
        numbers
            .into_iter()
            .map(|n| n.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    fn map_numbers(&self, f: impl Fn(f64) -> f64) -> Self {
        self.derive(self.iter().map(|&n| f(n)).collect())
    }

    fn zip_operand<'a>(&self, operand: impl Into<Operand<'a>>, f: impl Fn(f64, f64) -> f64) -> Self {
        match operand.into() {
            Operand::Scalar(value) => self.map_numbers(|n| f(n, value)),
            Operand::List([]) => {
                warn!("Element-wise operation against an empty list, returning a copy");
                self.clone()
            }
            Operand::List(values) => self.derive(
                self.iter()
                    .enumerate()
                    .map(|(i, &n)| f(n, values[i % values.len()]))
                    .collect(),
            ),
        }
    }

    pub fn get_sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Product of all elements; `1` for an empty list.
    pub fn get_product(&self) -> f64 {
        self.iter().product()
    }

    /// Arithmetic mean; `0` for an empty list.
    pub fn get_average(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.get_sum() / self.len() as f64
        }
    }

    /// Population variance.
    pub fn get_variance(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let average = self.get_average();
        self.iter().map(|n| (n - average).powi(2)).sum::<f64>() / self.len() as f64
    }

    pub fn get_standard_deviation(&self) -> f64 {
        self.get_variance().sqrt()
    }

    fn sorted_ascending(&self) -> Vec<f64> {
        let mut sorted = self.to_vec();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    /// Middle value; the average of the two middle values for an even
    /// length.
    pub fn get_median(&self) -> Option<f64> {
        let sorted = self.sorted_ascending();
        let len = sorted.len();
        match len {
            0 => None,
            _ if len % 2 == 1 => Some(sorted[len / 2]),
            _ => Some((sorted[len / 2 - 1] + sorted[len / 2]) / 2.0),
        }
    }

    /// The `n - 1` split points dividing the sorted values into `n` groups.
    ///
    /// Split point `k` sits at position `p = k * len / n`. A whole `p`
    /// falls between two values and averages them; otherwise the value at
    /// `floor(p)` is taken. `get_quantiles(2)` is the median.
    pub fn get_quantiles(&self, n: usize) -> Self {
        if n < 2 || self.is_empty() {
            return self.derive(Vec::new());
        }
        let sorted = self.sorted_ascending();
        let len = sorted.len();
        let quantiles = (1..n)
            .map(|k| {
                let scaled = k * len;
                let position = scaled / n;
                if scaled % n == 0 && position > 0 {
                    (sorted[position - 1] + sorted[position]) / 2.0
                } else {
                    sorted[position.min(len - 1)]
                }
            })
            .collect();
        self.derive(quantiles)
    }

    /// (min, max), ignoring `NaN`.
    pub fn get_interval(&self) -> Option<Interval> {
        Some(Interval::new(self.get_min()?, self.get_max()?))
    }

    /// `max - min`; `0` for an empty list.
    pub fn get_amplitude(&self) -> f64 {
        self.get_interval()
            .map(|interval| interval.amplitude())
            .unwrap_or(0.0)
    }

    /// Rescales into `[0, factor]`. A constant list maps to zeros.
    pub fn get_normalized(&self, factor: f64) -> Self {
        let Some(interval) = self.get_interval() else {
            return self.clone();
        };
        let amplitude = interval.amplitude();
        if amplitude == 0.0 {
            return self.map_numbers(|_| 0.0);
        }
        self.map_numbers(|n| factor * (n - interval.x) / amplitude)
    }

    /// Divides by the maximum. A zero maximum returns a copy.
    pub fn get_normalized_to_max(&self, factor: f64) -> Self {
        match self.get_max() {
            Some(max) if max != 0.0 => self.map_numbers(|n| factor * n / max),
            _ => self.clone(),
        }
    }

    /// Divides by the sum. A zero sum returns a copy.
    pub fn get_normalized_to_sum(&self, factor: f64) -> Self {
        let sum = self.get_sum();
        if sum == 0.0 || !sum.is_finite() {
            return self.clone();
        }
        self.map_numbers(|n| factor * n / sum)
    }

    pub fn add<'a>(&self, operand: impl Into<Operand<'a>>) -> Self {
        self.zip_operand(operand, |a, b| a + b)
    }

    pub fn subtract<'a>(&self, operand: impl Into<Operand<'a>>) -> Self {
        self.zip_operand(operand, |a, b| a - b)
    }

    pub fn multiply<'a>(&self, operand: impl Into<Operand<'a>>) -> Self {
        self.zip_operand(operand, |a, b| a * b)
    }

    /// Alias of [`TypedList::multiply`].
    pub fn factor<'a>(&self, operand: impl Into<Operand<'a>>) -> Self {
        self.multiply(operand)
    }

    pub fn divide<'a>(&self, operand: impl Into<Operand<'a>>) -> Self {
        self.zip_operand(operand, |a, b| a / b)
    }

    pub fn pow<'a>(&self, operand: impl Into<Operand<'a>>) -> Self {
        self.zip_operand(operand, f64::powf)
    }

    pub fn sqrt(&self) -> Self {
        self.map_numbers(f64::sqrt)
    }

    /// Natural logarithm of each element.
    pub fn log(&self) -> Self {
        self.map_numbers(f64::ln)
    }

    pub fn abs(&self) -> Self {
        self.map_numbers(f64::abs)
    }

    /// Rounds each element to `decimals` places.
    pub fn get_rounded(&self, decimals: i32) -> Self {
        let scale = 10f64.powi(decimals);
        self.map_numbers(|n| (n * scale).round() / scale)
    }

    /// Running sums.
    pub fn get_accumulated(&self) -> Self {
        self.derive(
            self.iter()
                .scan(0.0, |total, &n| {
                    *total += n;
                    Some(*total)
                })
                .collect(),
        )
    }

    /// Sum of pairwise products over the shorter length.
    pub fn dot_product(&self, other: &[f64]) -> f64 {
        if other.len() != self.len() {
            warn!(
                "Dot product of lengths {} and {}, truncating",
                self.len(),
                other.len()
            );
        }
        self.iter().zip(other).map(|(a, b)| a * b).sum()
    }

    /// Euclidean distance over the shorter length.
    pub fn distance(&self, other: &[f64]) -> f64 {
        if other.len() != self.len() {
            warn!(
                "Distance between lengths {} and {}, truncating",
                self.len(),
                other.len()
            );
        }
        self.iter()
            .zip(other)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    /// Ranking permutation, largest first. Ties keep their original order.
    pub fn get_sort_indexes(&self) -> Vec<usize> {
        self.get_sort_indexes_directed(true)
    }

    pub fn get_sort_indexes_directed(&self, descending: bool) -> Vec<usize> {
        sort_permutation(self, !descending)
    }

    /// Moves every element a `speed` fraction of the way towards `target`:
    /// `x = (1 - speed) * x + speed * t`. Only the common prefix moves.
    pub fn approach(&mut self, target: &[f64], speed: f64) {
        if target.len() != self.len() {
            warn!(
                "Approaching a target of length {} from length {}, truncating",
                target.len(),
                self.len()
            );
        }
        for (n, t) in self.iter_mut().zip(target) {
            *n = (1.0 - speed) * *n + speed * t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_float_eq;

    fn sample() -> NumberList {
        NumberList::from_vec(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
    }

    mod statistics_tests {
        use super::*;

        #[test]
        fn test_median_and_quantiles() {
            assert_eq!(sample().get_median(), Some(4.5));
            assert_eq!(sample().get_quantiles(2).items(), &[4.5]);
            assert_eq!(NumberList::from_vec(vec![3.0, 1.0, 2.0]).get_median(), Some(2.0));
            assert_eq!(NumberList::new().get_median(), None);
        }

        #[test]
        fn test_quartiles() {
            let quartiles = sample().get_quantiles(4);
            assert_eq!(quartiles.items(), &[4.0, 4.5, 6.0]);
            assert!(sample().get_quantiles(1).is_empty());
        }

        #[test]
        fn test_population_statistics() {
            assert_eq!(sample().get_variance(), 4.0);
            assert_eq!(sample().get_standard_deviation(), 2.0);
            assert_eq!(NumberList::new().get_average(), 0.0);
            assert_eq!(NumberList::new().get_product(), 1.0);
        }

        #[test]
        fn test_min_max_ignore_nan() {
            let numbers = NumberList::from_vec(vec![f64::NAN, 3.0, -1.0]);
            assert_eq!(numbers.get_min(), Some(-1.0));
            assert_eq!(numbers.get_max(), Some(3.0));
            assert_eq!(numbers.get_amplitude(), 4.0);
        }
    }

    mod normalization_tests {
        use super::*;

        #[test]
        fn test_constant_list_normalizes_to_zeros() {
            let normalized = NumberList::from_vec(vec![5.0, 5.0, 5.0]).get_normalized(1.0);
            assert_eq!(normalized.items(), &[0.0, 0.0, 0.0]);
        }

        #[test]
        fn test_zero_sum_returns_copy() {
            let zeros = NumberList::from_vec(vec![0.0, 0.0, 0.0]);
            assert_eq!(zeros.get_normalized_to_sum(1.0), zeros);
            assert_eq!(zeros.get_normalized_to_max(1.0), zeros);
        }

        #[test]
        fn test_normalizations() {
            let numbers = NumberList::from_vec(vec![1.0, 2.0, 5.0]);
            assert_eq!(numbers.get_normalized(1.0).items(), &[0.0, 0.25, 1.0]);
            assert_eq!(numbers.get_normalized_to_max(10.0).items(), &[2.0, 4.0, 10.0]);
            assert_eq!(numbers.get_normalized_to_sum(1.0).items(), &[0.125, 0.25, 0.625]);
        }
    }

    mod arithmetic_tests {
        use super::*;

        #[test]
        fn test_list_operand_wraps() {
            let numbers = NumberList::from_vec(vec![1.0, 2.0, 3.0, 4.0]);
            let operand = NumberList::from_vec(vec![10.0, 20.0]);
            assert_eq!(numbers.add(&operand).items(), &[11.0, 22.0, 13.0, 24.0]);
            assert_eq!(numbers.subtract(1.0).items(), &[0.0, 1.0, 2.0, 3.0]);
            assert_eq!(numbers.factor(2.0).items(), &[2.0, 4.0, 6.0, 8.0]);
            assert_eq!(numbers.pow(2.0).items(), &[1.0, 4.0, 9.0, 16.0]);
        }

        #[test]
        fn test_empty_operand_returns_copy() {
            let numbers = NumberList::from_vec(vec![1.0, 2.0]);
            let empty: &[f64] = &[];
            assert_eq!(numbers.divide(empty), numbers);
        }

        #[test]
        fn test_unary_operations() {
            let numbers = NumberList::from_vec(vec![-4.0, 9.0]);
            assert_eq!(numbers.abs().sqrt().items(), &[2.0, 3.0]);
            assert_float_eq(NumberList::from_vec(vec![1.0]).log()[0], 0.0, 1e-12);
            assert_eq!(
                NumberList::from_vec(vec![1.234, 5.678]).get_rounded(1).items(),
                &[1.2, 5.7]
            );
            assert_eq!(numbers.get_accumulated().items(), &[-4.0, 5.0]);
        }

        #[test]
        fn test_vector_operations_truncate() {
            let a = NumberList::from_vec(vec![1.0, 2.0, 3.0]);
            assert_eq!(a.dot_product(&[4.0, 5.0]), 14.0);
            assert_eq!(a.distance(&[4.0, 6.0, 3.0, 100.0]), 5.0);
        }

        #[test]
        fn test_approach() {
            let mut position = NumberList::from_vec(vec![0.0, 10.0]);
            position.approach(&[10.0, 0.0], 0.25);
            assert_eq!(position.items(), &[2.5, 7.5]);
        }

        #[test]
        fn test_from_numbers() {
            assert_eq!(NumberList::from_numbers([1_u8, 2, 3]).items(), &[1.0, 2.0, 3.0]);
            assert_eq!(NumberList::from_numbers(vec![-7_i64]).items(), &[-7.0]);
        }
    }

    #[test]
    fn test_sort_indexes_default_descending() {
        let numbers = NumberList::from_vec(vec![1.0, 3.0, 2.0, 3.0]);
        assert_eq!(numbers.get_sort_indexes(), vec![1, 3, 2, 0]);
        assert_eq!(numbers.get_sort_indexes_directed(false), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_dedup_key_merges_signed_zero() {
        let numbers = NumberList::from_vec(vec![0.0, -0.0, 1.0]);
        assert_eq!(numbers.get_without_repetitions().len(), 2);
    }
}
