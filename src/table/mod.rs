//! # Tables
//!
//! A [`Table`] is a list of columns, each column a [`TypedContainer`] of any
//! kind. Columns may have different lengths: row projections fill the
//! missing cells with [`Value::Null`] instead of assuming a rectangle.
//!
//! ```rust
//! use listkit::{NumberList, StringList, Table, TypeTag, Value};
//!
//! let table = Table::from_vec(vec![
//!     StringList::from_vec(vec!["a".into(), "b".into()]).named("key").into_container(),
//!     NumberList::from_vec(vec![1.0, 2.0]).named("value").into_container(),
//! ]);
//!
//! let row = table.get_row(1);
//! assert_eq!(row.to_values(), vec![Value::from("b"), Value::from(2.0)]);
//!
//! let transposed = table.get_transposed(true);
//! assert_eq!(transposed.type_tag(), TypeTag::NumberTable);
//! assert_eq!(transposed.value_at(0).name().as_deref(), Some("a"));
//! ```

pub mod number;

use std::cmp::Ordering;

use log::warn;

use crate::{
    containers::{TypedContainer, refine_columns},
    core::TypeTag,
    errors::{ListError, Result},
    list::{Element, List, NumberList, StringList, Table, TypedList, sort::sort_permutation},
    value::{Value, coerce},
};

/// Report lines of nested containers, one block per container. The outer
/// report adds its own indentation on top.
pub(crate) fn nested_report_lines<I>(reports: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    reports
        .into_iter()
        .flat_map(|report| report.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

impl Element for TypedContainer {
    const LIST_TAG: TypeTag = TypeTag::Table;

    fn kind(&self) -> TypeTag {
        self.type_tag()
    }

    fn to_value(&self) -> Value {
        Value::Container(Box::new(self.clone()))
    }

    fn from_value(value: &Value, _force: bool) -> Option<Self> {
        value.as_container().cloned()
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len())
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::Table(list)
    }

    fn element_name(&self) -> Option<String> {
        Some(self.name().to_string())
    }

    fn assign_name(&mut self, name: &str) -> bool {
        self.set_name(name);
        true
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        nested_report_lines(items.iter().map(|column| column.get_report(1)))
    }
}

impl TypedList<TypedContainer> {
    /// Length of every column.
    pub fn get_lengths(&self) -> NumberList {
        self.iter().map(|column| column.len() as f64).collect()
    }

    /// Length of the longest column.
    pub fn get_rows_count(&self) -> usize {
        self.iter().map(TypedContainer::len).max().unwrap_or(0)
    }

    pub fn is_ragged(&self) -> bool {
        self.iter().any(|column| column.len() != self[0].len())
    }

    /// The `index`-th cell of every column, refined. Short columns give
    /// `Null`.
    pub fn get_row(&self, index: usize) -> TypedContainer {
        List::from_vec(self.iter().map(|column| column.value_at(index)).collect()).get_improved()
    }

    /// Swaps rows and columns.
    ///
    /// With `first_row_as_headers`, the first column supplies the names of
    /// the new columns and is left out of the data. Missing cells of a
    /// ragged table become `Null`. The result is refined.
    pub fn get_transposed(&self, first_row_as_headers: bool) -> TypedContainer {
        let (headers, data) = match self.split_first() {
            Some((first, rest)) if first_row_as_headers => (Some(first), rest),
            _ => (None, &self[..]),
        };

        let rows = self.get_rows_count();
        let columns = (0..rows)
            .map(|row| {
                let column =
                    List::from_vec(data.iter().map(|column| column.value_at(row)).collect());
                let name = headers
                    .map(|headers| coerce::to_string(&headers.value_at(row)))
                    .unwrap_or_default();
                column.named(name).into_container()
            })
            .collect();

        refine_columns(&self.name, columns)
    }

    /// Rows `start..=end` of every column, clamped like
    /// [`TypedList::get_sub_list`].
    pub fn get_sub_rows(&self, start: usize, end: usize) -> Self {
        self.derive(
            self.iter()
                .map(|column| column.get_sub_list(start, end))
                .collect(),
        )
    }

    /// Reorders every column with the permutation that sorts `keys`. The
    /// permutation is computed once, so rows stay aligned. Columns longer
    /// than `keys` lose their extra cells.
    pub fn get_lists_sorted_by_list<K: Element>(&self, keys: &[K], ascending: bool) -> Self {
        if self.iter().any(|column| column.len() != keys.len()) {
            warn!(
                "Sorting table '{}' by {} keys with columns of other lengths, truncating",
                self.name,
                keys.len()
            );
        }
        let permutation: Vec<Option<usize>> = sort_permutation(keys, ascending)
            .into_iter()
            .map(Some)
            .collect();
        self.derive(
            self.iter()
                .map(|column| column.get_sorted_on_indexes(&permutation))
                .collect(),
        )
    }

    /// Sorts every column by the values of column `column`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] if there is no such column.
    pub fn get_lists_sorted_by_column(&self, column: usize, ascending: bool) -> Result<Self> {
        let keys = self
            .get(column)
            .ok_or(ListError::IndexOutOfRange {
                index: column,
                len: self.len(),
            })?
            .to_values();
        Ok(self.get_lists_sorted_by_list(&keys, ascending))
    }

    /// In-place form of [`TypedList::get_lists_sorted_by_list`].
    pub fn sort_lists_by_list<K: Element>(&mut self, keys: &[K], ascending: bool) {
        let sorted = self.get_lists_sorted_by_list(keys, ascending);
        *self = sorted;
    }

    pub fn get_names(&self) -> StringList {
        self.iter()
            .map(|column| column.name().to_string())
            .collect::<StringList>()
    }

    /// First column with the given name.
    pub fn get_column_by_name(&self, name: &str) -> Option<&TypedContainer> {
        self.iter().find(|column| column.name() == name)
    }
}
