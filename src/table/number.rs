//! Numeric tables: column and row aggregates, and the bridge to
//! `nalgebra` matrices (column `j` of the table is column `j` of the
//! matrix).

use std::cmp::Ordering;

#[cfg(feature = "matrix")]
use nalgebra::DMatrix;

use super::nested_report_lines;
use crate::{
    containers::TypedContainer,
    core::TypeTag,
    errors::{ListError, Result},
    list::{Element, NumberList, NumberTable, Polygon, PolygonList, Table, TypedList},
    value::{Interval, Value},
};

impl Element for NumberList {
    const LIST_TAG: TypeTag = TypeTag::NumberTable;

    fn kind(&self) -> TypeTag {
        TypeTag::NumberList
    }

    fn to_value(&self) -> Value {
        Value::Container(Box::new(TypedContainer::NumberList(self.clone())))
    }

    /// With `force`, any container is read as numbers.
    fn from_value(value: &Value, force: bool) -> Option<Self> {
        match value.as_container()? {
            TypedContainer::NumberList(list) => Some(list.clone()),
            other if force => Some(other.to_number_list()),
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len())
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::NumberTable(list)
    }

    fn element_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn assign_name(&mut self, name: &str) -> bool {
        self.name = name.to_string();
        true
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        nested_report_lines(items.iter().map(|column| column.get_report(1)))
    }
}

impl Element for Polygon {
    const LIST_TAG: TypeTag = TypeTag::PolygonList;

    fn kind(&self) -> TypeTag {
        TypeTag::Polygon
    }

    fn to_value(&self) -> Value {
        Value::Container(Box::new(TypedContainer::Polygon(self.clone())))
    }

    fn from_value(value: &Value, _force: bool) -> Option<Self> {
        match value.as_container()? {
            TypedContainer::Polygon(polygon) => Some(polygon.clone()),
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.len().cmp(&other.len())
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::PolygonList(list)
    }

    fn element_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn assign_name(&mut self, name: &str) -> bool {
        self.name = name.to_string();
        true
    }

    fn report_lines(items: &[Self], _indent: usize) -> Vec<String> {
        nested_report_lines(items.iter().map(|polygon| polygon.get_report(1)))
    }
}

impl TypedList<NumberList> {
    /// Sum of each column.
    pub fn get_sums(&self) -> NumberList {
        self.iter().map(NumberList::get_sum).collect()
    }

    /// Average of each column.
    pub fn get_averages(&self) -> NumberList {
        self.iter().map(NumberList::get_average).collect()
    }

    /// The common column length.
    ///
    /// # Errors
    ///
    /// [`ListError::ShapeMismatch`] naming `operation` for the first column
    /// whose length differs from the first column's.
    pub fn check_rectangular(&self, operation: &'static str) -> Result<usize> {
        let rows = self.first().map(|column| column.len()).unwrap_or(0);
        match self.iter().find(|column| column.len() != rows) {
            Some(column) => Err(ListError::ShapeMismatch {
                operation,
                expected: rows,
                found: column.len(),
            }),
            None => Ok(rows),
        }
    }

    /// Sum across every column at each row.
    ///
    /// # Errors
    ///
    /// [`ListError::ShapeMismatch`] if the columns differ in length.
    pub fn get_rows_sums(&self) -> Result<NumberList> {
        let rows = self.check_rectangular("get_rows_sums")?;
        Ok((0..rows)
            .map(|row| self.iter().map(|column| column[row]).sum())
            .collect())
    }

    /// Average across every column at each row.
    ///
    /// # Errors
    ///
    /// [`ListError::ShapeMismatch`] if the columns differ in length.
    pub fn get_rows_averages(&self) -> Result<NumberList> {
        let rows = self.check_rectangular("get_rows_averages")?;
        let columns = self.len() as f64;
        Ok((0..rows)
            .map(|row| self.iter().map(|column| column[row]).sum::<f64>() / columns)
            .collect())
    }

    /// The `index`-th number of every column; `NaN` for short columns.
    pub fn get_row(&self, index: usize) -> NumberList {
        self.iter()
            .map(|column| column.get(index).copied().unwrap_or(f64::NAN))
            .collect()
    }

    /// Smallest and largest number across all columns.
    pub fn get_interval(&self) -> Option<Interval> {
        self.iter()
            .filter_map(NumberList::get_interval)
            .reduce(|a, b| Interval::new(a.min().min(b.min()), a.max().max(b.max())))
    }

    /// Rows become columns.
    ///
    /// # Errors
    ///
    /// [`ListError::ShapeMismatch`] if the columns differ in length.
    pub fn get_transposed(&self) -> Result<Self> {
        let rows = self.check_rectangular("get_transposed")?;
        Ok(self.derive(
            (0..rows)
                .map(|row| self.iter().map(|column| column[row]).collect())
                .collect(),
        ))
    }

    /// The same columns in a plain [`Table`].
    pub fn to_table(&self) -> Table {
        self.iter()
            .cloned()
            .map(NumberList::into_container)
            .collect::<Table>()
            .named(self.name.clone())
    }

    /// # Errors
    ///
    /// [`ListError::ShapeMismatch`] if the columns differ in length.
    #[cfg(feature = "matrix")]
    pub fn to_matrix(&self) -> Result<DMatrix<f64>> {
        let rows = self.check_rectangular("to_matrix")?;
        Ok(DMatrix::from_fn(rows, self.len(), |row, column| {
            self[column][row]
        }))
    }

    #[cfg(feature = "matrix")]
    pub fn from_matrix(matrix: &DMatrix<f64>) -> Self {
        matrix
            .column_iter()
            .map(|column| column.iter().copied().collect::<NumberList>())
            .collect()
    }
}

impl TypedList<Polygon> {
    /// Barycenters of the non-empty polygons.
    pub fn get_barycenters(&self) -> Polygon {
        self.iter().filter_map(Polygon::get_barycenter).collect()
    }
}

impl From<&PolygonList> for Table {
    fn from(polygons: &PolygonList) -> Self {
        polygons
            .iter()
            .cloned()
            .map(Polygon::into_container)
            .collect::<Table>()
            .named(polygons.name.clone())
    }
}
