//! Date-indexed column tables shared by every pipeline stage.

use crate::domain::errors::FrameError;
use crate::domain::market::signal::Signal;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A table of named columns over a shared ascending date index.
///
/// Column order is insertion order, which the pipeline keeps equal to the
/// configured pair order.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFrame<T> {
    index: Vec<NaiveDate>,
    columns: Vec<String>,
    data: HashMap<String, Vec<T>>,
}

/// Closing prices (plus moving-average columns once extended). `None` marks a
/// leading gap before a pair's first observation.
pub type PriceTable = DateFrame<Option<f64>>;

/// Daily percentage returns.
pub type ReturnTable = DateFrame<Option<f64>>;

/// Rolling annualized volatility.
pub type VolatilityTable = DateFrame<Option<f64>>;

/// Crossover signal per pair and date.
pub type SignalTable = DateFrame<Signal>;

impl<T> DateFrame<T> {
    pub fn new(index: Vec<NaiveDate>) -> Self {
        Self {
            index,
            columns: Vec::new(),
            data: HashMap::new(),
        }
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[T]> {
        self.data.get(name).map(Vec::as_slice)
    }

    pub fn get(&self, name: &str, row: usize) -> Option<&T> {
        self.data.get(name).and_then(|values| values.get(row))
    }

    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<T>) -> Result<(), FrameError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(FrameError::LengthMismatch {
                column: name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }
        if self.data.contains_key(&name) {
            return Err(FrameError::DuplicateColumn { column: name });
        }
        self.columns.push(name.clone());
        self.data.insert(name, values);
        Ok(())
    }

    /// Iterates `(column, value)` for one row in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.columns.iter().filter_map(move |name| {
            self.data
                .get(name)
                .and_then(|values| values.get(row))
                .map(|value| (name.as_str(), value))
        })
    }
}

impl<T: Clone> DateFrame<T> {
    /// The last `n` rows (all rows when fewer exist).
    pub fn tail(&self, n: usize) -> Self {
        let start = self.index.len().saturating_sub(n);
        self.slice_from(start)
    }

    /// Rows from `start` onwards.
    pub fn slice_from(&self, start: usize) -> Self {
        let start = start.min(self.index.len());
        Self {
            index: self.index[start..].to_vec(),
            columns: self.columns.clone(),
            data: self
                .data
                .iter()
                .map(|(name, values)| (name.clone(), values[start..].to_vec()))
                .collect(),
        }
    }

    /// Keeps only the named columns, in the given order. Unknown names are skipped.
    pub fn select(&self, names: &[String]) -> Self {
        let mut selected = Self::new(self.index.clone());
        for name in names {
            if let Some(values) = self.data.get(name) {
                selected.columns.push(name.clone());
                selected.data.insert(name.clone(), values.clone());
            }
        }
        selected
    }

    /// Appends every column of `other` (which must share this index).
    pub fn extend_with(&mut self, other: &Self) -> Result<(), FrameError> {
        for name in other.columns() {
            if let Some(values) = other.column(name) {
                self.insert_column(name.clone(), values.to_vec())?;
            }
        }
        Ok(())
    }
}
