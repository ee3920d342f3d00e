use crate::error::Error;
use std::ops::Range;

/// A rectangular, headerless table of text cells.
///
/// Cells are kept as read from disk, no column is typed.
/// A table without rows has no columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
    num_cols: usize,
}

impl Table {
    /// Builds a table, failing if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, Error> {
        let num_cols = rows.first().map_or(0, |r| r.len());
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != num_cols) {
            return Err(Error::RaggedRow {
                row,
                expected: num_cols,
                found: r.len(),
            });
        }
        Ok(Self { rows, num_cols })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Mutable access to the cells of each row. Row lengths stay fixed.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [String]> {
        self.rows.iter_mut().map(|r| r.as_mut_slice())
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn column(&self, ix: usize) -> Result<Vec<&str>, Error> {
        self.check_column(ix)?;
        Ok(self.rows.iter().map(|r| r[ix].as_str()).collect())
    }

    pub fn check_column(&self, ix: usize) -> Result<(), Error> {
        if ix >= self.num_cols {
            return Err(Error::ColumnOutOfRange {
                column: ix,
                num_columns: self.num_cols,
            });
        }
        Ok(())
    }

    /// Copies the columns in `range` into a new table, keeping row order.
    pub fn select_columns(&self, range: Range<usize>) -> Result<Self, Error> {
        if range.end > self.num_cols {
            return Err(Error::ColumnOutOfRange {
                column: range.end.saturating_sub(1),
                num_columns: self.num_cols,
            });
        }
        Ok(Self {
            rows: self.rows.iter().map(|r| r[range.clone()].to_vec()).collect(),
            num_cols: if self.rows.is_empty() { 0 } else { range.len() },
        })
    }

    /// Column-wise concatenation, aligned by row position.
    pub fn hcat(&self, other: &Table) -> Result<Self, Error> {
        if self.num_rows() != other.num_rows() {
            return Err(Error::RowCountMismatch {
                left: self.num_rows(),
                right: other.num_rows(),
            });
        }
        let rows = self
            .rows
            .iter()
            .zip(other.rows.iter())
            .map(|(l, r)| l.iter().chain(r.iter()).cloned().collect())
            .collect();
        Ok(Self {
            rows,
            num_cols: self.num_cols + other.num_cols,
        })
    }

    pub fn transpose(&self) -> Self {
        let rows: Vec<Vec<String>> = (0..self.num_cols)
            .map(|c| self.rows.iter().map(|r| r[c].clone()).collect())
            .collect();
        let num_cols = if rows.is_empty() { 0 } else { self.num_rows() };
        Self { rows, num_cols }
    }
}

#[cfg(test)]
pub(crate) fn table(rows: &[&[&str]]) -> Table {
    Table::from_rows(
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
    .unwrap()
}
