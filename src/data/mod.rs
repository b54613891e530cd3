//! Binary user × item interaction data.
//!
//! The [`InteractionMatrix`] is the raw input to similarity computation:
//! one row per user, one column per item, cells 0 or 1. Users are
//! identified by the dense, zero-based index assigned when their row was
//! appended; items by a case-normalized string name. Rows are append-only
//! and never deleted.

use crate::error::{Result, SugerirError};
use crate::primitives::Vector;
use serde::{Deserialize, Serialize};

/// Case-normalizes an item name (trim + lowercase), matching how the
/// catalog headers are ingested.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A binary user × item interaction matrix with named item columns.
///
/// # Examples
///
/// ```
/// use sugerir::data::InteractionMatrix;
///
/// let mut m = InteractionMatrix::from_rows(
///     &["Metallica", "Iron Maiden", "ABBA"],
///     &[
///         &[1.0, 1.0, 0.0],
///         &[0.0, 0.0, 1.0],
///     ],
/// ).unwrap();
///
/// assert_eq!(m.n_users(), 2);
/// assert_eq!(m.item_names(), &["metallica", "iron maiden", "abba"]);
///
/// let idx = m.add_user(&["ABBA"]).unwrap();
/// assert_eq!(idx, 2);
/// assert_eq!(m.user_row(2).unwrap(), &[0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionMatrix {
    items: Vec<String>,
    /// Row-major interaction values, `n_users * items.len()` cells.
    data: Vec<f32>,
}

impl InteractionMatrix {
    /// Creates an empty matrix (no users yet) over the given item columns.
    ///
    /// Item names are case-normalized and must be non-empty and unique
    /// after normalization. The catalog itself must be non-empty: with no
    /// item columns, appended rows would be zero-length and user index
    /// assignment would never advance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty catalog, or for empty or
    /// duplicate item names.
    pub fn new<S: AsRef<str>>(item_names: &[S]) -> Result<Self> {
        if item_names.is_empty() {
            return Err(SugerirError::invalid_input(
                "interaction matrix needs at least one item column",
            ));
        }

        let items: Vec<String> = item_names
            .iter()
            .map(|n| normalize_name(n.as_ref()))
            .collect();

        for (i, name) in items.iter().enumerate() {
            if name.is_empty() {
                return Err(SugerirError::invalid_input(format!(
                    "item column {i} has an empty name"
                )));
            }
            if items[..i].contains(name) {
                return Err(SugerirError::invalid_input(format!(
                    "duplicate item name '{name}'"
                )));
            }
        }

        Ok(Self {
            items,
            data: Vec::new(),
        })
    }

    /// Creates a matrix from item names and user rows.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any row length doesn't match the item
    /// count, or any cell is not 0 or 1.
    pub fn from_rows<S: AsRef<str>>(item_names: &[S], rows: &[&[f32]]) -> Result<Self> {
        let mut matrix = Self::new(item_names)?;
        for row in rows {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    /// Creates a matrix from the boundary form: ordered item names plus
    /// row-major binary values.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the value count is not a multiple of the
    /// item count, or any cell is not 0 or 1.
    pub fn from_row_major<S: AsRef<str>>(item_names: &[S], values: &[f32]) -> Result<Self> {
        let mut matrix = Self::new(item_names)?;
        let n_items = matrix.items.len();
        if values.len() % n_items != 0 {
            return Err(SugerirError::invalid_input(format!(
                "{} values do not form whole rows of {n_items} items",
                values.len()
            )));
        }
        for row in values.chunks(n_items) {
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }

    /// Parses CSV text with a header row: a user-identifier column plus one
    /// column per item, then one binary row per user.
    ///
    /// Header names are case-normalized; the user column is matched after
    /// normalization and its cells are ignored (the row position is the
    /// user's identity).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the header is missing the user column,
    /// a row has the wrong cell count, or a cell is not 0 or 1.
    pub fn from_csv_str(text: &str, user_column: &str) -> Result<Self> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| SugerirError::invalid_input("empty CSV input"))?;

        let header_cells: Vec<String> = header.split(',').map(normalize_name).collect();
        let user_col = normalize_name(user_column);
        let user_pos = header_cells
            .iter()
            .position(|c| *c == user_col)
            .ok_or_else(|| {
                SugerirError::invalid_input(format!("user column '{user_col}' not in CSV header"))
            })?;

        let item_names: Vec<&String> = header_cells
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != user_pos)
            .map(|(_, c)| c)
            .collect();
        let mut matrix = Self::new(&item_names)?;

        let mut row = Vec::with_capacity(item_names.len());
        for (line_no, line) in lines.enumerate() {
            let cells: Vec<&str> = line.split(',').collect();
            if cells.len() != header_cells.len() {
                return Err(SugerirError::invalid_input(format!(
                    "CSV row {} has {} cells, expected {}",
                    line_no + 2,
                    cells.len(),
                    header_cells.len()
                )));
            }
            row.clear();
            for (i, cell) in cells.iter().enumerate() {
                if i == user_pos {
                    continue;
                }
                let value: f32 = cell.trim().parse().map_err(|_| {
                    SugerirError::invalid_input(format!(
                        "CSV row {}: cell '{}' is not numeric",
                        line_no + 2,
                        cell.trim()
                    ))
                })?;
                row.push(value);
            }
            matrix.push_row(&row)?;
        }

        Ok(matrix)
    }

    /// Returns the number of user rows.
    #[must_use]
    pub fn n_users(&self) -> usize {
        // items is never empty: construction rejects an empty catalog.
        self.data.len() / self.items.len()
    }

    /// Returns the number of item columns.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Returns the item names in column order (case-normalized).
    #[must_use]
    pub fn item_names(&self) -> &[String] {
        &self.items
    }

    /// Returns the column index of an item, matching after normalization.
    #[must_use]
    pub fn item_index(&self, name: &str) -> Option<usize> {
        let normalized = normalize_name(name);
        self.items.iter().position(|n| *n == normalized)
    }

    /// Returns a user's interaction row.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the index is out of range.
    pub fn user_row(&self, index: usize) -> Result<&[f32]> {
        if index >= self.n_users() {
            return Err(SugerirError::UserNotFound {
                index,
                n_users: self.n_users(),
            });
        }
        let start = index * self.items.len();
        Ok(&self.data[start..start + self.items.len()])
    }

    /// Returns an item's interaction column as a vector over all users.
    ///
    /// # Panics
    ///
    /// Panics if the column index is out of bounds.
    #[must_use]
    pub fn item_column(&self, col: usize) -> Vector<f32> {
        assert!(col < self.items.len(), "item column {col} out of bounds");
        let n_items = self.items.len();
        let data: Vec<f32> = (0..self.n_users())
            .map(|row| self.data[row * n_items + col])
            .collect();
        Vector::from_vec(data)
    }

    /// Returns the names of the items a user has interacted with.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the index is out of range.
    pub fn liked_items(&self, index: usize) -> Result<Vec<String>> {
        let row = self.user_row(index)?;
        Ok(row
            .iter()
            .zip(self.items.iter())
            .filter(|(&v, _)| v == 1.0)
            .map(|(_, name)| name.clone())
            .collect())
    }

    /// Appends a new user who interacted with exactly the given items,
    /// returning the assigned user index.
    ///
    /// Validation happens up front: on error no row is appended.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem` if any name is not an item column.
    pub fn add_user<S: AsRef<str>>(&mut self, liked: &[S]) -> Result<usize> {
        let mut row = vec![0.0; self.items.len()];
        for name in liked {
            let col = self
                .item_index(name.as_ref())
                .ok_or_else(|| SugerirError::UnknownItem {
                    name: name.as_ref().to_string(),
                })?;
            row[col] = 1.0;
        }
        let index = self.n_users();
        self.data.extend_from_slice(&row);
        Ok(index)
    }

    fn push_row(&mut self, row: &[f32]) -> Result<()> {
        if row.len() != self.items.len() {
            return Err(SugerirError::invalid_input(format!(
                "row has {} values, expected {} (one per item)",
                row.len(),
                self.items.len()
            )));
        }
        for &value in row {
            if value != 0.0 && value != 1.0 {
                return Err(SugerirError::invalid_input(format!(
                    "interaction values must be 0 or 1, got {value}"
                )));
            }
        }
        self.data.extend_from_slice(row);
        Ok(())
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
