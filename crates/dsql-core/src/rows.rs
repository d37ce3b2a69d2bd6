//! Forward-only row cursor over a projected result.

use std::vec;

use dsql_model::Item;

use crate::error::RowsError;
use crate::projection::{NumberPolicy, Projection, Value, realize_row};

/// Outcome of [`Rows::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The buffer holds the next row.
    Row,
    /// No rows remain. Returned again on every later call.
    EndOfData,
}

/// Read-once cursor over projected rows.
///
/// The column order is fixed when the cursor is built and never changes.
/// After [`Rows::close`] the cursor behaves as exhausted.
#[derive(Debug)]
pub struct Rows {
    columns: Vec<String>,
    items: Option<vec::IntoIter<Item>>,
    policy: NumberPolicy,
}

impl Rows {
    /// Build a cursor over `projection`.
    #[must_use]
    pub fn new(projection: Projection, policy: NumberPolicy) -> Self {
        Self {
            columns: projection.columns,
            items: Some(projection.items.into_iter()),
            policy,
        }
    }

    /// A cursor with no columns and no rows, returned for statements that
    /// produce no result set.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Projection::default(), NumberPolicy::default())
    }

    /// Resolved column order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fill `row` with the next row in column order.
    ///
    /// On error or at the end of data the buffer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RowsError::BufferWidth`] when `row` is not exactly one slot
    /// per column, and [`RowsError::InvalidNumber`] for a non-integer number
    /// under [`NumberPolicy::Strict`].
    pub fn advance(&mut self, row: &mut [Value]) -> Result<Advance, RowsError> {
        if row.len() != self.columns.len() {
            return Err(RowsError::BufferWidth {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }

        let Some(item) = self.items.as_mut().and_then(Iterator::next) else {
            return Ok(Advance::EndOfData);
        };
        let values = realize_row(&self.columns, &item, self.policy)?;
        for (slot, value) in row.iter_mut().zip(values) {
            *slot = value;
        }
        Ok(Advance::Row)
    }

    /// Release the remaining items. Safe to call more than once.
    pub fn close(&mut self) {
        self.items = None;
    }

    /// Returns `true` once [`Rows::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.items.is_none()
    }
}

impl Iterator for Rows {
    type Item = Result<Vec<Value>, RowsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.as_mut()?.next()?;
        Some(realize_row(&self.columns, &item, self.policy))
    }
}
