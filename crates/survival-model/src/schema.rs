//! Positional column convention shared by every input format.
//!
//! Input tables carry arbitrary headers. Fields are located by position:
//!
//! - status code: second column (index 1)
//! - time: second-from-last column
//! - quantity: last column
//!
//! The three roles must land on distinct columns, so a table needs at least
//! [`MIN_COLUMNS`] columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest column count for which the three roles do not overlap.
pub const MIN_COLUMNS: usize = 4;

/// Role a column plays in the positional schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    Status,
    Time,
    Quantity,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Status => "status",
            ColumnRole::Time => "time",
            ColumnRole::Quantity => "quantity",
        }
    }

    /// Human description of where the role is found.
    pub fn position_label(&self) -> &'static str {
        match self {
            ColumnRole::Status => "second column",
            ColumnRole::Time => "second-from-last column",
            ColumnRole::Quantity => "last column",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved column indices for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub status: usize,
    pub time: usize,
    pub quantity: usize,
    pub status_name: String,
    pub time_name: String,
    pub quantity_name: String,
}

impl ColumnLayout {
    /// Resolve the layout from header names. Returns `None` when there are
    /// fewer than [`MIN_COLUMNS`] headers.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Option<Self> {
        let count = headers.len();
        if count < MIN_COLUMNS {
            return None;
        }
        let status = 1;
        let time = count - 2;
        let quantity = count - 1;
        Some(Self {
            status,
            time,
            quantity,
            status_name: headers[status].as_ref().to_string(),
            time_name: headers[time].as_ref().to_string(),
            quantity_name: headers[quantity].as_ref().to_string(),
        })
    }

    pub fn index_of(&self, role: ColumnRole) -> usize {
        match role {
            ColumnRole::Status => self.status,
            ColumnRole::Time => self.time,
            ColumnRole::Quantity => self.quantity,
        }
    }

    pub fn name_of(&self, role: ColumnRole) -> &str {
        match role {
            ColumnRole::Status => &self.status_name,
            ColumnRole::Time => &self.time_name,
            ColumnRole::Quantity => &self.quantity_name,
        }
    }
}

/// All roles in schema order.
pub const COLUMN_ROLES: [ColumnRole; 3] =
    [ColumnRole::Status, ColumnRole::Time, ColumnRole::Quantity];
