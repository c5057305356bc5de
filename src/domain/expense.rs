use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Amount, NumericInput, UserId};

pub type ExpenseId = i64;

/// Label shown for a category total whose category is empty.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A dated expense owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    /// Expected positive; the sign is not enforced
    pub amount: Amount,
    /// Free-form label used for grouping
    pub category: String,
    pub date: ExpenseDate,
    pub owner_id: UserId,
}

/// The date of a stored expense.
///
/// Everything written through [`NewExpense`] is a calendar date. Databases
/// filled by older clients may hold free text in the same column; such rows
/// keep their text verbatim instead of failing to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpenseDate {
    Calendar(NaiveDate),
    Legacy(String),
}

impl ExpenseDate {
    pub fn calendar(&self) -> Option<NaiveDate> {
        match self {
            ExpenseDate::Calendar(date) => Some(*date),
            ExpenseDate::Legacy(_) => None,
        }
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(value: NaiveDate) -> Self {
        ExpenseDate::Calendar(value)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // NaiveDate displays as YYYY-MM-DD
            ExpenseDate::Calendar(date) => write!(f, "{}", date),
            ExpenseDate::Legacy(text) => write!(f, "{}", text),
        }
    }
}

/// A validated expense ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Amount,
    pub category: String,
    /// Calendar date without timezone, stored as YYYY-MM-DD
    pub date: NaiveDate,
    pub owner_id: UserId,
}

/// An expense as submitted by a client, before validation.
/// Every field may be missing; numeric fields may arrive as strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub description: Option<String>,
    pub amount: Option<NumericInput>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub owner_id: Option<NumericInput>,
}

impl ExpenseDraft {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<NumericInput>,
        category: impl Into<String>,
        date: impl Into<String>,
        owner_id: impl Into<NumericInput>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            amount: Some(amount.into()),
            category: Some(category.into()),
            date: Some(date.into()),
            owner_id: Some(owner_id.into()),
        }
    }
}

/// Sum of amounts for one category of one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

impl CategoryTotal {
    /// Display label, falling back to [`UNCATEGORIZED_LABEL`] for an empty category.
    pub fn label(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED_LABEL
        } else {
            &self.category
        }
    }
}

/// Outcome of deleting an expense by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    /// Rows affected: 0 or 1
    pub changes: u64,
}

impl Removal {
    pub fn deleted(&self) -> bool {
        self.changes > 0
    }
}
