use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;

/// Ledger-unique expense identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub u64);

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single recorded expense. Edits replace the whole record; the id never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub title: String,
    pub price: f64,
    pub category: Category,
    /// ISO 8601 calendar date supplied by the user.
    pub date: String,
}

impl Expense {
    /// Parses `date` when it is a plain `YYYY-MM-DD` value.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

/// Field values for a new or edited expense, everything except the id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub price: f64,
    pub category: Category,
    pub date: String,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        price: f64,
        category: impl Into<Category>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price,
            category: category.into(),
            date: date.into(),
        }
    }

    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            title: self.title,
            price: self.price,
            category: self.category,
            date: self.date,
        }
    }
}

impl From<&Expense> for ExpenseDraft {
    fn from(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            price: expense.price,
            category: expense.category.clone(),
            date: expense.date.clone(),
        }
    }
}
