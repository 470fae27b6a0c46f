//! Page slicing over the newest-first expense list.

use serde::Serialize;

use crate::{
    errors::{LedgerError, Result},
    ledger::Expense,
};

/// Number of pages needed for `len` items; zero when there are no items.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// Returns `items[(page_number - 1) * page_size .. page_number * page_size]`, clamped to the
/// end of `items`. Pages past the end are empty.
pub fn paginate<T>(items: &[T], page_size: usize, page_number: usize) -> Result<&[T]> {
    if page_size == 0 {
        return Err(LedgerError::InvalidInput(
            "page size must be greater than zero".into(),
        ));
    }
    if page_number == 0 {
        return Err(LedgerError::InvalidInput("page numbers start at 1".into()));
    }
    let start = (page_number - 1).saturating_mul(page_size).min(items.len());
    let end = page_number.saturating_mul(page_size).min(items.len());
    Ok(&items[start..end])
}

/// Cursor over the transaction list, kept within `1..=max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current_page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Advances one page when a later page exists. Returns whether the cursor moved.
    pub fn next_page(&mut self, len: usize) -> bool {
        if self.current_page < self.total_pages(len) {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Steps back one page unless already on the first. Returns whether the cursor moved.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Jumps to `page`, clamped to the available pages.
    pub fn go_to(&mut self, page: usize, len: usize) {
        self.current_page = page.clamp(1, self.total_pages(len).max(1));
    }

    /// Pulls the cursor back after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        let last = self.total_pages(len).max(1);
        if self.current_page > last {
            self.current_page = last;
        }
    }

    pub fn page<'a>(&self, expenses: &'a [Expense]) -> RecentPage<'a> {
        let items = paginate(expenses, self.page_size, self.current_page).unwrap_or(&[]);
        RecentPage {
            items,
            current_page: self.current_page,
            total_pages: self.total_pages(expenses.len()),
        }
    }
}

/// The visible slice of the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentPage<'a> {
    pub items: &'a [Expense],
    pub current_page: usize,
    /// `ceil(len / page_size)`; zero for an empty ledger.
    pub total_pages: usize,
}

impl RecentPage<'_> {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// `Page 1 of 3`; an empty ledger reads as a single empty page.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages.max(1))
    }
}
