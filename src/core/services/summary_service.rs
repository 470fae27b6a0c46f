use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use crate::ledger::{Category, Expense};

/// Spending for one category within a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: Category,
    pub total_value: f64,
    /// Share of all spending, rounded to a whole percent.
    pub percentage: u32,
    pub color_token: &'static str,
}

/// Derived spending summaries. Always recomputed from the expenses passed in.
pub struct SummaryService;

impl SummaryService {
    /// Groups expenses by category, largest total first. Categories with equal totals keep
    /// the order in which they first appear in `expenses`.
    pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategorySlice> {
        let mut order: Vec<&Category> = Vec::new();
        let mut totals: HashMap<&Category, f64> = HashMap::new();
        for expense in expenses {
            let entry = totals.entry(&expense.category).or_insert_with(|| {
                order.push(&expense.category);
                0.0
            });
            *entry += expense.price;
        }

        let grand_total: f64 = order.iter().map(|category| totals[*category]).sum();

        let mut slices: Vec<CategorySlice> = order
            .into_iter()
            .map(|category| {
                let total_value = totals[category];
                CategorySlice {
                    category: category.clone(),
                    total_value,
                    percentage: percentage_of(total_value, grand_total),
                    color_token: category.color_token(),
                }
            })
            .collect();
        slices.sort_by(|a, b| {
            b.total_value
                .partial_cmp(&a.total_value)
                .unwrap_or(Ordering::Equal)
        });
        slices
    }

    /// The `limit` largest categories of [`SummaryService::category_breakdown`].
    pub fn top_categories(expenses: &[Expense], limit: usize) -> Vec<CategorySlice> {
        let mut slices = Self::category_breakdown(expenses);
        slices.truncate(limit);
        slices
    }
}

fn percentage_of(value: f64, total: f64) -> u32 {
    if total > 0.0 {
        (value / total * 100.0).round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ExpenseDraft, ExpenseId};

    fn expenses(rows: &[(&str, f64)]) -> Vec<Expense> {
        rows.iter()
            .enumerate()
            .map(|(idx, (category, price))| {
                ExpenseDraft::new(format!("e{idx}"), *price, *category, "2024-01-01")
                    .into_expense(ExpenseId(idx as u64 + 1))
            })
            .collect()
    }

    #[test]
    fn breakdown_sorts_by_total_descending() {
        let slices = SummaryService::category_breakdown(&expenses(&[
            ("Food", 30.0),
            ("Food", 10.0),
            ("Travel", 60.0),
        ]));
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].category, Category::Travel);
        assert_eq!(slices[0].total_value, 60.0);
        assert_eq!(slices[0].percentage, 60);
        assert_eq!(slices[1].category, Category::Food);
        assert_eq!(slices[1].total_value, 40.0);
        assert_eq!(slices[1].percentage, 40);
        assert_eq!(slices[1].color_token, Category::Food.color_token());
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let slices = SummaryService::category_breakdown(&expenses(&[
            ("Shopping", 25.0),
            ("Utilities", 25.0),
            ("Entertainment", 50.0),
        ]));
        let order: Vec<_> = slices.iter().map(|slice| slice.category.clone()).collect();
        assert_eq!(
            order,
            vec![Category::Entertainment, Category::Shopping, Category::Utilities]
        );
    }

    #[test]
    fn percentages_are_rounded_individually() {
        let slices = SummaryService::category_breakdown(&expenses(&[
            ("Food", 1.0),
            ("Travel", 1.0),
            ("Other", 1.0),
        ]));
        assert!(slices.iter().all(|slice| slice.percentage == 33));
    }

    #[test]
    fn custom_categories_use_other_color() {
        let slices = SummaryService::category_breakdown(&expenses(&[("Pets", 12.0)]));
        assert_eq!(slices[0].category, Category::Custom("Pets".into()));
        assert_eq!(slices[0].color_token, Category::Other.color_token());
        assert_eq!(slices[0].percentage, 100);
    }

    #[test]
    fn empty_expenses_produce_empty_breakdown() {
        assert!(SummaryService::category_breakdown(&[]).is_empty());
        assert!(SummaryService::top_categories(&[], 3).is_empty());
    }

    #[test]
    fn top_categories_truncates() {
        let rows = expenses(&[
            ("Food", 5.0),
            ("Travel", 4.0),
            ("Utilities", 3.0),
            ("Shopping", 2.0),
        ]);
        let top = SummaryService::top_categories(&rows, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[2].category, Category::Utilities);
    }
}
