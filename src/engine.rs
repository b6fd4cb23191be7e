// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derived-state computation over the ledger. Nothing here touches the
//! store or the network; callers recompute on every relevant state change.

use std::fmt;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Account, Budget, Category, Goal, Transaction, TransactionType};

/// Flat 8% heuristic applied to expenses for the tax estimate stat.
fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Case-insensitive substring filter over description OR category, plus an
/// optional account restriction (`None` means all accounts). An empty query
/// matches everything. Input order is preserved.
pub fn filter_transactions(
    txs: &[Transaction],
    query: &str,
    account: Option<Account>,
) -> Vec<Transaction> {
    let needle = query.to_lowercase();
    txs.iter()
        .filter(|t| {
            let matches_search = needle.is_empty()
                || t.description.to_lowercase().contains(&needle)
                || t.category.label().to_lowercase().contains(&needle);
            let matches_account = account.is_none_or(|a| t.account_id == a);
            matches_search && matches_account
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub tax_estimate: Decimal,
}

/// Aggregate totals for a (possibly filtered) transaction list. An empty
/// list yields all zeros.
pub fn compute_stats(txs: &[Transaction]) -> Stats {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for t in txs {
        match t.r#type {
            TransactionType::Income => income += t.amount,
            TransactionType::Expense => expenses += t.amount,
        }
    }
    Stats {
        income,
        expenses,
        balance: income - expenses,
        tax_estimate: expenses * tax_rate(),
    }
}

/// Share of income kept after expenses, as a percentage. Zero income yields
/// zero rather than a division error.
pub fn savings_rate(stats: &Stats) -> Decimal {
    if stats.income.is_zero() {
        return Decimal::ZERO;
    }
    (stats.income - stats.expenses) / stats.income * Decimal::ONE_HUNDRED
}

/// Expense totals grouped by category. Order is first-occurrence order, which
/// downstream consumers rely on for stable chart segment coloring by index.
pub fn category_breakdown(txs: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut out: Vec<(Category, Decimal)> = Vec::new();
    for t in txs {
        if t.r#type != TransactionType::Expense {
            continue;
        }
        match out.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, total)) => *total += t.amount,
            None => out.push((t.category, t.amount)),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "normal"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Display percentage, clamped at 100 even when overspent.
    pub percentage: Decimal,
    /// Unclamped utilization percentage; drives the severity banding.
    pub ratio: Decimal,
    pub severity: Severity,
}

/// Utilization for each budget against the FULL transaction list (budgets are
/// not subject to the search/account filter). A non-positive limit never
/// divides; it reports zero utilization.
pub fn budget_utilization(budgets: &[Budget], txs: &[Transaction]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| {
            let spent: Decimal = txs
                .iter()
                .filter(|t| t.r#type == TransactionType::Expense && t.category == b.category)
                .map(|t| t.amount)
                .sum();
            let ratio = if b.limit > Decimal::ZERO {
                spent / b.limit * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };
            let severity = if ratio > Decimal::new(90, 0) {
                Severity::Critical
            } else if ratio > Decimal::new(70, 0) {
                Severity::Warning
            } else {
                Severity::Normal
            };
            BudgetStatus {
                category: b.category,
                limit: b.limit,
                spent,
                percentage: ratio.min(Decimal::ONE_HUNDRED),
                ratio,
                severity,
            }
        })
        .collect()
}

/// Progress toward a goal, unclamped (a surpassed goal reads above 100). A
/// non-positive target yields zero; goal creation rejects such targets.
pub fn goal_progress(goal: &Goal) -> Decimal {
    if goal.target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    goal.current_amount / goal.target_amount * Decimal::ONE_HUNDRED
}

/// CSV projection of the ledger in store order. Fixed header, RFC-4180
/// quoting for embedded commas/quotes. Byte-identical across repeated runs
/// on the same list.
pub fn transactions_to_csv(txs: &[Transaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Date", "Description", "Category", "Amount", "Type", "Account"])?;
    for t in txs {
        wtr.write_record([
            t.date.to_string(),
            t.description.clone(),
            t.category.label().to_string(),
            t.amount.to_string(),
            t.r#type.to_string(),
            t.account_id.label().to_string(),
        ])?;
    }
    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Flush CSV buffer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
