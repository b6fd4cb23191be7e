// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state and the command funnel around it. Every mutation goes
//! through a method here, and every committed mutation persists its store
//! before returning; nothing else writes to the medium.

use chrono::Local;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::advice::{AdviceClient, AdviceError, INSIGHT_FALLBACK, ReceiptFields};
use crate::engine::{self, BudgetStatus, Stats};
use crate::models::{
    Account, Budget, Category, Goal, NewTransaction, Transaction, TransactionType, ValidationError,
};
use crate::store::{CurrencyLabel, Settings, Store, StoreError};

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct AppState {
    store: Store,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    goals: Vec<Goal>,
    settings: Settings,
    query: String,
    account_filter: Option<Account>,
    insight: Option<String>,
    insight_loading: bool,
}

impl AppState {
    /// Loads the three stores (seeding budgets/goals on first run) plus the
    /// display settings.
    pub fn load(store: Store) -> Result<AppState, StateError> {
        let transactions = store.load_transactions()?;
        let budgets = store.load_budgets()?;
        let goals = store.load_goals()?;
        let settings = store.load_settings()?;
        Ok(AppState {
            store,
            transactions,
            budgets,
            goals,
            settings,
            query: String::new(),
            account_filter: None,
            insight: None,
            insight_loading: false,
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn insight(&self) -> Option<&str> {
        self.insight.as_deref()
    }

    pub fn insight_loading(&self) -> bool {
        self.insight_loading
    }

    // --- Ledger commands ---

    /// Single creation entry point: manual entry and the receipt-extraction
    /// path both land here. Prepends (the ledger is most-recent-first) and
    /// persists on commit.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Uuid, StateError> {
        let tx = draft.into_transaction()?;
        let id = tx.id;
        self.transactions.insert(0, tx);
        self.store.save_transactions(&self.transactions)?;
        Ok(id)
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> Result<(), StateError> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() == before {
            return Err(ValidationError::UnknownTransaction(id).into());
        }
        self.store.save_transactions(&self.transactions)?;
        Ok(())
    }

    /// Drops every ledger entry. Returns how many were removed.
    pub fn clear_transactions(&mut self) -> Result<usize, StateError> {
        let removed = self.transactions.len();
        self.transactions.clear();
        self.store.save_transactions(&self.transactions)?;
        Ok(removed)
    }

    // --- Budget commands (wholesale replacement semantics) ---

    /// Sets the cap for one category, overwriting any existing budget for it.
    pub fn set_budget(&mut self, category: Category, limit: Decimal) -> Result<(), StateError> {
        if limit <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveLimit.into());
        }
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(b) => b.limit = limit,
            None => self.budgets.push(Budget { category, limit }),
        }
        self.store.save_budgets(&self.budgets)?;
        Ok(())
    }

    pub fn replace_budgets(&mut self, budgets: Vec<Budget>) -> Result<(), StateError> {
        if budgets.iter().any(|b| b.limit <= Decimal::ZERO) {
            return Err(ValidationError::NonPositiveLimit.into());
        }
        self.budgets = budgets;
        self.store.save_budgets(&self.budgets)?;
        Ok(())
    }

    // --- Goal commands ---

    pub fn add_goal(
        &mut self,
        name: String,
        target_amount: Decimal,
        deadline: Option<chrono::NaiveDate>,
    ) -> Result<Uuid, StateError> {
        if target_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveTarget.into());
        }
        let goal = Goal {
            id: Uuid::new_v4(),
            name,
            target_amount,
            current_amount: Decimal::ZERO,
            deadline,
        };
        let id = goal.id;
        self.goals.push(goal);
        self.store.save_goals(&self.goals)?;
        Ok(id)
    }

    /// Sets a goal's saved-so-far amount. Independent of the ledger; the user
    /// owns this number.
    pub fn set_goal_current(&mut self, id: Uuid, amount: Decimal) -> Result<(), StateError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeGoalAmount.into());
        }
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(ValidationError::UnknownGoal(id))?;
        goal.current_amount = amount;
        self.store.save_goals(&self.goals)?;
        Ok(())
    }

    pub fn replace_goals(&mut self, goals: Vec<Goal>) -> Result<(), StateError> {
        if goals.iter().any(|g| g.target_amount <= Decimal::ZERO) {
            return Err(ValidationError::NonPositiveTarget.into());
        }
        self.goals = goals;
        self.store.save_goals(&self.goals)?;
        Ok(())
    }

    // --- Filter & display settings ---

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_account_filter(&mut self, account: Option<Account>) {
        self.account_filter = account;
    }

    pub fn set_currency_label(&mut self, currency: CurrencyLabel) -> Result<(), StateError> {
        self.settings.currency = currency;
        self.store.save_settings(&self.settings)?;
        Ok(())
    }

    pub fn set_secure_mode(&mut self, on: bool) -> Result<(), StateError> {
        self.settings.secure_mode = on;
        self.store.save_settings(&self.settings)?;
        Ok(())
    }

    // --- Derived state ---

    pub fn filtered(&self) -> Vec<Transaction> {
        engine::filter_transactions(&self.transactions, &self.query, self.account_filter)
    }

    /// Aggregate stats over the filtered view, as the dashboard shows them.
    pub fn stats(&self) -> Stats {
        engine::compute_stats(&self.filtered())
    }

    pub fn breakdown(&self) -> Vec<(Category, Decimal)> {
        engine::category_breakdown(&self.filtered())
    }

    /// Budget utilization runs over the full, unfiltered ledger.
    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        engine::budget_utilization(&self.budgets, &self.transactions)
    }

    // --- Advice ---

    /// Marks the shared loading flag, rejecting a second request while one is
    /// in flight.
    pub fn begin_insight(&mut self) -> Result<(), StateError> {
        if self.insight_loading {
            return Err(ValidationError::InsightInFlight.into());
        }
        self.insight_loading = true;
        Ok(())
    }

    /// Clears the loading flag and stores either the generated text or the
    /// fixed fallback. Every request path ends here, success or not.
    pub fn finish_insight(&mut self, result: Result<String, AdviceError>) -> String {
        self.insight_loading = false;
        let text = match result {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "insight generation failed, using fallback");
                INSIGHT_FALLBACK.to_string()
            }
        };
        self.insight = Some(text.clone());
        text
    }

    pub fn fetch_insight(&mut self, client: &AdviceClient) -> Result<String, StateError> {
        self.begin_insight()?;
        let result = client.generate_insight(&self.transactions);
        Ok(self.finish_insight(result))
    }

    /// Applies a receipt-extraction outcome: a parsed receipt becomes a
    /// transaction via the normal creation path; any failure is logged and
    /// dropped without touching the ledger.
    pub fn ingest_receipt(
        &mut self,
        outcome: Result<ReceiptFields, AdviceError>,
    ) -> Result<Option<Uuid>, StateError> {
        match outcome {
            Ok(fields) => {
                let draft = NewTransaction {
                    date: Local::now().date_naive(),
                    category: fields.category,
                    description: Some(
                        fields
                            .description
                            .unwrap_or_else(|| "Scanned receipt".to_string()),
                    ),
                    amount: fields.amount,
                    r#type: TransactionType::Expense,
                    account_id: Account::DebitCard,
                    is_recurring: None,
                    frequency: None,
                };
                Ok(Some(self.add_transaction(draft)?))
            }
            Err(e) => {
                warn!(error = %e, "receipt extraction failed, no transaction created");
                Ok(None)
            }
        }
    }

    pub fn scan_receipt(
        &mut self,
        client: &AdviceClient,
        image_base64: &str,
    ) -> Result<Option<Uuid>, StateError> {
        self.begin_insight()?;
        let outcome = client.extract_receipt(image_base64);
        self.insight_loading = false;
        self.ingest_receipt(outcome)
    }
}
