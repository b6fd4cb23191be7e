// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("budget limit must be greater than zero")]
    NonPositiveLimit,
    #[error("goal target must be greater than zero")]
    NonPositiveTarget,
    #[error(
        "unknown category '{0}', expected one of Food, Transport, Utilities, Shopping, Income, Entertainment, Housing, Investment, Other"
    )]
    UnknownCategory(String),
    #[error("unknown account '{0}', expected one of Cash, Debit Card, Credit Card, Savings")]
    UnknownAccount(String),
    #[error("unknown transaction type '{0}', expected income or expense")]
    UnknownType(String),
    #[error("unknown frequency '{0}', expected one of once, weekly, monthly, yearly")]
    UnknownFrequency(String),
    #[error("goal progress cannot be negative")]
    NegativeGoalAmount,
    #[error("no transaction with id {0}")]
    UnknownTransaction(Uuid),
    #[error("no goal with id {0}")]
    UnknownGoal(Uuid),
    #[error("an insight request is already in flight")]
    InsightInFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(ValidationError::UnknownType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Shopping,
    Income,
    Entertainment,
    Housing,
    Investment,
    Other,
}

pub const ALL_CATEGORIES: [Category; 9] = [
    Category::Food,
    Category::Transport,
    Category::Utilities,
    Category::Shopping,
    Category::Income,
    Category::Entertainment,
    Category::Housing,
    Category::Investment,
    Category::Other,
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Income => "Income",
            Category::Entertainment => "Entertainment",
            Category::Housing => "Housing",
            Category::Investment => "Investment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Payment-method labels carried on every transaction. Display-only grouping;
/// there is no account balance ledger behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Account {
    Cash,
    #[serde(rename = "Debit Card")]
    DebitCard,
    #[serde(rename = "Credit Card")]
    CreditCard,
    Savings,
}

pub const ALL_ACCOUNTS: [Account; 4] = [
    Account::Cash,
    Account::DebitCard,
    Account::CreditCard,
    Account::Savings,
];

impl Account {
    pub fn label(&self) -> &'static str {
        match self {
            Account::Cash => "Cash",
            Account::DebitCard => "Debit Card",
            Account::CreditCard => "Credit Card",
            Account::Savings => "Savings",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Account {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ACCOUNTS
            .iter()
            .find(|a| a.label().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| ValidationError::UnknownAccount(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Once => write!(f, "once"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "once" => Ok(Frequency::Once),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(ValidationError::UnknownFrequency(other.to_string())),
        }
    }
}

/// One ledger entry. `amount` is a non-negative magnitude; the sign in every
/// aggregate comes from `type`. Recurrence fields are descriptive metadata
/// only and are never expanded into future entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub account_id: Account,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
}

/// Creation-time input for a transaction, before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub category: Category,
    pub description: Option<String>,
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub account_id: Account,
    pub is_recurring: Option<bool>,
    pub frequency: Option<Frequency>,
}

impl NewTransaction {
    /// Validates the draft and mints a record with a fresh id. Zero or
    /// negative amounts refuse submission; a missing description falls back
    /// to the category name.
    pub fn into_transaction(self) -> Result<Transaction, ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        let description = match self.description {
            Some(d) if !d.trim().is_empty() => d,
            _ => self.category.label().to_string(),
        };
        Ok(Transaction {
            id: Uuid::new_v4(),
            date: self.date,
            category: self.category,
            description,
            amount: self.amount,
            r#type: self.r#type,
            account_id: self.account_id,
            is_recurring: self.is_recurring,
            frequency: self.frequency,
        })
    }
}

/// Per-category spending cap. Category acts as the key; at most one budget
/// per category. A budget for a category with no transactions is valid and
/// reports 0% utilization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub limit: Decimal,
}

/// Savings target. `current_amount` is user-set, not derived from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

pub fn default_budgets() -> Vec<Budget> {
    vec![
        Budget {
            category: Category::Food,
            limit: Decimal::new(500, 0),
        },
        Budget {
            category: Category::Transport,
            limit: Decimal::new(300, 0),
        },
        Budget {
            category: Category::Shopping,
            limit: Decimal::new(400, 0),
        },
    ]
}

pub fn default_goals() -> Vec<Goal> {
    vec![Goal {
        id: Uuid::new_v4(),
        name: "New Car".to_string(),
        target_amount: Decimal::new(20000, 0),
        current_amount: Decimal::new(5000, 0),
        deadline: None,
    }]
}
