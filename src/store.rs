// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{Budget, Goal, Transaction, default_budgets, default_goals};

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "FinDash", "findash"));

const KEY_TRANSACTIONS: &str = "findash_transactions";
const KEY_BUDGETS: &str = "findash_budgets";
const KEY_GOALS: &str = "findash_goals";
const KEY_SETTINGS: &str = "findash_settings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not determine platform-specific data dir")]
    NoDataDir,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown currency label '{0}', expected USD or BRL")]
    NoSuchCurrency(String),
}

/// Display-only preferences. The currency label relabels amounts without
/// converting them; secure mode masks monetary output with a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: CurrencyLabel,
    pub secure_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: CurrencyLabel::Usd,
            secure_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyLabel {
    Usd,
    Brl,
}

impl CurrencyLabel {
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyLabel::Usd => "$",
            CurrencyLabel::Brl => "R$",
        }
    }
}

impl fmt::Display for CurrencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyLabel::Usd => write!(f, "USD"),
            CurrencyLabel::Brl => write!(f, "BRL"),
        }
    }
}

impl FromStr for CurrencyLabel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(CurrencyLabel::Usd),
            "BRL" => Ok(CurrencyLabel::Brl),
            _ => Err(StoreError::NoSuchCurrency(s.to_string())),
        }
    }
}

pub fn store_path() -> Result<PathBuf, StoreError> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2).ok_or(StoreError::NoDataDir)?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir)?;
    Ok(data_dir.join("findash.sqlite"))
}

/// Key-value medium backing the three stores. Each key holds one JSON
/// document: an array of records for the ledger/budget/goal keys, an object
/// for the settings key. Absent keys fall back to seeds on first load.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_or_init() -> Result<Store, StoreError> {
        Self::open_at(&store_path()?)
    }

    pub fn open_at(path: &std::path::Path) -> Result<Store, StoreError> {
        let conn = Connection::open(path)?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Backing store with no file behind it, for tests.
    pub fn open_in_memory() -> Result<Store, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Store { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "persisted");
        Ok(())
    }

    pub fn load_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        match self.get(KEY_TRANSACTIONS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn save_transactions(&self, txs: &[Transaction]) -> Result<(), StoreError> {
        self.set(KEY_TRANSACTIONS, &serde_json::to_string(txs)?)
    }

    /// Loads budgets, writing the seed list on first run.
    pub fn load_budgets(&self) -> Result<Vec<Budget>, StoreError> {
        match self.get(KEY_BUDGETS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let seed = default_budgets();
                self.save_budgets(&seed)?;
                Ok(seed)
            }
        }
    }

    pub fn save_budgets(&self, budgets: &[Budget]) -> Result<(), StoreError> {
        self.set(KEY_BUDGETS, &serde_json::to_string(budgets)?)
    }

    /// Loads goals, writing the seed list on first run.
    pub fn load_goals(&self) -> Result<Vec<Goal>, StoreError> {
        match self.get(KEY_GOALS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let seed = default_goals();
                self.save_goals(&seed)?;
                Ok(seed)
            }
        }
    }

    pub fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        self.set(KEY_GOALS, &serde_json::to_string(goals)?)
    }

    pub fn load_settings(&self) -> Result<Settings, StoreError> {
        match self.get(KEY_SETTINGS)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Settings::default()),
        }
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.set(KEY_SETTINGS, &serde_json::to_string(settings)?)
    }
}
