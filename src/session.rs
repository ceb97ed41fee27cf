// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-session application state: who is logged in, which screen is active,
//! and the ledger they are working on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::Config;
use crate::draft::TransactionDraft;
use crate::error::{LedgerError, Result};
use crate::models::{Currency, Transaction, User};
use crate::store::{TransactionStore, demo_transactions};
use crate::valuation::Valuation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Add,
    Records,
    Charts,
    Settings,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tab::Home => "home",
            Tab::Add => "add",
            Tab::Records => "records",
            Tab::Charts => "charts",
            Tab::Settings => "settings",
        };
        f.write_str(s)
    }
}

impl FromStr for Tab {
    type Err = LedgerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Tab::Home),
            "add" => Ok(Tab::Add),
            "records" => Ok(Tab::Records),
            "charts" => Ok(Tab::Charts),
            "settings" => Ok(Tab::Settings),
            _ => Err(LedgerError::validation("tab", format!("unknown tab '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

pub trait Authenticator {
    fn login(&self, credentials: &Credentials) -> Result<User>;
    fn register(&self, registration: &Registration) -> Result<User>;
}

/// Accepts any credentials and hands back the same local user.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    pub default_currency: Currency,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self {
            default_currency: Currency::Twd,
        }
    }
}

impl MockAuthenticator {
    pub const USER_ID: &'static str = "u1";

    fn mock_user(&self, name: &str, email: &str) -> User {
        let created_at = "2024-01-01T00:00:00Z"
            .parse::<DateTime<Utc>>()
            .unwrap_or_else(|_| Utc::now());
        User {
            id: Self::USER_ID.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            default_currency: self.default_currency,
            third_party_id: None,
            created_at,
        }
    }
}

impl Authenticator for MockAuthenticator {
    fn login(&self, credentials: &Credentials) -> Result<User> {
        let email = credentials.email.as_deref().unwrap_or("user@example.com");
        Ok(self.mock_user("UserName", email))
    }

    fn register(&self, registration: &Registration) -> Result<User> {
        if registration.name.trim().is_empty() {
            return Err(LedgerError::validation("name", "must not be empty"));
        }
        if !registration.email.contains('@') {
            return Err(LedgerError::validation(
                "email",
                format!("'{}' is not an email address", registration.email),
            ));
        }
        Ok(self.mock_user(registration.name.trim(), registration.email.trim()))
    }
}

pub struct AppState {
    pub config: Config,
    user: Option<User>,
    tab: Tab,
    store: TransactionStore,
}

impl AppState {
    /// Logged out, on the home tab.
    pub fn new(config: Config) -> Self {
        let mut store =
            TransactionStore::new(config.default_currency, config.channel_placeholder.clone());
        if config.seed_demo_data {
            store = store.with_records(demo_transactions(MockAuthenticator::USER_ID));
        }
        Self {
            config,
            user: None,
            tab: Tab::Home,
            store,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(LedgerError::NotLoggedIn)
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn navigate(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut TransactionStore {
        &mut self.store
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.list()
    }

    pub fn login(&mut self, auth: &dyn Authenticator, credentials: &Credentials) -> Result<&User> {
        let user = auth.login(credentials)?;
        info!(user = %user.id, "logged in");
        self.tab = Tab::Home;
        Ok(&*self.user.insert(user))
    }

    pub fn register(
        &mut self,
        auth: &dyn Authenticator,
        registration: &Registration,
    ) -> Result<&User> {
        let user = auth.register(registration)?;
        info!(user = %user.id, "registered");
        self.tab = Tab::Home;
        Ok(&*self.user.insert(user))
    }

    /// Clears the user and resets navigation; the ledger is kept.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "logged out");
        }
        self.tab = Tab::Home;
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<&Transaction> {
        let user_id = self.require_user()?.id.clone();
        let tx = self.store.add(&user_id, draft)?;
        self.tab = Tab::Records;
        Ok(tx)
    }

    pub fn valuation(&self) -> Valuation<'static> {
        Valuation::Multiplier(self.config.return_multiplier)
    }
}
