// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use goldbook::config::Config;
use goldbook::draft::TransactionDraft;
use goldbook::error::LedgerError;
use goldbook::session::{AppState, Credentials, MockAuthenticator, Registration, Tab};
use rust_decimal::Decimal;

fn logged_in() -> AppState {
    let mut state = AppState::new(Config::default());
    state
        .login(&MockAuthenticator::default(), &Credentials::default())
        .unwrap();
    state
}

#[test]
fn new_session_starts_logged_out_on_home() {
    let state = AppState::new(Config::default());
    assert!(state.user().is_none());
    assert_eq!(state.tab(), Tab::Home);
    assert_eq!(state.transactions().len(), 3);
    assert_eq!(state.require_user().unwrap_err(), LedgerError::NotLoggedIn);
}

#[test]
fn demo_data_can_be_disabled() {
    let cfg = Config {
        seed_demo_data: false,
        ..Config::default()
    };
    assert!(AppState::new(cfg).store().is_empty());
}

#[test]
fn add_requires_login() {
    let mut state = AppState::new(Config::default());
    let err = state
        .add_transaction(TransactionDraft::new().weight(Decimal::ONE))
        .unwrap_err();
    assert_eq!(err, LedgerError::NotLoggedIn);
    assert_eq!(state.transactions().len(), 3);
}

#[test]
fn add_stamps_user_and_switches_to_records() {
    let mut state = logged_in();
    let tx = state
        .add_transaction(TransactionDraft::new().weight(Decimal::ONE))
        .unwrap();
    assert_eq!(tx.user_id, MockAuthenticator::USER_ID);
    assert_eq!(state.tab(), Tab::Records);
}

#[test]
fn rejected_add_stays_on_current_tab() {
    let mut state = logged_in();
    state.navigate(Tab::Add);
    assert!(
        state
            .add_transaction(TransactionDraft::new().weight(Decimal::NEGATIVE_ONE))
            .is_err()
    );
    assert_eq!(state.tab(), Tab::Add);
}

#[test]
fn logout_clears_user_and_resets_navigation() {
    let mut state = logged_in();
    state.navigate(Tab::Charts);
    state.logout();
    assert!(state.user().is_none());
    assert_eq!(state.tab(), Tab::Home);
    assert_eq!(state.transactions().len(), 3);
}

#[test]
fn register_uses_given_identity() {
    let mut state = AppState::new(Config::default());
    let user = state
        .register(
            &MockAuthenticator::default(),
            &Registration {
                name: " Mei ".into(),
                email: "mei@example.com".into(),
                password: None,
            },
        )
        .unwrap();
    assert_eq!(user.name, "Mei");
    assert_eq!(user.email, "mei@example.com");
}

#[test]
fn register_rejects_bad_email() {
    let mut state = AppState::new(Config::default());
    let err = state
        .register(
            &MockAuthenticator::default(),
            &Registration {
                name: "Mei".into(),
                email: "not-an-email".into(),
                password: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation { field: "email", .. }));
    assert!(state.user().is_none());
}

#[test]
fn tab_names_round_trip() {
    for tab in [Tab::Home, Tab::Add, Tab::Records, Tab::Charts, Tab::Settings] {
        assert_eq!(tab.to_string().parse::<Tab>().unwrap(), tab);
    }
    assert!("profile".parse::<Tab>().is_err());
}
