// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::{AppState, Credentials, MockAuthenticator, Registration, Tab};
use crate::utils::pretty_table;
use anyhow::Result;

fn auth(state: &AppState) -> MockAuthenticator {
    MockAuthenticator {
        default_currency: state.config.default_currency,
    }
}

pub fn login(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let credentials = Credentials {
        email: sub.get_one::<String>("email").map(|s| s.trim().to_string()),
        password: sub.get_one::<String>("password").cloned(),
    };
    let auth = auth(state);
    let user = state.login(&auth, &credentials)?;
    println!("Welcome, {}", user.name);
    Ok(())
}

pub fn register(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let registration = Registration {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        email: sub.get_one::<String>("email").cloned().unwrap_or_default(),
        password: sub.get_one::<String>("password").cloned(),
    };
    let auth = auth(state);
    let user = state.register(&auth, &registration)?;
    println!("Registered {} <{}>", user.name, user.email);
    Ok(())
}

pub fn logout(state: &mut AppState) {
    state.logout();
    println!("Logged out");
}

pub fn whoami(state: &AppState) -> Result<()> {
    let user = state.require_user()?;
    println!(
        "{}",
        pretty_table(
            &["Id", "Name", "Email", "CCY", "Tab"],
            vec![vec![
                user.id.clone(),
                user.name.clone(),
                user.email.clone(),
                user.default_currency.to_string(),
                state.tab().to_string(),
            ]],
        )
    );
    Ok(())
}

pub fn tab(state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    state.require_user()?;
    if let Some(name) = sub.get_one::<String>("name") {
        let tab: Tab = name.parse()?;
        state.navigate(tab);
    }
    println!("{}", state.tab());
    Ok(())
}
