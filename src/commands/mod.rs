// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod reports;
pub mod session;
pub mod transactions;

use anyhow::Result;

use crate::session::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn dispatch(state: &mut AppState, matches: &clap::ArgMatches) -> Result<Flow> {
    match matches.subcommand() {
        Some(("login", sub)) => session::login(state, sub)?,
        Some(("register", sub)) => session::register(state, sub)?,
        Some(("logout", _)) => session::logout(state),
        Some(("whoami", _)) => session::whoami(state)?,
        Some(("tab", sub)) => session::tab(state, sub)?,
        Some(("tx", sub)) => transactions::handle(state, sub)?,
        Some(("summary", sub)) => reports::summary(state, sub)?,
        Some(("weights", sub)) => reports::weights(state, sub)?,
        Some(("recent", sub)) => reports::recent(state, sub)?,
        Some(("quit", _)) => return Ok(Flow::Quit),
        _ => {}
    }
    Ok(Flow::Continue)
}
