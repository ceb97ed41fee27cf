// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use goldbook::commands::{self, Flow};
use goldbook::session::{AppState, Credentials, MockAuthenticator};
use goldbook::{cli, config, logger, utils};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();

    logger::init(matches.get_flag("verbose"));

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut cfg = config::load(config_path.as_deref())?;
    if matches.get_flag("no-demo") {
        cfg.seed_demo_data = false;
    }
    let mut state = AppState::new(cfg);

    if matches.subcommand().is_some() {
        // one-shot: act as the local user
        let auth = MockAuthenticator {
            default_currency: state.config.default_currency,
        };
        state.login(&auth, &Credentials::default())?;
        commands::dispatch(&mut state, &matches)?;
        return Ok(());
    }

    run_session(&mut state)
}

fn run_session(state: &mut AppState) -> Result<()> {
    println!("goldbook {} (type 'help', 'quit' to leave)", env!("CARGO_PKG_VERSION"));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", state.tab());
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let words = match utils::split_line(&line) {
            Ok(w) if w.is_empty() => continue,
            Ok(w) => w,
            Err(e) => {
                eprintln!("error: {e:#}");
                continue;
            }
        };
        let matches = match cli::build_cli()
            .no_binary_name(true)
            .try_get_matches_from(words)
        {
            Ok(m) => m,
            Err(e) => {
                e.print()?;
                continue;
            }
        };
        match commands::dispatch(state, &matches) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("error: {e:#}"),
        }
    }
    Ok(())
}
