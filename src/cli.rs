// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn opt(name: &'static str, value: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name(value).help(help)
}

fn num_opt(name: &'static str, value: &'static str, help: &'static str) -> Arg {
    opt(name, value, help).allow_negative_numbers(true)
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn transaction_fields(cmd: Command) -> Command {
    cmd.arg(opt("type", "TYPE", "buy | sell"))
        .arg(opt("metal", "METAL", "gold | k-gold | platinum"))
        .arg(opt("date", "DATE", "Transaction date, YYYY-MM-DD"))
        .arg(num_opt("weight", "WEIGHT", "Weight in --unit"))
        .arg(opt("unit", "UNIT", "qian | g | oz"))
        .arg(num_opt("price", "PRICE", "Price per unit"))
        .arg(num_opt("labor", "AMOUNT", "Labor cost or handling fee"))
        .arg(opt("currency", "CCY", "TWD | RMB | USD"))
        .arg(num_opt("rate", "RATE", "Exchange rate"))
        .arg(opt("channel", "CHANNEL", "Where it was bought or sold"))
        .arg(opt("note", "NOTE", "Free-text note"))
        .arg(opt("image", "URL", "Receipt photo reference"))
}

pub fn build_cli() -> Command {
    Command::new("goldbook")
        .version(crate_version!())
        .about("Precious-metal purchase and sale ledger")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Debug logging"),
        )
        .arg(
            Arg::new("no-demo")
                .long("no-demo")
                .action(ArgAction::SetTrue)
                .help("Start with an empty ledger"),
        )
        .subcommand(
            Command::new("login")
                .about("Log in")
                .arg(opt("email", "EMAIL", "Account email"))
                .arg(opt("password", "PASSWORD", "Password")),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and log in")
                .arg(opt("name", "NAME", "Full name").required(true))
                .arg(opt("email", "EMAIL", "Email").required(true))
                .arg(opt("password", "PASSWORD", "Password")),
        )
        .subcommand(Command::new("logout").about("Log out"))
        .subcommand(Command::new("whoami").about("Show the current user"))
        .subcommand(
            Command::new("tab")
                .about("Show or switch the active screen")
                .arg(Arg::new("name").value_name("TAB").help(
                    "home | add | records | charts | settings",
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand_required(true)
                .subcommand(transaction_fields(
                    Command::new("add").about("Record a purchase or sale"),
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(opt("metal", "METAL", "all | gold | k-gold | platinum"))
                        .arg(
                            opt("limit", "N", "Show at most N rows")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show one transaction")
                        .arg(Arg::new("id").value_name("ID").required(true)),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").value_name("ID").required(true)),
                )
                .subcommand(transaction_fields(
                    Command::new("edit")
                        .about("Change fields of a transaction")
                        .arg(Arg::new("id").value_name("ID").required(true)),
                )),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Total cost, estimated return and profit"),
        ))
        .subcommand(json_flags(
            Command::new("weights")
                .about("Bought weight per metal")
                .arg(opt("unit", "UNIT", "Convert into this unit before summing")),
        ))
        .subcommand(
            Command::new("recent").about("Latest records").arg(
                opt("limit", "N", "Number of records").value_parser(value_parser!(usize)),
            ),
        )
        .subcommand(Command::new("quit").alias("exit").about("End the session"))
}
