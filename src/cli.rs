// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

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

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

/// Asset form fields. `required` is set for `add`, optional for `edit`.
fn asset_fields(cmd: Command, required: bool) -> Command {
    let must = |a: Arg| a.required(required);
    cmd.arg(must(opt("name", "Asset name")))
        .arg(opt("type", "Dinheiro|Imóvel|Veículo|Investimento|Criptomoeda|Outros (or cash|real-estate|vehicle|investment|crypto|other)"))
        .arg(must(opt("current-value", "Current market value")))
        .arg(must(opt("acquisition-value", "Value paid at acquisition")))
        .arg(opt("acquisition-date", "YYYY-MM-DD (default today)"))
        .arg(opt("liquidity", "Alta|Média|Baixa (or high|medium|low)"))
        .arg(opt("yield", "Estimated monthly yield in percent"))
}

fn liability_fields(cmd: Command, required: bool) -> Command {
    let must = |a: Arg| a.required(required);
    cmd.arg(must(opt("name", "Debt name")))
        .arg(opt("type", "Cartão de Crédito|Empréstimo|Financiamento|Parcelamento|Outros (or credit-card|loan|financing|installment|other)"))
        .arg(must(opt("total-value", "Remaining balance owed")))
        .arg(must(opt("installment-value", "Installment amount")))
        .arg(opt("interest-rate", "Interest in percent per month"))
        .arg(opt("installments", "Remaining number of installments"))
        .arg(opt("start-date", "YYYY-MM-DD (default today)"))
        .arg(opt("status", "Ativa|Quitada|Atrasada (or active|paid|late)"))
}

pub fn build_cli() -> Command {
    Command::new("finhealth")
        .version(crate_version!())
        .about("FinHealth: net worth, debts and monthly cash flow, with an AI advisor")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Storage file (default: platform data dir or FINHEALTH_DB)"),
        )
        .subcommand(Command::new("init").about("Create storage and print its location"))
        .subcommand(json_flags(
            Command::new("overview").about("Net worth, monthly balance and allocation"),
        ))
        .subcommand(
            Command::new("asset")
                .about("Assets & holdings")
                .subcommand(asset_fields(Command::new("add").about("Add an asset"), true))
                .subcommand(asset_fields(
                    Command::new("edit").about("Edit an asset").arg(id_arg()),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an asset")
                        .arg(id_arg())
                        .arg(yes_flag()),
                )
                .subcommand(json_flags(Command::new("list").about("List assets"))),
        )
        .subcommand(
            Command::new("liability")
                .about("Debts & liabilities")
                .subcommand(liability_fields(
                    Command::new("add").about("Add a liability"),
                    true,
                ))
                .subcommand(liability_fields(
                    Command::new("edit").about("Edit a liability").arg(id_arg()),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a liability")
                        .arg(id_arg())
                        .arg(yes_flag()),
                )
                .subcommand(json_flags(Command::new("list").about("List liabilities"))),
        )
        .subcommand(
            Command::new("tx")
                .about("Income & expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense")
                        .arg(req("description", "What it was"))
                        .arg(opt("type", "Receita|Despesa (or income|expense)"))
                        .arg(req("amount", "Amount (positive)"))
                        .arg(req("category", "Free-text category"))
                        .arg(opt("recurrence", "Fixa|Variável|Eventual (or fixed|variable|eventual)"))
                        .arg(opt("date", "YYYY-MM-DD (default today)")),
                )
                .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
                .subcommand(json_flags(
                    Command::new("list").about("List transactions with monthly totals"),
                )),
        )
        .subcommand(
            Command::new("advisor")
                .about("Ask the AI advisor")
                .arg(opt("question", "Specific question; omit for a general analysis")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("state")
                        .about("Write the full stored document as JSON")
                        .arg(req("out", "Output path")),
                )
                .subcommand(
                    Command::new("transactions")
                        .about("Write transactions as csv or json")
                        .arg(req("format", "csv|json"))
                        .arg(req("out", "Output path")),
                ),
        )
        .subcommand(Command::new("doctor").about("Report suspicious records"))
}
