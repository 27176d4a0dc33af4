// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::{Summary, share_pct};
use crate::models::FinancialState;
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(state: &FinancialState, sub: &clap::ArgMatches) -> Result<()> {
    let summary = Summary::from_state(state);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary)? {
        return Ok(());
    }

    let cards = vec![
        vec!["Patrimônio Bruto".into(), fmt_money(&summary.total_assets)],
        vec!["Dívida Total".into(), fmt_money(&summary.total_liabilities)],
        vec!["Patrimônio Líquido".into(), fmt_money(&summary.net_worth)],
        vec![
            "Renda Mensal Total".into(),
            format!(
                "{} (Ativa: {:.0}% | Passiva: {:.0}%)",
                fmt_money(&summary.monthly_income),
                summary.active_income_pct,
                summary.passive_income_pct
            ),
        ],
        vec!["Parcelas Mensais".into(), fmt_money(&summary.monthly_installments)],
        vec!["Saldo Mensal (Previsto)".into(), fmt_money(&summary.monthly_balance)],
    ];
    println!("{}", pretty_table(&["Indicador", "Valor"], cards));

    if summary.allocation.is_empty() {
        println!("Nenhum ativo cadastrado.");
    } else {
        let rows = allocation_rows(&summary);
        println!("{}", pretty_table(&["Tipo", "Valor", "Participação"], rows));
    }

    let flow = vec![
        vec![
            "Renda Total".into(),
            fmt_money(&summary.monthly_income),
            format!(
                "Entrada Ativa: {} | Entrada Passiva: {}",
                fmt_money(&summary.monthly_active_income),
                fmt_money(&summary.monthly_passive_income)
            ),
        ],
        vec![
            "Saídas Totais".into(),
            fmt_money(&summary.monthly_outflow),
            format!(
                "Despesas: {} | Parcelas: {}",
                fmt_money(&summary.monthly_expenses),
                fmt_money(&summary.monthly_installments)
            ),
        ],
    ];
    println!("{}", pretty_table(&["Fluxo", "Total", "Detalhe"], flow));
    Ok(())
}

fn allocation_rows(summary: &Summary) -> Vec<Vec<String>> {
    summary
        .allocation
        .iter()
        .map(|slice| {
            let share = share_pct(slice.value, summary.total_assets);
            vec![
                slice.asset_type.label().to_string(),
                fmt_money(&slice.value),
                fmt_pct(&share),
            ]
        })
        .collect()
}
