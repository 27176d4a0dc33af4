// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Asset, FinancialState, Liability, Transaction};
use crate::storage::{self, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Overview,
    Assets,
    Liabilities,
    CashFlow,
    Advisor,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Overview => "Visão Geral",
            View::Assets => "Ativos & Bens",
            View::Liabilities => "Dívidas & Passivos",
            View::CashFlow => "Receitas & Despesas",
            View::Advisor => "Consultor IA",
        }
    }
}

/// Replacement for some top-level collections; `None` keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub assets: Option<Vec<Asset>>,
    pub liabilities: Option<Vec<Liability>>,
    pub transactions: Option<Vec<Transaction>>,
}

impl StatePatch {
    pub fn assets(assets: Vec<Asset>) -> Self {
        Self {
            assets: Some(assets),
            ..Default::default()
        }
    }

    pub fn liabilities(liabilities: Vec<Liability>) -> Self {
        Self {
            liabilities: Some(liabilities),
            ..Default::default()
        }
    }

    pub fn transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Some(transactions),
            ..Default::default()
        }
    }
}

/// Owns the single state instance and the selected view. Views read slices
/// of the state and hand back patches; every patch is persisted.
pub struct App<S: KeyValueStore> {
    state: FinancialState,
    view: View,
    store: S,
}

impl<S: KeyValueStore> App<S> {
    pub fn open(store: S) -> Self {
        let state = storage::load(&store);
        Self {
            state,
            view: View::default(),
            store,
        }
    }

    pub fn state(&self) -> &FinancialState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn update_state(&mut self, patch: StatePatch) {
        if let Some(assets) = patch.assets {
            self.state.assets = assets;
        }
        if let Some(liabilities) = patch.liabilities {
            self.state.liabilities = liabilities;
        }
        if let Some(transactions) = patch.transactions {
            self.state.transactions = transactions;
        }
        tracing::debug!(
            assets = self.state.assets.len(),
            liabilities = self.state.liabilities.len(),
            transactions = self.state.transactions.len(),
            "State updated"
        );
        storage::save(&self.store, &self.state);
    }
}
