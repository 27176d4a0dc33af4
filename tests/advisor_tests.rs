// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use finhealth::advisor::{
    self, AdvisorSession, CONNECTION_ERROR_MESSAGE, EMPTY_RESPONSE_MESSAGE, MISSING_KEY_MESSAGE,
    TextGenerator,
};
use finhealth::models::FinancialState;
use finhealth::storage::default_state;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Default)]
struct Recorder {
    prompts: Mutex<Vec<String>>,
}

impl TextGenerator for Recorder {
    fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("- **Reserva** em dia".into())
    }
}

struct Fixed(&'static str);

impl TextGenerator for Fixed {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

struct Failing;

impl TextGenerator for Failing {
    fn generate(&self, _prompt: &str) -> Result<String> {
        Err(anyhow!("429 quota exceeded"))
    }
}

/// Answers the first question slowly so a later request overtakes it.
struct SlowFirst;

impl TextGenerator for SlowFirst {
    fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.contains("primeira") {
            thread::sleep(Duration::from_millis(150));
            Ok("antiga".into())
        } else {
            Ok("nova".into())
        }
    }
}

#[test]
fn missing_credential_returns_fixed_message() {
    let empty = FinancialState::default();
    assert_eq!(advisor::analyze(&empty, None, None), MISSING_KEY_MESSAGE);
    assert_eq!(
        advisor::analyze(&default_state(), Some("Posso comprar um carro?"), None),
        MISSING_KEY_MESSAGE
    );
}

#[test]
fn response_is_returned_verbatim() {
    let rec = Recorder::default();
    let out = advisor::analyze(&default_state(), None, Some(&rec as &dyn TextGenerator));
    assert_eq!(out, "- **Reserva** em dia");
    assert_eq!(rec.prompts.lock().unwrap().len(), 1);
}

#[test]
fn prompt_embeds_metrics_and_records() {
    let p = advisor::build_prompt(&default_state(), None);
    assert!(p.contains("Patrimônio Líquido: 72014.00"));
    assert!(p.contains("Total Ativos: 248000.00"));
    assert!(p.contains("Total Passivos (Dívidas): 175986.00"));
    assert!(p.contains("Receita Mensal Estimada: 4000.00"));
    assert!(p.contains("Despesa Mensal Estimada: 0.00"));
    assert!(p.contains("Reserva de Emergência"));
    assert!(p.contains("Financiamento apto"));
    assert!(p.contains("sugira 3 ações práticas"));
}

#[test]
fn question_replaces_generic_instruction() {
    let rec = Recorder::default();
    advisor::analyze(
        &default_state(),
        Some("Se eu quitar o financiamento, como fica meu fluxo?"),
        Some(&rec as &dyn TextGenerator),
    );
    let prompts = rec.prompts.lock().unwrap();
    assert!(prompts[0].contains("\"Se eu quitar o financiamento, como fica meu fluxo?\""));
    assert!(!prompts[0].contains("sugira 3 ações práticas"));
}

#[test]
fn empty_answer_and_failures_become_fixed_text() {
    let s = default_state();
    let blank: &dyn TextGenerator = &Fixed("  ");
    let failing: &dyn TextGenerator = &Failing;
    assert_eq!(advisor::analyze(&s, None, Some(blank)), EMPTY_RESPONSE_MESSAGE);
    assert_eq!(advisor::analyze(&s, None, Some(failing)), CONNECTION_ERROR_MESSAGE);
}

#[test]
fn session_without_credential_resolves_immediately() {
    let mut session = AdvisorSession::new(None);
    session.request(&default_state(), None);
    assert_eq!(session.wait(), Some(MISSING_KEY_MESSAGE));
    assert!(!session.is_loading());
}

#[test]
fn session_discards_superseded_answers() {
    let generator: Arc<dyn TextGenerator> = Arc::new(SlowFirst);
    let mut session = AdvisorSession::new(Some(generator));
    let s = default_state();
    let first = session.request(&s, Some("primeira"));
    let second = session.request(&s, Some("segunda"));
    assert!(second > first);
    assert!(session.is_loading());

    assert_eq!(session.wait(), Some("nova"));
    thread::sleep(Duration::from_millis(300));
    assert_eq!(session.poll(), Some("nova"));
}
