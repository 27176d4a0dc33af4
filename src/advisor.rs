// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Natural-language advice from an external text-generation endpoint.
//! [`analyze`] never fails: every outcome is text the caller can display.

use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::config::Config;
use crate::metrics::Summary;
use crate::models::FinancialState;
use crate::utils::http_client;

pub const MISSING_KEY_MESSAGE: &str =
    "Erro: Chave API não configurada. Por favor, verifique suas configurações.";
pub const EMPTY_RESPONSE_MESSAGE: &str = "Não foi possível gerar uma análise no momento.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Desculpe, ocorreu um erro ao conectar com o assistente inteligente.";

const DEFAULT_INSTRUCTION: &str = "Forneça uma análise resumida da saúde financeira, identifique riscos (como alta dívida ou baixa liquidez) e sugira 3 ações práticas para melhorar o patrimônio.";

pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

fn num(d: Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

pub fn build_prompt(state: &FinancialState, question: Option<&str>) -> String {
    let s = Summary::from_state(state);
    let assets: Vec<_> = state
        .assets
        .iter()
        .map(|a| {
            json!({
                "nome": a.name,
                "tipo": a.r#type.label(),
                "valor": num(a.current_value),
                "liquidez": a.liquidity.label(),
            })
        })
        .collect();
    let liabilities: Vec<_> = state
        .liabilities
        .iter()
        .map(|l| {
            json!({
                "nome": l.name,
                "tipo": l.r#type.label(),
                "valorTotal": num(l.total_value),
                "parcela": num(l.installment_value),
                "juros": num(l.interest_rate),
            })
        })
        .collect();
    let instruction = match question {
        Some(q) => format!(
            "O usuário perguntou: \"{}\". Responda especificamente a isso com base nos dados.",
            q
        ),
        None => DEFAULT_INSTRUCTION.to_string(),
    };

    format!(
        "Você é um consultor financeiro especialista. Analise os seguintes dados do usuário (valores em BRL):\n\n\
         Patrimônio Líquido: {:.2}\n\
         Total Ativos: {:.2}\n\
         Total Passivos (Dívidas): {:.2}\n\
         Receita Mensal Estimada: {:.2}\n\
         Despesa Mensal Estimada: {:.2}\n\n\
         Detalhes dos Ativos: {}\n\
         Detalhes dos Passivos: {}\n\n\
         Instrução: {}\n\n\
         Formate a resposta em Markdown, use listas com bolinhas para facilitar a leitura. Seja direto e encorajador.\n",
        s.net_worth,
        s.total_assets,
        s.total_liabilities,
        s.monthly_active_income,
        s.monthly_expenses,
        serde_json::Value::Array(assets),
        serde_json::Value::Array(liabilities),
        instruction,
    )
}

/// A blank question means "general analysis".
fn normalize_question(question: Option<&str>) -> Option<&str> {
    question.map(str::trim).filter(|q| !q.is_empty())
}

pub fn analyze(
    state: &FinancialState,
    question: Option<&str>,
    generator: Option<&dyn TextGenerator>,
) -> String {
    let Some(generator) = generator else {
        return MISSING_KEY_MESSAGE.to_string();
    };
    let prompt = build_prompt(state, normalize_question(question));
    match generator.generate(&prompt) {
        Ok(text) if text.trim().is_empty() => EMPTY_RESPONSE_MESSAGE.to_string(),
        Ok(text) => text,
        Err(err) => {
            tracing::error!(error = ?err, "Advisor request failed");
            CONNECTION_ERROR_MESSAGE.to_string()
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini `generateContent` over blocking HTTP. One request per call, no
/// retry, no timeout.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, api_base: String) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            api_key,
            model,
            api_base,
        })
    }

    /// `None` when no credential is configured.
    pub fn from_config(cfg: &Config) -> Result<Option<Self>> {
        match &cfg.api_key {
            Some(key) => Ok(Some(Self::new(
                key.clone(),
                cfg.model.clone(),
                cfg.api_base.clone(),
            )?)),
            None => Ok(None),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .with_context(|| format!("POST {}", self.endpoint()))?
            .error_for_status()?;
        let parsed: GenerateResponse = resp.json().context("Malformed generateContent response")?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Response carried no candidates"))?;
        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        Ok(text)
    }
}

/// Tracks advisor requests for one view. Each request runs on its own
/// thread; only the newest request's answer is kept, older answers are
/// dropped when they arrive.
pub struct AdvisorSession {
    generator: Option<Arc<dyn TextGenerator>>,
    tx: Sender<(u64, String)>,
    rx: Receiver<(u64, String)>,
    latest: u64,
    loading: bool,
    response: Option<String>,
}

impl AdvisorSession {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generator,
            tx,
            rx,
            latest: 0,
            loading: false,
            response: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    /// Starts a request against a snapshot of `state` and returns its ticket.
    pub fn request(&mut self, state: &FinancialState, question: Option<&str>) -> u64 {
        self.latest += 1;
        self.loading = true;
        let ticket = self.latest;
        let snapshot = state.clone();
        let question = question.map(str::to_string);
        let generator = self.generator.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let text = analyze(&snapshot, question.as_deref(), generator.as_deref());
            // The session may be gone by now.
            let _ = tx.send((ticket, text));
        });
        ticket
    }

    fn accept(&mut self, ticket: u64, text: String) -> bool {
        if ticket != self.latest {
            tracing::debug!(ticket, latest = self.latest, "Discarding stale advisor answer");
            return false;
        }
        self.response = Some(text);
        self.loading = false;
        true
    }

    /// Applies any answers that have already arrived.
    pub fn poll(&mut self) -> Option<&str> {
        while let Ok((ticket, text)) = self.rx.try_recv() {
            self.accept(ticket, text);
        }
        self.response()
    }

    /// Blocks until the newest request resolves.
    pub fn wait(&mut self) -> Option<&str> {
        while self.loading {
            match self.rx.recv() {
                Ok((ticket, text)) => {
                    self.accept(ticket, text);
                }
                Err(_) => break,
            }
        }
        self.response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_question_falls_back_to_general_analysis() {
        assert_eq!(normalize_question(Some("   ")), None);
        assert_eq!(normalize_question(Some(" e agora? ")), Some("e agora?"));
        assert_eq!(normalize_question(None), None);
    }

    #[test]
    fn response_text_is_joined_across_parts() {
        let raw = r##"{"candidates":[{"content":{"parts":[{"text":"# Oi"},{"text":"\n- a"}]}}]}"##;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let parts = &parsed.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text.as_deref(), Some("# Oi"));
    }
}
