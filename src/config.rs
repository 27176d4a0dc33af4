// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent credentials are not an error; the advisor reports them.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub db_path: Option<PathBuf>,
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();

        Config {
            api_key: non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
            model: non_empty("FINHEALTH_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty("FINHEALTH_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            db_path: non_empty("FINHEALTH_DB").map(PathBuf::from),
        }
    }

    /// `--db` beats `FINHEALTH_DB`, which beats the platform data dir.
    pub fn resolve_db_path(&self, cli_override: Option<&String>) -> Result<PathBuf> {
        if let Some(p) = cli_override {
            return Ok(PathBuf::from(p));
        }
        match &self.db_path {
            Some(p) => Ok(p.clone()),
            None => crate::storage::db_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(db_path: Option<&str>) -> Config {
        Config {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            db_path: db_path.map(PathBuf::from),
        }
    }

    #[test]
    fn cli_flag_beats_environment() {
        let flag = "/tmp/flag.sqlite".to_string();
        let c = cfg(Some("/tmp/env.sqlite"));
        assert_eq!(
            c.resolve_db_path(Some(&flag)).unwrap(),
            PathBuf::from("/tmp/flag.sqlite")
        );
        assert_eq!(
            c.resolve_db_path(None).unwrap(),
            PathBuf::from("/tmp/env.sqlite")
        );
    }
}
