// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinError {
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: &'static str, id: String },

    #[error("Invalid {field} '{value}' (expected one of: {expected})")]
    InvalidLabel {
        field: &'static str,
        value: String,
        expected: String,
    },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}
