// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use thiserror::Error;

/// Failures at the edges of the core: design edits and JSON/IO marshalling.
/// The calculation engines themselves never fail.
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Unknown aggregate: {0}")]
    UnknownAggregate(String),

    #[error("Aggregate limit reached: a design holds at most {max} aggregates")]
    TooManyAggregates { max: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DesignError>;
