//! Errors raised at the host boundary (persistence, property dispatch, JSON).
//!
//! Stem layout itself is total and never fails.

use thiserror::Error;

use crate::property::Pid;

#[derive(Error, Debug)]
pub enum StemError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("unexpected root element '{0}', expected 'Stem'")]
    UnexpectedRoot(String),

    #[error("invalid number for <{tag}>: '{value}'")]
    InvalidNumber { tag: String, value: String },

    #[error("property {pid:?} expects {expected}")]
    PropertyType { pid: Pid, expected: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
