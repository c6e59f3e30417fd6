//! Our custom error type.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;
use wasm_bindgen::JsValue;

pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request never produced a response.
    Transport,
    /// The backend answered with a non-success status code.
    Status(u16),
    /// The input was rejected before anything was sent.
    Validation,
    /// The backend answered successfully but without the data we needed.
    MissingData,
    /// The backend answered successfully with JSON of the wrong shape.
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct WebError {
    pub kind: ErrorKind,
    pub message: String,
}

impl WebError {
    pub fn new(kind: ErrorKind, message: impl ToString) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    pub fn transport<E: std::error::Error>(e: E) -> Self {
        Self::new(ErrorKind::Transport, e)
    }

    pub fn status(code: u16, message: impl ToString) -> Self {
        Self::new(ErrorKind::Status(code), message)
    }

    pub fn validation(message: impl ToString) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn missing(message: impl ToString) -> Self {
        Self::new(ErrorKind::MissingData, message)
    }

    pub fn decode(message: impl ToString) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn from_js(js: JsValue) -> Self {
        Self::new(ErrorKind::Transport, format!("{js:?}"))
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}
