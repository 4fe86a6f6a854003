//! An envelope budgeting REST API.
//!
//! A total budget is split across named envelopes. Each envelope tracks the
//! amount allocated to it (its budget) and the amount left to spend (its
//! balance). Funds can be moved between envelopes with transfers, and spending
//! or income is recorded as transactions against a single envelope.
//!
//! This library provides the ledger rules, the SQLite persistence for them,
//! and a JSON API over axum.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod budget;
mod db;
mod endpoints;
mod envelope;
mod logging;
mod routing;
mod summary;
mod transaction;
mod transfer;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::logging_middleware;
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create an envelope title.
    #[error("envelope title cannot be empty")]
    EmptyEnvelopeTitle,

    /// A required field was absent from the request body.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A non-positive or non-finite budget was used to create an envelope.
    ///
    /// An envelope's budget is the amount allocated to it, so it must start
    /// out strictly positive.
    #[error("budget must be a positive number, got {0}")]
    InvalidBudget(f64),

    /// A negative or non-finite budget was used to update an envelope.
    ///
    /// Updates may shrink a budget to zero but not below.
    #[error("budget cannot be negative, got {0}")]
    NegativeBudget(f64),

    /// A transfer was requested with an amount that is not a positive finite
    /// number.
    #[error("transfer amount must be a positive number, got {0}")]
    InvalidTransferAmount(f64),

    /// A transfer was requested with the same envelope as both source and
    /// destination.
    #[error("cannot transfer funds from an envelope to itself")]
    SelfTransfer,

    /// A transfer was requested for more than the source envelope holds.
    ///
    /// Only transfers are subject to this check. Balances may go negative
    /// through envelope updates or transaction posting.
    #[error(
        "insufficient balance in the source envelope: {available} available, {requested} requested"
    )]
    InsufficientBalance {
        /// The source envelope's balance at the time of the transfer.
        available: f64,
        /// The amount the transfer asked for.
        requested: f64,
    },

    /// A transaction was posted with an amount of zero or a non-finite
    /// amount.
    ///
    /// A zero amount would record an adjustment that adjusts nothing, and an
    /// infinite or NaN amount would corrupt the envelope's balance.
    #[error("transaction amount must be a non-zero finite number, got {0}")]
    InvalidTransactionAmount(f64),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The source envelope of a transfer does not exist.
    #[error("source envelope not found")]
    SourceEnvelopeNotFound,

    /// The destination envelope of a transfer does not exist.
    #[error("destination envelope not found")]
    DestinationEnvelopeNotFound,

    /// Tried to update an envelope that does not exist.
    #[error("tried to update an envelope that is not in the database")]
    UpdateMissingEnvelope,

    /// Tried to delete an envelope that does not exist.
    #[error("tried to delete an envelope that is not in the database")]
    DeleteMissingEnvelope,

    /// Tried to delete a transaction that does not exist.
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Error::EmptyEnvelopeTitle
            | Error::MissingField(_)
            | Error::InvalidBudget(_)
            | Error::NegativeBudget(_)
            | Error::InvalidTransferAmount(_)
            | Error::SelfTransfer
            | Error::InsufficientBalance { .. }
            | Error::InvalidTransactionAmount(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound
            | Error::SourceEnvelopeNotFound
            | Error::DestinationEnvelopeNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::UpdateMissingEnvelope | Error::DeleteMissingEnvelope => {
                (StatusCode::NOT_FOUND, "Envelope not found.".to_string())
            }
            Error::DeleteMissingTransaction => {
                (StatusCode::NOT_FOUND, "Transaction not found.".to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
