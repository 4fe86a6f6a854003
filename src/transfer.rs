//! Transfers of funds between envelopes.
//!
//! A transfer moves balance, not budget: the total budget is untouched and
//! the sum of the two balances is conserved.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    envelope::{Envelope, EnvelopeId, get_envelope},
};

/// The request body for a transfer.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferData {
    /// The amount of money to move from the source to the destination.
    pub amount: Option<f64>,
}

/// The two envelopes affected by a successful transfer.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferOutcome {
    /// The source envelope with its reduced balance.
    pub from: Envelope,
    /// The destination envelope with its increased balance.
    pub to: Envelope,
}

/// Move `amount` from one envelope's balance to another's.
///
/// Both balance writes happen in the same SQL transaction. The source is
/// looked up before the destination so a transfer between two missing
/// envelopes reports the source.
///
/// # Errors
///
/// Returns [Error::SourceEnvelopeNotFound] or
/// [Error::DestinationEnvelopeNotFound] if either envelope is absent,
/// [Error::InvalidTransferAmount] if `amount` is not a positive finite
/// number, [Error::SelfTransfer] if both IDs name the same envelope, and
/// [Error::InsufficientBalance] if the source holds less than `amount`.
pub fn transfer_funds(
    from_id: EnvelopeId,
    to_id: EnvelopeId,
    amount: f64,
    connection: &Connection,
) -> Result<TransferOutcome, Error> {
    let tx = connection.unchecked_transaction()?;

    let mut from = match get_envelope(from_id, &tx) {
        Ok(envelope) => envelope,
        Err(Error::NotFound) => return Err(Error::SourceEnvelopeNotFound),
        Err(error) => return Err(error),
    };

    let mut to = match get_envelope(to_id, &tx) {
        Ok(envelope) => envelope,
        Err(Error::NotFound) => return Err(Error::DestinationEnvelopeNotFound),
        Err(error) => return Err(error),
    };

    if !(amount.is_finite() && amount > 0.0) {
        return Err(Error::InvalidTransferAmount(amount));
    }

    if from_id == to_id {
        return Err(Error::SelfTransfer);
    }

    if from.balance < amount {
        return Err(Error::InsufficientBalance {
            available: from.balance,
            requested: amount,
        });
    }

    from.balance -= amount;
    to.balance += amount;

    tx.execute(
        "UPDATE envelope SET balance = ?1 WHERE id = ?2",
        (from.balance, from.id),
    )?;
    tx.execute(
        "UPDATE envelope SET balance = ?1 WHERE id = ?2",
        (to.balance, to.id),
    )?;

    tx.commit()?;

    Ok(TransferOutcome { from, to })
}

/// A route handler for transferring funds between two envelopes.
pub async fn transfer_endpoint(
    State(state): State<AppState>,
    Path((from_id, to_id)): Path<(EnvelopeId, EnvelopeId)>,
    Json(transfer): Json<TransferData>,
) -> Result<impl IntoResponse, Error> {
    let amount = transfer.amount.ok_or(Error::MissingField("amount"))?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let outcome = transfer_funds(from_id, to_id, amount, &connection)?;

    Ok(Json(outcome))
}
