//! Transaction posting endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    AppState, Error,
    transaction::{NewTransaction, NewTransactionData, create_transaction},
};

/// A route handler for posting a transaction against an envelope.
///
/// Responds with 201 and the created transaction. The envelope's balance is
/// adjusted by the transaction amount at the same time.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Json(new_transaction): Json<NewTransactionData>,
) -> Result<impl IntoResponse, Error> {
    let envelope_id = new_transaction
        .envelope_id
        .ok_or(Error::MissingField("envelope_id"))?;
    let date = new_transaction.date.ok_or(Error::MissingField("date"))?;
    let amount = new_transaction
        .amount
        .ok_or(Error::MissingField("amount"))?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let transaction = create_transaction(
        NewTransaction {
            envelope_id,
            date,
            amount,
            description: new_transaction.description,
        },
        &connection,
    )?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
