//! Transaction retrieval endpoints.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    AppState, Error,
    transaction::{TransactionId, get_all_transactions, get_transaction},
};

/// A route handler for getting a transaction by its database ID.
///
/// This function will return the status code 404 if the requested resource
/// does not exist (e.g., not created yet).
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<impl IntoResponse, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let transaction = get_transaction(transaction_id, &connection)?;

    Ok(Json(transaction))
}

/// A route handler for listing all transactions in posting order.
pub async fn get_all_transactions_endpoint(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let transactions = get_all_transactions(&connection)?;

    Ok(Json(transactions))
}
