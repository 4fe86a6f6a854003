//! Transaction deletion endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{TransactionId, delete_transaction},
};

/// A route handler for deleting a transaction.
///
/// The owning envelope's balance is restored by the transaction amount. If
/// the envelope was deleted in the meantime the reversal is skipped.
pub async fn delete_transaction_endpoint(
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

    let transaction = delete_transaction(transaction_id, &connection)?;

    Ok(Json(json!({
        "message": format!("Transaction {} was deleted.", transaction.id),
    })))
}
