//! Envelope deletion endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    AppState, Error,
    envelope::{EnvelopeId, delete_envelope},
};

/// A route handler for deleting an envelope.
///
/// Deleting an envelope retracts its budget from the total budget.
/// Transactions posted against the envelope are kept as orphaned records.
pub async fn delete_envelope_endpoint(
    State(state): State<AppState>,
    Path(envelope_id): Path<EnvelopeId>,
) -> Result<impl IntoResponse, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let envelope = delete_envelope(envelope_id, &connection)?;

    Ok(Json(json!({
        "message": format!("Envelope \"{}\" was deleted.", envelope.title),
    })))
}
