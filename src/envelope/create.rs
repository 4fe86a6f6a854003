//! Envelope creation endpoint.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    AppState, Error,
    envelope::{EnvelopeTitle, NewEnvelopeData, create_envelope},
};

/// A route handler for creating a new envelope.
///
/// Responds with 201 and the created envelope, whose balance starts equal to
/// its budget.
pub async fn create_envelope_endpoint(
    State(state): State<AppState>,
    Json(new_envelope): Json<NewEnvelopeData>,
) -> Result<impl IntoResponse, Error> {
    let title = match new_envelope.title {
        Some(ref title) => EnvelopeTitle::new(title)?,
        None => return Err(Error::MissingField("title")),
    };
    let budget = new_envelope.budget.ok_or(Error::MissingField("budget"))?;

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let envelope = create_envelope(title, budget, &connection)?;

    Ok((StatusCode::CREATED, Json(envelope)))
}
