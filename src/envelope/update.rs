//! Envelope update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    AppState, Error,
    envelope::{EnvelopeId, UpdateEnvelopeData, update_envelope},
};

/// A route handler for updating an envelope's balance and/or budget.
///
/// The `amount` field, when present and non-zero, is deducted from the
/// envelope's balance (a negative amount adds funds). The `budget` field,
/// when present, overwrites the envelope's budget allocation and must be at
/// least zero.
pub async fn update_envelope_endpoint(
    State(state): State<AppState>,
    Path(envelope_id): Path<EnvelopeId>,
    Json(changes): Json<UpdateEnvelopeData>,
) -> Result<impl IntoResponse, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let envelope = update_envelope(envelope_id, changes.amount, changes.budget, &connection)?;

    Ok(Json(envelope))
}

#[cfg(test)]
mod update_envelope_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router, endpoints, envelope::Envelope};

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    async fn create_envelope(server: &TestServer, title: &str, budget: f64) -> Envelope {
        server
            .post(endpoints::ENVELOPES)
            .json(&json!({ "title": title, "budget": budget }))
            .await
            .json::<Envelope>()
    }

    #[tokio::test]
    async fn update_envelope_applies_amount_and_budget() {
        let server = get_test_server();
        let envelope = create_envelope(&server, "Food", 200.0).await;

        let response = server
            .put(&endpoints::format_endpoint(
                endpoints::ENVELOPE,
                envelope.id,
            ))
            .json(&json!({ "amount": 50.0, "budget": 300.0 }))
            .await;

        response.assert_status_ok();

        let updated = response.json::<Envelope>();
        assert_eq!(updated.balance, 150.0);
        assert_eq!(updated.budget, 300.0);
    }

    #[tokio::test]
    async fn update_envelope_with_empty_body_changes_nothing() {
        let server = get_test_server();
        let envelope = create_envelope(&server, "Food", 200.0).await;

        let response = server
            .put(&endpoints::format_endpoint(
                endpoints::ENVELOPE,
                envelope.id,
            ))
            .json(&json!({}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Envelope>(), envelope);
    }

    #[tokio::test]
    async fn update_envelope_fails_on_negative_budget() {
        let server = get_test_server();
        let envelope = create_envelope(&server, "Food", 200.0).await;

        let response = server
            .put(&endpoints::format_endpoint(
                endpoints::ENVELOPE,
                envelope.id,
            ))
            .json(&json!({ "budget": -10.0 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn update_envelope_with_invalid_id_returns_not_found() {
        let server = get_test_server();

        let response = server
            .put(&endpoints::format_endpoint(endpoints::ENVELOPE, 999))
            .json(&json!({ "amount": 10.0 }))
            .await;

        response.assert_status_not_found();
    }
}
