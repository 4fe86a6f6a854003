//! Envelope retrieval endpoints.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    AppState, Error,
    envelope::{EnvelopeId, get_all_envelopes, get_envelope},
};

/// A route handler for getting an envelope by its database ID.
///
/// This function will return the status code 404 if the requested resource
/// does not exist (e.g., not created yet).
pub async fn get_envelope_endpoint(
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

    let envelope = get_envelope(envelope_id, &connection)?;

    Ok(Json(envelope))
}

/// A route handler for listing all envelopes in creation order.
pub async fn get_all_envelopes_endpoint(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let envelopes = get_all_envelopes(&connection)?;

    Ok(Json(envelopes))
}

#[cfg(test)]
mod get_envelope_endpoint_tests {
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
    async fn get_envelope_succeeds() {
        let server = get_test_server();
        let envelope = create_envelope(&server, "Rent", 1000.0).await;

        let response = server
            .get(&endpoints::format_endpoint(
                endpoints::ENVELOPE,
                envelope.id,
            ))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Envelope>(), envelope);
    }

    #[tokio::test]
    async fn get_envelope_with_invalid_id_returns_not_found() {
        let server = get_test_server();
        create_envelope(&server, "Rent", 1000.0).await;

        let response = server
            .get(&endpoints::format_endpoint(endpoints::ENVELOPE, 999))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn get_all_envelopes_returns_creation_order() {
        let server = get_test_server();
        let rent = create_envelope(&server, "Rent", 1000.0).await;
        let food = create_envelope(&server, "Food", 200.0).await;

        let response = server.get(endpoints::ENVELOPES).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<Envelope>>(), vec![rent, food]);
    }
}
