//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    envelope::{
        create_envelope_endpoint, delete_envelope_endpoint, get_all_envelopes_endpoint,
        get_envelope_endpoint, update_envelope_endpoint,
    },
    summary::get_summary_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_all_transactions_endpoint,
        get_transaction_endpoint,
    },
    transfer::transfer_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_summary_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(
            endpoints::ENVELOPES,
            post(create_envelope_endpoint).get(get_all_envelopes_endpoint),
        )
        .route(
            endpoints::ENVELOPE,
            get(get_envelope_endpoint)
                .put(update_envelope_endpoint)
                .delete(delete_envelope_endpoint),
        )
        .route(endpoints::TRANSFER, post(transfer_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint).get(get_all_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .fallback(get_unknown_route)
        .with_state(state)
}

/// The fallback for routes that do not exist.
async fn get_unknown_route() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "The requested resource could not be found.",
        })),
    )
        .into_response()
}

#[cfg(test)]
mod router_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, endpoints,
        envelope::Envelope,
        summary::Summary,
        transaction::Transaction,
        transfer::TransferOutcome,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection).expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/does_not_exist").await;

        response.assert_status_not_found();
        response.assert_json(&json!({
            "error": "The requested resource could not be found.",
        }));
    }

    #[tokio::test]
    async fn root_serves_the_summary() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Summary>().total_budget, 0.0);
    }

    /// Walks a whole budget through its lifecycle: allocate two envelopes,
    /// move funds between them, record spending, and retire an envelope.
    #[tokio::test]
    async fn budget_lifecycle() {
        let server = get_test_server();

        // Create the Rent envelope: balance starts equal to its budget.
        let rent = server
            .post(endpoints::ENVELOPES)
            .json(&json!({ "title": "Rent", "budget": 1000.0 }))
            .await
            .json::<Envelope>();
        assert_eq!(rent.balance, 1000.0);
        assert_eq!(rent.budget, 1000.0);
        assert_eq!(get_total_budget(&server).await, 1000.0);

        // Create the Food envelope: the total budget accumulates.
        let food = server
            .post(endpoints::ENVELOPES)
            .json(&json!({ "title": "Food", "budget": 200.0 }))
            .await
            .json::<Envelope>();
        assert_eq!(get_total_budget(&server).await, 1200.0);

        // Transfer 150 from Rent to Food: balances move, the total doesn't.
        let outcome = server
            .post(&format!("/api/envelopes/transfer/{}/{}", rent.id, food.id))
            .json(&json!({ "amount": 150.0 }))
            .await
            .json::<TransferOutcome>();
        assert_eq!(outcome.from.balance, 850.0);
        assert_eq!(outcome.to.balance, 350.0);
        assert_eq!(get_total_budget(&server).await, 1200.0);

        // Spend 50 from Food.
        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "envelope_id": food.id,
                "date": "2025-11-01",
                "amount": -50.0,
            }))
            .await
            .json::<Transaction>();
        let food_after = server
            .get(&endpoints::format_endpoint(endpoints::ENVELOPE, food.id))
            .await
            .json::<Envelope>();
        assert_eq!(food_after.balance, 300.0);

        // Delete Rent: its budget is retracted from the total.
        server
            .delete(&endpoints::format_endpoint(endpoints::ENVELOPE, rent.id))
            .await
            .assert_status_ok();
        assert_eq!(get_total_budget(&server).await, 200.0);
    }

    async fn get_total_budget(server: &TestServer) -> f64 {
        server
            .get(endpoints::SUMMARY)
            .await
            .json::<Summary>()
            .total_budget
    }
}
