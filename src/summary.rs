//! Budget summary endpoint.

use axum::{Json, extract::State, response::IntoResponse};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    budget::get_total_budget,
    envelope::{EnvelopeTitle, get_all_envelopes},
};

/// An overview of the whole budget: the total allocation and each envelope's
/// allocation and remaining balance.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all envelope budgets.
    pub total_budget: f64,
    /// Each envelope's allocation and balance.
    pub envelopes: Vec<EnvelopeSummary>,
}

/// One envelope's line in the budget summary.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSummary {
    /// The name of the envelope.
    pub title: EnvelopeTitle,
    /// The amount of money allocated to the envelope.
    pub budget: f64,
    /// The amount of money left to spend from the envelope.
    pub balance: f64,
}

/// Build the budget summary from the stored total and the envelope table.
pub fn get_summary(connection: &Connection) -> Result<Summary, Error> {
    let total_budget = get_total_budget(connection)?;
    let envelopes = get_all_envelopes(connection)?
        .into_iter()
        .map(|envelope| EnvelopeSummary {
            title: envelope.title,
            budget: envelope.budget,
            balance: envelope.balance,
        })
        .collect();

    Ok(Summary {
        total_budget,
        envelopes,
    })
}

/// A route handler for the budget summary.
pub async fn get_summary_endpoint(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, Error> {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Err(Error::DatabaseLockError);
        }
    };

    let summary = get_summary(&connection)?;

    Ok(Json(summary))
}

#[cfg(test)]
mod summary_tests {
    use rusqlite::Connection;

    use crate::{
        envelope::{EnvelopeTitle, create_envelope},
        initialize_db,
        transfer::transfer_funds,
    };

    use super::get_summary;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).expect("Could not initialize database");
        connection
    }

    #[test]
    fn summary_of_empty_budget_is_zero() {
        let connection = get_test_db_connection();

        let summary = get_summary(&connection).expect("Could not get summary");

        assert_eq!(summary.total_budget, 0.0);
        assert!(summary.envelopes.is_empty());
    }

    #[test]
    fn summary_lists_each_envelope() {
        let connection = get_test_db_connection();
        let rent =
            create_envelope(EnvelopeTitle::new_unchecked("Rent"), 1000.0, &connection).unwrap();
        let food =
            create_envelope(EnvelopeTitle::new_unchecked("Food"), 200.0, &connection).unwrap();
        transfer_funds(rent.id, food.id, 150.0, &connection).unwrap();

        let summary = get_summary(&connection).expect("Could not get summary");

        assert_eq!(summary.total_budget, 1200.0);
        assert_eq!(summary.envelopes.len(), 2);
        assert_eq!(summary.envelopes[0].title.as_ref(), "Rent");
        assert_eq!(summary.envelopes[0].budget, 1000.0);
        assert_eq!(summary.envelopes[0].balance, 850.0);
        assert_eq!(summary.envelopes[1].title.as_ref(), "Food");
        assert_eq!(summary.envelopes[1].balance, 350.0);
    }
}
