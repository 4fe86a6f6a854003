//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::envelope::EnvelopeId;

/// Database identifier for a transaction.
pub type TransactionId = i64;

/// A dated adjustment to a single envelope's balance.
///
/// A positive amount records incoming funds, a negative amount records
/// spending. Deleting a transaction reverses its effect on the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The database ID of the transaction.
    pub id: TransactionId,
    /// The envelope the transaction was posted against.
    pub envelope_id: EnvelopeId,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money added to (positive) or spent from (negative) the
    /// envelope.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
}

/// The request body for posting a transaction.
///
/// Fields are optional so that absent fields produce a validation error
/// rather than a rejected request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewTransactionData {
    /// The envelope to post the transaction against.
    pub envelope_id: Option<EnvelopeId>,
    /// When the transaction happened.
    pub date: Option<Date>,
    /// The amount of money added to or spent from the envelope.
    pub amount: Option<f64>,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
}

/// A validated transaction waiting to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The envelope to post the transaction against.
    pub envelope_id: EnvelopeId,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money added to or spent from the envelope.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: Option<String>,
}

// These tests pin the wire format for dates to ISO strings such as
// '2025-10-26' so that clients are not broken by a serde representation
// change.
#[cfg(test)]
mod transaction_serde_tests {
    use serde_json::json;
    use time::macros::date;

    use super::{NewTransactionData, Transaction};

    #[test]
    fn date_serializes_as_iso_string() {
        let transaction = Transaction {
            id: 1,
            envelope_id: 2,
            date: date!(2025 - 10 - 26),
            amount: -50.0,
            description: None,
        };

        let value = serde_json::to_value(&transaction).expect("Could not serialize transaction");

        assert_eq!(value["date"], json!("2025-10-26"));
    }

    #[test]
    fn date_deserializes_from_iso_string() {
        let body = json!({
            "envelope_id": 2,
            "date": "2025-10-26",
            "amount": -50.0,
        });

        let data: NewTransactionData =
            serde_json::from_value(body).expect("Could not deserialize request body");

        assert_eq!(data.date, Some(date!(2025 - 10 - 26)));
    }
}
