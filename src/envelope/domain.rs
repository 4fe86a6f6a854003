//! Core envelope domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty envelope title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct EnvelopeTitle(String);

impl EnvelopeTitle {
    /// Create an envelope title.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyEnvelopeTitle] if `title` is
    /// an empty string.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyEnvelopeTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create an envelope title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for EnvelopeTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for EnvelopeTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnvelopeTitle::new(s)
    }
}

impl Display for EnvelopeTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for an envelope.
pub type EnvelopeId = i64;

/// A named budget bucket.
///
/// The budget is the amount allocated to the envelope; the balance is the
/// amount left to spend. A new envelope starts with its balance equal to its
/// budget. The balance may go negative through overspending; only transfers
/// check for sufficient funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The database ID of the envelope.
    pub id: EnvelopeId,
    /// The name of the envelope (e.g., 'Rent', 'Groceries').
    pub title: EnvelopeTitle,
    /// The amount of money allocated to the envelope.
    pub budget: f64,
    /// The amount of money left to spend from the envelope.
    pub balance: f64,
}

/// The request body for creating an envelope.
///
/// Fields are optional so that absent fields produce a validation error
/// rather than a rejected request body.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewEnvelopeData {
    /// The name of the envelope.
    pub title: Option<String>,
    /// The amount of money to allocate to the envelope.
    pub budget: Option<f64>,
}

/// The request body for updating an envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEnvelopeData {
    /// An amount to deduct from the envelope's balance, e.g. money spent
    /// outside of a recorded transaction. A negative amount adds funds.
    pub amount: Option<f64>,
    /// A new budget allocation for the envelope.
    pub budget: Option<f64>,
}
