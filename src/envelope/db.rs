//! Database operations and ledger rules for envelopes.
//!
//! Every operation that touches more than one row runs inside a SQL
//! transaction so a failure part-way cannot leave the envelope table and the
//! stored total budget disagreeing.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    budget::refresh_total_budget,
    envelope::{Envelope, EnvelopeId, EnvelopeTitle},
};

/// Create an envelope and return it with its generated ID.
///
/// The new envelope's balance starts equal to its budget, and the stored
/// total budget is refreshed in the same SQL transaction as the insert.
///
/// # Errors
///
/// Returns [Error::InvalidBudget] if `budget` is not a positive finite
/// number.
pub fn create_envelope(
    title: EnvelopeTitle,
    budget: f64,
    connection: &Connection,
) -> Result<Envelope, Error> {
    if !(budget.is_finite() && budget > 0.0) {
        return Err(Error::InvalidBudget(budget));
    }

    // Using unchecked_transaction because we only have &Connection from the MutexGuard.
    let tx = connection.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO envelope (title, budget, balance) VALUES (?1, ?2, ?2);",
        (title.as_ref(), budget),
    )?;
    let id = tx.last_insert_rowid();

    refresh_total_budget(&tx)?;
    tx.commit()?;

    Ok(Envelope {
        id,
        title,
        budget,
        balance: budget,
    })
}

/// Retrieve a single envelope by ID.
pub fn get_envelope(envelope_id: EnvelopeId, connection: &Connection) -> Result<Envelope, Error> {
    connection
        .prepare("SELECT id, title, budget, balance FROM envelope WHERE id = :id;")?
        .query_row(&[(":id", &envelope_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all envelopes in creation order.
pub fn get_all_envelopes(connection: &Connection) -> Result<Vec<Envelope>, Error> {
    connection
        .prepare("SELECT id, title, budget, balance FROM envelope ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_envelope| maybe_envelope.map_err(|error| error.into()))
        .collect()
}

/// Update an envelope's balance and/or budget and return the updated row.
///
/// `amount`, when present and non-zero, is a balance delta: the balance is
/// reduced by it (a negative amount adds funds). It does not affect the
/// budget or the stored total budget. `new_budget`, when present, overwrites
/// the budget allocation and the total budget is refreshed in the same SQL
/// transaction.
///
/// # Errors
///
/// Returns [Error::NegativeBudget] if `new_budget` is negative or not
/// finite, and [Error::UpdateMissingEnvelope] if the envelope doesn't exist.
pub fn update_envelope(
    envelope_id: EnvelopeId,
    amount: Option<f64>,
    new_budget: Option<f64>,
    connection: &Connection,
) -> Result<Envelope, Error> {
    if let Some(budget) = new_budget
        && !(budget.is_finite() && budget >= 0.0)
    {
        return Err(Error::NegativeBudget(budget));
    }

    let tx = connection.unchecked_transaction()?;

    let mut envelope = match get_envelope(envelope_id, &tx) {
        Ok(envelope) => envelope,
        Err(Error::NotFound) => return Err(Error::UpdateMissingEnvelope),
        Err(error) => return Err(error),
    };

    if let Some(amount) = amount
        && amount != 0.0
    {
        envelope.balance -= amount;
    }

    if let Some(budget) = new_budget {
        envelope.budget = budget;
    }

    tx.execute(
        "UPDATE envelope SET budget = ?1, balance = ?2 WHERE id = ?3",
        (envelope.budget, envelope.balance, envelope.id),
    )?;

    refresh_total_budget(&tx)?;
    tx.commit()?;

    Ok(envelope)
}

/// Delete an envelope by ID and return the deleted row.
///
/// The stored total budget is refreshed in the same SQL transaction, which
/// retracts the deleted envelope's budget from the total. Transactions
/// posted against the envelope are kept as orphaned records.
///
/// # Errors
///
/// Returns [Error::DeleteMissingEnvelope] if the envelope doesn't exist.
pub fn delete_envelope(envelope_id: EnvelopeId, connection: &Connection) -> Result<Envelope, Error> {
    let tx = connection.unchecked_transaction()?;

    let envelope = match get_envelope(envelope_id, &tx) {
        Ok(envelope) => envelope,
        Err(Error::NotFound) => return Err(Error::DeleteMissingEnvelope),
        Err(error) => return Err(error),
    };

    tx.execute("DELETE FROM envelope WHERE id = ?1", [envelope_id])?;

    refresh_total_budget(&tx)?;
    tx.commit()?;

    Ok(envelope)
}

/// Initialize the envelope table.
pub fn create_envelope_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS envelope (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            budget REAL NOT NULL,
            balance REAL NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Envelope, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let title = EnvelopeTitle::new_unchecked(&raw_title);
    let budget = row.get(2)?;
    let balance = row.get(3)?;

    Ok(Envelope {
        id,
        title,
        budget,
        balance,
    })
}
