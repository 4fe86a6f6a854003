//! Database operations and ledger rules for transactions.
//!
//! Posting a transaction and adjusting the envelope's balance happen in one
//! SQL transaction, as do deletion and the balance reversal.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    envelope::get_envelope,
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Post a transaction and return it with its generated ID.
///
/// The owning envelope's balance is adjusted by the transaction amount in the
/// same SQL transaction as the insert: positive amounts add funds, negative
/// amounts record spending. The balance is allowed to go negative.
///
/// # Errors
///
/// Returns [Error::InvalidTransactionAmount] if the amount is zero or not
/// finite, and [Error::NotFound] if the envelope does not exist.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if !new_transaction.amount.is_finite() || new_transaction.amount == 0.0 {
        return Err(Error::InvalidTransactionAmount(new_transaction.amount));
    }

    let tx = connection.unchecked_transaction()?;

    // Posting against a missing envelope is a client error, not a storage
    // error, so check before inserting.
    get_envelope(new_transaction.envelope_id, &tx)?;

    tx.execute(
        "INSERT INTO \"transaction\" (envelope_id, date, amount, description)
        VALUES (?1, ?2, ?3, ?4);",
        (
            new_transaction.envelope_id,
            new_transaction.date,
            new_transaction.amount,
            &new_transaction.description,
        ),
    )?;
    let id = tx.last_insert_rowid();

    tx.execute(
        "UPDATE envelope SET balance = balance + ?1 WHERE id = ?2",
        (new_transaction.amount, new_transaction.envelope_id),
    )?;

    tx.commit()?;

    Ok(Transaction {
        id,
        envelope_id: new_transaction.envelope_id,
        date: new_transaction.date,
        amount: new_transaction.amount,
        description: new_transaction.description,
    })
}

/// Retrieve a single transaction by ID.
pub fn get_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, envelope_id, date, amount, description
            FROM \"transaction\" WHERE id = :id;",
        )?
        .query_row(&[(":id", &transaction_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all transactions in posting order.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, envelope_id, date, amount, description
            FROM \"transaction\" ORDER BY id ASC;",
        )?
        .query_map([], map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Delete a transaction by ID, reversing its effect on the owning envelope.
///
/// If the envelope was deleted after the transaction was posted, the reversal
/// is silently skipped: the record is removed and no balance changes.
/// Returns the deleted transaction.
///
/// # Errors
///
/// Returns [Error::DeleteMissingTransaction] if the transaction doesn't
/// exist.
pub fn delete_transaction(
    transaction_id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let tx = connection.unchecked_transaction()?;

    let transaction = match get_transaction(transaction_id, &tx) {
        Ok(transaction) => transaction,
        Err(Error::NotFound) => return Err(Error::DeleteMissingTransaction),
        Err(error) => return Err(error),
    };

    tx.execute("DELETE FROM \"transaction\" WHERE id = ?1", [transaction_id])?;

    // Zero rows affected means the envelope is gone, which is fine: there is
    // no balance left to reverse.
    tx.execute(
        "UPDATE envelope SET balance = balance - ?1 WHERE id = ?2",
        (transaction.amount, transaction.envelope_id),
    )?;

    tx.commit()?;

    Ok(transaction)
}

/// Initialize the transaction table.
///
/// There is deliberately no foreign key on `envelope_id`: deleting an
/// envelope keeps its transactions as orphaned records.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            envelope_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            amount REAL NOT NULL,
            description TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_envelope_id
        ON \"transaction\"(envelope_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let envelope_id = row.get(1)?;
    let date = row.get(2)?;
    let amount = row.get(3)?;
    let description = row.get(4)?;

    Ok(Transaction {
        id,
        envelope_id,
        date,
        amount,
        description,
    })
}
