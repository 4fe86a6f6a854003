//! Maintenance of the aggregate total budget.
//!
//! The total budget is the sum of every envelope's budget allocation, held in
//! a one-row table so that it survives restarts. Rather than adjusting the
//! stored value by deltas, [refresh_total_budget] recomputes the sum from the
//! envelope table inside the caller's SQL transaction, so the stored total can
//! never drift from the true sum.

use rusqlite::Connection;

use crate::Error;

/// Initialize the table holding the total budget scalar.
pub fn create_budget_total_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget_total (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            total REAL NOT NULL
        );

        INSERT OR IGNORE INTO budget_total (id, total) VALUES (1, 0);",
    )?;

    Ok(())
}

/// Recompute the stored total budget as the sum of all envelope budgets.
///
/// Callers that mutate the envelope table must call this within the same SQL
/// transaction as the mutation, so the stored total and the envelope table
/// always agree.
pub fn refresh_total_budget(connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "UPDATE budget_total
        SET total = (SELECT COALESCE(SUM(budget), 0) FROM envelope)
        WHERE id = 1",
        (),
    )?;

    Ok(())
}

/// Get the stored total budget.
pub fn get_total_budget(connection: &Connection) -> Result<f64, Error> {
    let total = connection.query_row("SELECT total FROM budget_total WHERE id = 1", [], |row| {
        row.get(0)
    })?;

    Ok(total)
}
