//! Database schema setup for the application.

use rusqlite::Connection;

use crate::{
    Error, budget::create_budget_total_table, envelope::create_envelope_table,
    transaction::create_transaction_table,
};

/// Create the tables for the domain models.
///
/// Does nothing for tables that already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_envelope_table(connection)?;
    create_transaction_table(connection)?;
    create_budget_total_table(connection)?;

    Ok(())
}
