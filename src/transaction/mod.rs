//! Transaction management: dated, reversible adjustments to envelope balances.

mod create;
mod db;
mod delete;
mod domain;
mod get;

pub use create::create_transaction_endpoint;
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_all_transactions,
    get_transaction,
};
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, NewTransactionData, Transaction, TransactionId};
pub use get::{get_all_transactions_endpoint, get_transaction_endpoint};
