//! Envelope management: named budget buckets with an allocation and a balance.

mod create;
mod db;
mod delete;
mod domain;
mod get;
mod update;

pub use create::create_envelope_endpoint;
pub use db::{
    create_envelope, create_envelope_table, delete_envelope, get_all_envelopes, get_envelope,
    update_envelope,
};
pub use delete::delete_envelope_endpoint;
pub use domain::{Envelope, EnvelopeId, EnvelopeTitle, NewEnvelopeData, UpdateEnvelopeData};
pub use get::{get_all_envelopes_endpoint, get_envelope_endpoint};
pub use update::update_envelope_endpoint;
