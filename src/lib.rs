// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod engine_client;
pub mod key_parser;
pub mod metrics_repo;
pub mod models;
pub mod routes;
pub mod worker;

pub use aggregator::aggregate;
pub use key_parser::{KeyParser, Malformed, ProcessKey};
