// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod data;
pub mod engine;
pub mod lottery;
pub mod order;
pub mod resolve;
pub mod rules;
pub mod standings;
