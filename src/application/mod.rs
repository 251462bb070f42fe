//! Application layer - Use cases and orchestration.
//!
//! Services here coordinate the record store and the file store through
//! domain ports (traits) rather than concrete implementations.

pub mod services;

pub use services::{CreateDomain, DomainManager, UpdateDomain};
