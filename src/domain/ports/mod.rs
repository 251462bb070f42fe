mod domain_store;
mod file_store;

pub use domain_store::DomainStore;
pub use file_store::FileStore;
