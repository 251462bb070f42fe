mod domain_manager;

pub use domain_manager::{CreateDomain, DomainManager, UpdateDomain};
