mod in_memory;
mod mongo;

pub use in_memory::InMemoryDomainStore;
pub use mongo::MongoDomainStore;
