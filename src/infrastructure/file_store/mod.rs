mod local;

pub use local::LocalFileStore;
