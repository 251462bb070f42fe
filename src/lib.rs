//! Domain registry service: domains with a mapper spreadsheet and an image,
//! kept in MongoDB and on the local filesystem, served over HTTP.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
