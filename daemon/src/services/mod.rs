//! The operations behind the http handlers that do more than a single CRUD call.

pub mod artworks;
pub mod auth;
pub mod series;
pub mod stats;
