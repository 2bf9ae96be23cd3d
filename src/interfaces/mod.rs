//! Transport interfaces (HTTP REST)

pub mod http;
