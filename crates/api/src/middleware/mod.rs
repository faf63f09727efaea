/// Password hashing and request identity
pub mod auth;
/// Mapping of domain errors onto HTTP responses
pub mod error_handling;
