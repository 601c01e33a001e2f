//! Code shared by campus rides clients: the auth API and the token store.

/// Talk to the auth service.
pub mod auth;

/// Durable storage for the login token.
pub mod store;
