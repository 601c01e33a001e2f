/// Things that can go wrong while talking to the server
pub mod error;
pub use error::Error;

/// The client that knows where the server is and how to call it
pub mod client;
pub use client::Client;

/// Log into an existing account
pub mod login;

/// Ask the server who the held token belongs to
pub mod me;

/// Create a new account
pub mod signup;
