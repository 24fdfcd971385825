//! Terminal client for a remote wallet API. A wallet and its gift card
//! sub-resources each live in an asynchronous `{data, loading, error}`
//! container that fetches and saves over HTTP with a bearer token.

pub mod console;
pub mod credentials;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
