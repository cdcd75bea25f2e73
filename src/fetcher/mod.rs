pub mod client;
pub mod errors;

pub use client::WikiClient;
pub use errors::FetchError;
