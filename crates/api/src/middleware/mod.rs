//! Request middleware.
//!
//! - [`api_key::require_api_key`] -- rejects requests without the shared API key.

pub mod api_key;
