//! HTTP request handlers.

pub(crate) mod chat;
pub(crate) mod health;
