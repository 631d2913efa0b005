//! HTTP request / response types.

pub mod chat;
