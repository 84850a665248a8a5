//! HTTP request handlers

pub mod cdn;
pub mod health;
