//! HTTP request handlers

pub mod arrival;
pub mod health;
