//! Elevion Types - Shared domain types
//!
//! This crate contains the domain vocabulary used across the Elevion
//! platform services:
//! - Entity status enums (subscriptions, orders, feedback, mockups, pricing)
//! - Parsing helpers for the string columns the store keeps them in

pub mod status;

pub use status::*;
