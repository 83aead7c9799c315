//! Webhook Gateway Core
//!
//! Signature verification of inbound GitHub deliveries, event
//! classification, and outbound repository-dispatch calls.

pub mod dispatch;
pub mod events;
pub mod handlers;
pub mod signing;
pub mod types;
