//! Orderdesk: a minimal order-management service demonstrating async
//! database access. A state container mirrors persisted orders in
//! memory; one page renders a form and a grid of cards bound to it.

pub mod config;
pub mod error;
pub mod http;
pub mod state;
