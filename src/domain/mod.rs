//! Domain types for the browser switch handoff and the ports it talks through.

pub mod payment;
pub mod ports;
pub mod switch;
