//! Screen render functions. Each takes the state and the UI→service sender.

pub mod connect;
pub mod panel;
