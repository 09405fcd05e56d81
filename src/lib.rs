//! Desktop front-end for a shared "group wallet" contract: connect an
//! account, watch the contract's balance and your membership, and deposit
//! or withdraw the native token.
//!
//! The contract itself is an external collaborator reached through the
//! provider's RPC facade; this crate does parameter formatting, read-state
//! aggregation, and refresh after confirmation.

pub mod amount;
pub mod app;
pub mod config;
pub mod contract_client;
pub mod events;
pub mod gateway;
pub mod service;
pub mod state;
pub mod view;
