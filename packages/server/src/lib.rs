//! Multi-channel WebSocket chat relay.
//!
//! Clients join named channels under a nickname, exchange messages and typing
//! notifications, and receive a bounded history on join.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
