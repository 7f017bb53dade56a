//! Core business logic: application state, the action reducer, display
//! ordering, and configuration. Nothing in here touches the terminal.

pub mod action;
pub mod config;
pub mod order;
pub mod state;
