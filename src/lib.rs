//! Nopi: the kenopi customer-support chat panel.
//!
//! The headless core (conversation store, single-flight dispatcher, view
//! model) builds without a renderer. The Dioxus panel is compiled in when a
//! platform feature (`web`, `desktop`, `mobile`) is enabled.

pub mod ai;
pub mod config;
pub mod conversation;
pub mod presentation;
pub mod session;
pub mod types;

#[cfg(feature = "dioxus")]
pub mod theme;
#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
