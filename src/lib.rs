//! Library crate for usrapi-manager.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST client for the user backend (`api`)
//! - Application state and update loop (`app`)
//! - Error taxonomy and banner formatting (`error`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `usrapi-manager` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod error;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{ApiError, Result};
