//! Presentation controller for a single-page portfolio: typing banner,
//! collapsible navigation, scroll effects, portfolio filtering and the
//! contact form acknowledgement.
//!
//! All behaviour lives in [`controller::PresentationController`], written
//! against the capability traits in [`ui`] so it runs the same in the
//! browser (see `frontend`, wasm32 only) and in native tests.

pub mod config;
pub mod contact;
pub mod controller;
pub mod error;
pub mod filter;
pub mod logging;
pub mod navigation;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod typing;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
mod testing;
