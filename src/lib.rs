//! Double-buffered software rendering of an alpha-blended sprite in a fixed-step loop.
//!
//! [`frame::run_loop`] drains window events, redraws the back buffer with
//! [`frame::render_frame`] and presents it, then sleeps out the rest of the step.
//! [`dib`] holds the sprite pixel format shared with `build.rs` and the
//! `embed-dibits` tool.

pub mod assets;
pub mod compose;
pub mod config;
pub mod dib;
pub mod error;
pub mod frame;
pub mod platform;
pub mod types;
pub mod window;

pub use error::Error;
