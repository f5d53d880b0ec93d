//! Finstagram terminal client.
//!
//! A line-oriented frontend for [`finstagram_app`]: commands are read from
//! stdin, the active view is rendered as plain text to stdout, and logs go to
//! stderr.
//!
//! # Modules
//!
//! - [`args`]: Command-line configuration
//! - [`commands`]: Command parser mapping lines to user inputs
//! - [`driver`]: [`LineDriver`], the [`finstagram_app::Driver`] for text I/O
//! - [`render`]: Plain-text rendering of each view

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod args;
pub mod commands;
pub mod driver;
pub mod error;
pub mod render;

pub use args::Args;
pub use commands::{Command, CommandError, HELP, parse_line};
pub use driver::LineDriver;
pub use error::RuntimeError;
