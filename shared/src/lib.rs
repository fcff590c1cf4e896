//! Shared core of the vocabulary client.
//!
//! All state lives in [`Model`] and changes only through [`App`]'s `update`.
//! Network, timers, the push channel, dialogs and audio are effects the
//! shell performs and answers with events.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod api;
pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ClientConfig, ConfigError};
pub use error::{AppError, AppResult, ErrorKind};
pub use event::Event;
pub use model::Model;
pub use view::ViewModel;
