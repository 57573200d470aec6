#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod program;
mod service;
mod settings;

pub use error::*;
pub use exercise::*;
pub use program::*;
pub use service::*;
pub use settings::*;
