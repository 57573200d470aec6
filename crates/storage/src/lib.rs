#![warn(clippy::pedantic)]

pub mod dto;
pub mod file;
#[cfg(target_arch = "wasm32")]
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;

pub use file::FileStorage;
