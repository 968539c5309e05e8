//! # asynchooks-core
//!
//! Core crate for asynchooks. Contains the configuration schemas, the
//! hook mode type and the unified error system shared by the engine and
//! the demo binary.
//!
//! This crate has **no** internal dependencies on other asynchooks crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use types::HookMode;
