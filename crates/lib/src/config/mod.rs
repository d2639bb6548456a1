//! Build configuration model.
//!
//! A configuration is declared by the user as [`raw`] shapes and checked by
//! [`validate`] into a [`BuildConfig`], the immutable value handed to the
//! external toolchain.

pub mod raw;
mod types;
mod validate;

pub use raw::RawConfig;
pub use types::*;
pub use validate::{ValidationError, ValidationErrors, validate};
