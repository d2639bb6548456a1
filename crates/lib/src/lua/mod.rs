//! Lua runtime and evaluation.
//!
//! This module provides the Lua execution environment for `solconf.lua`
//! configurations.
//!
//! # Submodules
//!
//! - [`globals`] - The `solconf` global table and its registration functions
//! - [`loaders`] - File loading with `__dir` injection
//! - [`runtime`] - Lua VM setup

pub mod globals;
pub mod loaders;
pub mod runtime;

pub use globals::Declarations;
