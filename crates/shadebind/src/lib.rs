// SPDX-License-Identifier: MIT OR Apache-2.0
//! Handle-based binding layer over the `shadebind_graph` shader graph.
//!
//! This crate lets a host application drive shader graphs through integer
//! handles:
//! - Shaders, scenes and images live in append-only handle tables
//! - Node edits dispatch on the node's typed members
//! - Images are deduplicated on name and dimensions
//! - Graph links are made by socket name
//!
//! ## Architecture
//!
//! [`Registry`] owns every table and is the Rust entry point. The [`ffi`]
//! module wraps one process-wide registry in flat `extern "C"` functions that
//! log failures instead of returning them.

pub mod config;
pub mod error;
pub mod handle;
pub mod image;
pub mod logging;
pub mod registry;
pub mod scene;
pub mod shader;

#[allow(unsafe_code)]
pub mod ffi;

pub use config::BindingConfig;
pub use error::{BindingError, Result};
pub use handle::{Handle, HandleError, HandleTable};
pub use image::{Image, ImageCache, ImageHandle, ImageKey, PixelData};
pub use registry::Registry;
pub use scene::{Scene, SceneHandle};
pub use shader::{Shader, ShaderHandle};

/// Held by tests that touch the process-wide runtime or host logger table
#[cfg(test)]
pub(crate) static GLOBAL_STATE_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());
