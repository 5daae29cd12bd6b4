// SPDX-License-Identifier: MIT OR Apache-2.0
//! Builtin shader nodes: socket layouts, typed members and their enums.

pub mod catalog;
pub mod enums;
pub mod mapping;
pub mod members;

pub use enums::NamedEnum;
pub use mapping::TextureMapping;
pub use members::{ImageBinding, MemberAccess, MemberError, NodeData};
