//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - Platforms and backends
//! - The capability set derived from them
//! - Build surfaces (definitions, search paths, libraries)
//! - Plugin module rules

pub mod backend;
pub mod capability;
pub mod module;
pub mod platform;
pub mod surface;

pub use backend::Backend;
pub use capability::CapabilitySet;
pub use module::{ModuleGraph, ModuleRules};
pub use platform::{Architecture, Platform};
pub use surface::{Define, Definition, DefinitionScope, FlagStyle, LibraryRequirement};
