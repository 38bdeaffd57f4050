//! mixer-build - platform/backend resolver for the Mixer interactivity plugin
//!
//! This crate decides, per target platform, which interactivity backend the
//! plugin's runtime module is built with, which capability definitions it
//! sees, and which third-party libraries and search paths it links.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

pub use core::{
    backend::Backend, capability::CapabilitySet, module::ModuleRules, platform::Platform,
};

pub use resolver::{resolve, Resolution, Resolver, ResolverOptions};
pub use util::context::GlobalContext;
