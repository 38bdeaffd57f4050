//! Compile-time capability set.
//!
//! The backend half of the set is a single [`Backend`] value, so the four
//! backend definitions are one-hot by construction.

use serde::{Deserialize, Serialize};

use crate::core::backend::Backend;
use crate::core::surface::Define;

/// Definition announcing in-process OAuth login support.
pub const OAUTH_DEFINE: &str = "PLATFORM_SUPPORTS_MIXER_OAUTH";

/// Capabilities compiled into the runtime module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapabilitySet {
    /// Browser-based OAuth login is available
    pub oauth: bool,
    /// Selected backend
    pub backend: Backend,
}

impl CapabilitySet {
    pub fn new(oauth: bool, backend: Backend) -> Self {
        CapabilitySet { oauth, backend }
    }

    /// Value of a named capability, `None` if the name is unknown.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Check whether a named capability is set.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name) == Some(1)
    }

    /// All capabilities as `(name, value)` pairs, OAuth first.
    pub fn entries(&self) -> Vec<(&'static str, u32)> {
        let mut entries = Vec::with_capacity(1 + Backend::ALL.len());
        entries.push((OAUTH_DEFINE, self.oauth as u32));
        for backend in Backend::ALL {
            entries.push((backend.define_name(), (backend == self.backend) as u32));
        }
        entries
    }

    /// The OAuth definition alone.
    pub fn oauth_define(&self) -> Define {
        Define::key_value(OAUTH_DEFINE, (self.oauth as u32).to_string())
    }

    /// The four backend definitions.
    pub fn backend_defines(&self) -> Vec<Define> {
        Backend::ALL
            .iter()
            .map(|b| Define::key_value(b.define_name(), ((*b == self.backend) as u32).to_string()))
            .collect()
    }
}
