//! Native client library manifests.
//!
//! Names are the import libraries shipped under `ThirdParty/Lib/<fragment>`.
//! Order matters for single-pass linkers: the client library comes before
//! the REST runtime it depends on, and system libraries come last.

use std::path::Path;

use crate::core::backend::Backend;
use crate::core::platform::Platform;
use crate::core::surface::{LibraryRequirement, ModuleDependency};

const WINDOWS_V1: &[&str] = &[
    "Interactivity.Win32.Cpp.lib",
    "cpprest140_2_9.lib",
    "winhttp.lib",
    "crypt32.lib",
    "bcrypt.lib",
];

const UWP_V1: &[&str] = &["Interactivity.UWP.Cpp.lib", "cpprest140_uwp_2_9.lib"];

const XBOX_V1: &[&str] = &["Interactivity.Xbox.Cpp.lib", "casablanca140.xbox.lib"];

/// Library names linked for a platform/backend pair.
///
/// Only the v1 native client ships prebuilt libraries.
pub fn library_names(platform: Platform, backend: Backend) -> &'static [&'static str] {
    if backend != Backend::NativeClientV1 {
        return &[];
    }

    match platform {
        Platform::Win32 | Platform::Win64 => WINDOWS_V1,
        Platform::Uwp32 | Platform::Uwp64 => UWP_V1,
        Platform::XboxOne => XBOX_V1,
        Platform::Other => &[],
    }
}

/// Library requirements rooted at `lib_dir`.
pub fn libraries(platform: Platform, backend: Backend, lib_dir: &Path) -> Vec<LibraryRequirement> {
    library_names(platform, backend)
        .iter()
        .map(|name| LibraryRequirement::new(lib_dir, *name))
        .collect()
}

/// Engine modules required on a platform regardless of backend.
pub fn module_dependencies(platform: Platform) -> Vec<ModuleDependency> {
    match platform {
        Platform::Win32 | Platform::Win64 => vec![ModuleDependency::new("WebBrowser")],
        Platform::Uwp32 | Platform::Uwp64 => vec![ModuleDependency::new("OnlineSubsystemUtils")],
        Platform::XboxOne | Platform::Other => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_system_libs_last() {
        let names = library_names(Platform::Win64, Backend::NativeClientV1);
        assert_eq!(names.first(), Some(&"Interactivity.Win32.Cpp.lib"));
        assert_eq!(&names[names.len() - 2..], &["crypt32.lib", "bcrypt.lib"]);
    }

    #[test]
    fn test_no_libraries_without_v1() {
        for platform in Platform::ALL {
            for backend in [
                Backend::NativeClientV2,
                Backend::NullBackend,
                Backend::EngineBuiltin,
            ] {
                assert!(library_names(platform, backend).is_empty());
            }
        }
    }

    #[test]
    fn test_module_dependencies() {
        assert_eq!(
            module_dependencies(Platform::Uwp32),
            vec![ModuleDependency::new("OnlineSubsystemUtils")]
        );
        assert_eq!(
            module_dependencies(Platform::Win32),
            vec![ModuleDependency::new("WebBrowser")]
        );
        assert!(module_dependencies(Platform::XboxOne).is_empty());
    }
}
