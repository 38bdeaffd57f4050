//! Platform/backend resolution.
//!
//! Maps a target platform (and an optional explicit backend) to the
//! capability definitions, search paths and libraries the runtime module
//! needs. Resolution is a pure function of its inputs: the same platform,
//! override and options always produce the same [`Resolution`].

pub mod errors;
pub mod manifest;

use std::path::PathBuf;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::backend::Backend;
use crate::core::capability::CapabilitySet;
use crate::core::platform::Platform;
use crate::core::surface::{
    CompileRequirements, Define, Definition, DefinitionScope, LinkRequirements, ModuleDependency,
};
use crate::util::hash::Fingerprint;

pub use errors::ResolveError;

/// First engine version with per-module private definitions.
pub const PRIVATE_DEFINITIONS_SINCE: Version = Version::new(4, 19, 0);

/// How third-party binary trees are laid out under `ThirdParty/Lib`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryLayout {
    /// `Lib/Win64`, `Lib/XboxOne`, ...
    #[default]
    Platform,
    /// `Lib/Win32`, `Lib/x64`
    Architecture,
    /// `Lib/address-model-32`, `Lib/address-model-64`
    AddressModel,
}

impl LibraryLayout {
    /// Directory fragment for a platform, `None` when nothing is linked.
    ///
    /// `Other` stands for every platform without a native SDK, so there is
    /// no single `Lib/<platform>` directory to name. It links no libraries
    /// under any backend and gets no library dir at all.
    pub fn fragment(&self, platform: Platform) -> Option<String> {
        let arch = platform.architecture()?;
        Some(match self {
            LibraryLayout::Platform => platform.as_str().to_string(),
            LibraryLayout::Architecture => arch.vs_fragment().to_string(),
            LibraryLayout::AddressModel => arch.address_model().to_string(),
        })
    }
}

impl std::str::FromStr for LibraryLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "platform" => Ok(LibraryLayout::Platform),
            "architecture" | "arch" => Ok(LibraryLayout::Architecture),
            "address-model" => Ok(LibraryLayout::AddressModel),
            _ => Err(format!(
                "invalid library layout '{}', valid values: platform, architecture, address-model",
                s
            )),
        }
    }
}

/// Static inputs shared by every resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Third-party root containing `Include/` and `Lib/`
    pub third_party: PathBuf,

    pub layout: LibraryLayout,

    /// Engine version; decides definition visibility
    pub engine_version: Version,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions {
            third_party: PathBuf::from("ThirdParty"),
            layout: LibraryLayout::Platform,
            engine_version: PRIVATE_DEFINITIONS_SINCE,
        }
    }
}

impl ResolverOptions {
    /// Visibility of definitions for the configured engine.
    pub fn definition_scope(&self) -> DefinitionScope {
        if self.engine_version >= PRIVATE_DEFINITIONS_SINCE {
            DefinitionScope::Private
        } else {
            DefinitionScope::Public
        }
    }
}

/// Everything the build/link stage needs for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub platform: Platform,
    pub backend: Backend,
    pub capabilities: CapabilitySet,
    pub compile: CompileRequirements,
    pub link: LinkRequirements,
    pub module_dependencies: Vec<ModuleDependency>,

    /// Disagreements between an explicit backend and the platform
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Resolution {
    /// Whether browser-based OAuth login is compiled in.
    pub fn oauth(&self) -> bool {
        self.capabilities.oauth
    }

    /// All defines regardless of scope, in emission order.
    pub fn defines(&self) -> Vec<&Define> {
        self.compile.definitions.iter().map(|d| &d.define).collect()
    }

    /// Library file names in link order.
    pub fn library_names(&self) -> Vec<&str> {
        self.link.lib_names()
    }

    /// Check whether an engine module dependency is required.
    pub fn requires_module(&self, name: &str) -> bool {
        self.module_dependencies.iter().any(|m| m.name == name)
    }

    /// Stable fingerprint of the resolution.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();

        fp.field("platform", self.platform.as_str())
            .field("backend", self.backend.as_str())
            .flag("oauth", self.capabilities.oauth);

        for def in &self.compile.definitions {
            let label = match def.scope {
                DefinitionScope::Private => "private",
                DefinitionScope::Public => "public",
            };
            fp.field(label, &def.define.to_string());
        }
        for dir in &self.compile.include_dirs {
            fp.field("include", &dir.to_string_lossy());
        }
        for dir in &self.link.lib_dirs {
            fp.field("libdir", &dir.to_string_lossy());
        }
        for lib in &self.link.libs {
            fp.field("lib", &lib.path().to_string_lossy());
        }
        fp.fields(
            "module",
            self.module_dependencies.iter().map(|m| m.name.as_str()),
        );

        fp.finish_short()
    }
}

/// Resolves platforms against a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Resolver { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Backend the platform selects when nothing is requested.
    pub fn default_backend(platform: Platform) -> Backend {
        if platform.has_native_sdk() {
            Backend::NativeClientV1
        } else {
            Backend::NullBackend
        }
    }

    /// Resolve a platform, honouring an explicit backend where possible.
    pub fn resolve(&self, platform: Platform, requested: Option<Backend>) -> Resolution {
        let mut warnings = Vec::new();
        let backend = select_backend(platform, requested, &mut warnings);
        let capabilities = CapabilitySet::new(platform.supports_oauth(), backend);

        let scope = self.options.definition_scope();
        let mut definitions = Vec::with_capacity(1 + Backend::ALL.len());
        // UWP rules always published OAuth support as a public definition.
        let oauth_scope = if platform.is_uwp() {
            DefinitionScope::Public
        } else {
            scope
        };
        definitions.push(Definition::new(capabilities.oauth_define(), oauth_scope));
        definitions.extend(
            capabilities
                .backend_defines()
                .into_iter()
                .map(|d| Definition::new(d, scope)),
        );

        let include_root = self.options.third_party.join("Include");
        let mut include_dirs = vec![include_root.clone()];
        if let Some(subdir) = backend.include_subdir() {
            include_dirs.push(include_root.join(subdir));
        }

        let mut link = LinkRequirements::default();
        if let Some(fragment) = self.options.layout.fragment(platform) {
            let lib_dir = self.options.third_party.join("Lib").join(fragment);
            link.libs = manifest::libraries(platform, backend, &lib_dir);
            link.lib_dirs.push(lib_dir);
        }

        tracing::debug!(
            platform = %platform,
            backend = %backend,
            libs = link.libs.len(),
            "resolved platform"
        );

        Resolution {
            platform,
            backend,
            capabilities,
            compile: CompileRequirements {
                include_dirs,
                definitions,
            },
            link,
            module_dependencies: manifest::module_dependencies(platform),
            warnings,
        }
    }
}

fn select_backend(
    platform: Platform,
    requested: Option<Backend>,
    warnings: &mut Vec<String>,
) -> Backend {
    let default = Resolver::default_backend(platform);
    let Some(requested) = requested else {
        return default;
    };

    if requested.is_native() && !platform.has_native_sdk() {
        tracing::debug!(
            "backend `{}` is not available on {}, using `{}`",
            requested,
            platform,
            Backend::NullBackend
        );
        warnings.push(format!(
            "backend `{}` is not available on {}; falling back to `{}`",
            requested,
            platform,
            Backend::NullBackend
        ));
        return Backend::NullBackend;
    }

    if requested == Backend::NativeClientV2 {
        warnings.push(format!(
            "backend `{}` has no prebuilt libraries; only headers are wired",
            requested
        ));
    } else if requested != default {
        tracing::debug!(
            "backend `{}` overrides platform default `{}` on {}",
            requested,
            default,
            platform
        );
        warnings.push(format!(
            "backend `{}` overrides the {} default `{}`",
            requested, platform, default
        ));
    }

    requested
}

/// Resolve a platform with default options.
pub fn resolve(platform: Platform, requested: Option<Backend>) -> Resolution {
    Resolver::default().resolve(platform, requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::capability::OAUTH_DEFINE;
    use pretty_assertions::assert_eq;

    fn backend_flag_sum(resolution: &Resolution) -> u32 {
        Backend::ALL
            .iter()
            .map(|b| resolution.capabilities.get(b.define_name()).unwrap())
            .sum()
    }

    #[test]
    fn test_win64_scenario() {
        let r = resolve(Platform::Win64, None);

        assert_eq!(r.backend, Backend::NativeClientV1);
        assert!(r.oauth());
        assert!(r.capabilities.is_set(OAUTH_DEFINE));
        assert!(r.capabilities.is_set("MIXER_BACKEND_INTERACTIVE_CPP"));
        assert_eq!(
            r.library_names(),
            vec![
                "Interactivity.Win32.Cpp.lib",
                "cpprest140_2_9.lib",
                "winhttp.lib",
                "crypt32.lib",
                "bcrypt.lib",
            ]
        );
        assert_eq!(r.link.lib_dirs, vec![PathBuf::from("ThirdParty/Lib/Win64")]);
        assert!(r.requires_module("WebBrowser"));
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_xbox_scenario() {
        let r = resolve(Platform::XboxOne, None);

        assert_eq!(r.backend, Backend::NativeClientV1);
        assert!(!r.oauth());
        assert_eq!(
            r.library_names(),
            vec!["Interactivity.Xbox.Cpp.lib", "casablanca140.xbox.lib"]
        );
        assert!(r.module_dependencies.is_empty());
    }

    #[test]
    fn test_other_scenario() {
        let r = resolve(Platform::Other, None);

        assert_eq!(r.backend, Backend::NullBackend);
        assert!(!r.oauth());
        assert!(r.capabilities.is_set("MIXER_BACKEND_NULL"));
        assert!(r.library_names().is_empty());
        assert!(r.link.lib_dirs.is_empty());
        assert_eq!(r.compile.include_dirs, vec![PathBuf::from("ThirdParty/Include")]);
    }

    #[test]
    fn test_other_has_no_library_dir_in_any_layout() {
        for layout in [
            LibraryLayout::Platform,
            LibraryLayout::Architecture,
            LibraryLayout::AddressModel,
        ] {
            assert_eq!(layout.fragment(Platform::Other), None);

            let resolver = Resolver::new(ResolverOptions {
                layout,
                ..Default::default()
            });
            for backend in Backend::ALL {
                let r = resolver.resolve(Platform::Other, Some(backend));
                assert!(r.link.is_empty(), "{backend}");
            }
        }
    }

    #[test]
    fn test_oauth_only_on_windows_desktop() {
        for platform in Platform::ALL {
            let r = resolve(platform, None);
            assert_eq!(r.oauth(), platform.is_windows_desktop(), "{platform}");
        }
    }

    #[test]
    fn test_backend_flags_sum_to_one() {
        for platform in Platform::ALL {
            for requested in std::iter::once(None).chain(Backend::ALL.map(Some)) {
                let r = resolve(platform, requested);
                assert_eq!(backend_flag_sum(&r), 1, "{platform} {requested:?}");
            }
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for platform in Platform::ALL {
            let a = resolve(platform, None);
            let b = resolve(platform, None);
            assert_eq!(a, b);
            assert_eq!(a.fingerprint(), b.fingerprint());
        }
    }

    #[test]
    fn test_uwp_requires_online_subsystem_utils() {
        for platform in [Platform::Uwp32, Platform::Uwp64] {
            let r = resolve(platform, None);
            assert!(r.requires_module("OnlineSubsystemUtils"));
            assert_eq!(
                r.library_names(),
                vec!["Interactivity.UWP.Cpp.lib", "cpprest140_uwp_2_9.lib"]
            );
        }
        for platform in [Platform::Win32, Platform::Win64] {
            assert!(!resolve(platform, None).requires_module("OnlineSubsystemUtils"));
        }
    }

    #[test]
    fn test_uwp_oauth_definition_is_public() {
        let r = resolve(Platform::Uwp64, None);
        let oauth = &r.compile.definitions[0];
        assert_eq!(oauth.define.name(), OAUTH_DEFINE);
        assert_eq!(oauth.scope, DefinitionScope::Public);
        assert!(r.compile.definitions[1..]
            .iter()
            .all(|d| d.scope == DefinitionScope::Private));
    }

    #[test]
    fn test_legacy_engine_uses_public_definitions() {
        let resolver = Resolver::new(ResolverOptions {
            engine_version: Version::new(4, 18, 3),
            ..Default::default()
        });
        let r = resolver.resolve(Platform::Win64, None);
        assert!(r
            .compile
            .definitions
            .iter()
            .all(|d| d.scope == DefinitionScope::Public));
    }

    #[test]
    fn test_native_override_on_other_degrades_to_null() {
        let r = resolve(Platform::Other, Some(Backend::NativeClientV1));
        assert_eq!(r.backend, Backend::NullBackend);
        assert!(r.library_names().is_empty());
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_null_override_on_windows() {
        let r = resolve(Platform::Win64, Some(Backend::NullBackend));
        assert_eq!(r.backend, Backend::NullBackend);
        assert!(r.oauth());
        assert!(r.library_names().is_empty());
        assert_eq!(r.compile.include_dirs.len(), 1);
        assert!(r.requires_module("WebBrowser"));
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_v2_override_wires_headers_only() {
        let r = resolve(Platform::Win64, Some(Backend::NativeClientV2));
        assert_eq!(r.backend, Backend::NativeClientV2);
        assert!(r.capabilities.is_set("MIXER_BACKEND_INTERACTIVE_CPP_2"));
        assert!(r.library_names().is_empty());
        assert_eq!(
            r.compile.include_dirs.last(),
            Some(&PathBuf::from("ThirdParty/Include/interactive-cpp-v2"))
        );
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_matching_override_is_silent() {
        let r = resolve(Platform::XboxOne, Some(Backend::NativeClientV1));
        assert!(r.warnings.is_empty());
        assert_eq!(r, resolve(Platform::XboxOne, None));
    }

    #[test]
    fn test_library_layouts() {
        assert_eq!(
            LibraryLayout::Architecture.fragment(Platform::Uwp32).as_deref(),
            Some("Win32")
        );
        assert_eq!(
            LibraryLayout::Architecture.fragment(Platform::XboxOne).as_deref(),
            Some("x64")
        );
        assert_eq!(
            LibraryLayout::AddressModel.fragment(Platform::Win64).as_deref(),
            Some("address-model-64")
        );
        assert_eq!(LibraryLayout::Platform.fragment(Platform::Other), None);

        let resolver = Resolver::new(ResolverOptions {
            third_party: PathBuf::from("/plugin/ThirdParty"),
            layout: LibraryLayout::Architecture,
            ..Default::default()
        });
        let r = resolver.resolve(Platform::Win32, None);
        assert_eq!(r.link.lib_dirs, vec![PathBuf::from("/plugin/ThirdParty/Lib/Win32")]);
        assert_eq!(
            r.link.libs[0].path(),
            PathBuf::from("/plugin/ThirdParty/Lib/Win32/Interactivity.Win32.Cpp.lib")
        );
    }

    #[test]
    fn test_fingerprint_differs_between_platforms() {
        assert_ne!(
            resolve(Platform::Win32, None).fingerprint(),
            resolve(Platform::Win64, None).fingerprint()
        );
    }
}
