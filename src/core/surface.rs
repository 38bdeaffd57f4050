//! Build surface - what the resolver hands to the build/link stage.
//!
//! A surface is split into compile-time requirements (include dirs and
//! definitions) and link-time requirements (library dirs and libraries).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Command-line flag dialect of the consuming toolchain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStyle {
    /// cl.exe / link.exe
    #[default]
    Msvc,
    /// gcc / clang
    Gnu,
}

impl std::str::FromStr for FlagStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "msvc" | "cl" => Ok(FlagStyle::Msvc),
            "gnu" | "gcc" | "clang" => Ok(FlagStyle::Gnu),
            _ => Err(format!("invalid flag style '{}', valid values: msvc, gnu", s)),
        }
    }
}

/// A preprocessor define.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Define {
    /// Simple flag: -DFOO
    Flag(String),
    /// Key-value: -DFOO=bar
    KeyValue { name: String, value: String },
}

impl Define {
    /// Create a simple flag define.
    pub fn flag(name: impl Into<String>) -> Self {
        Define::Flag(name.into())
    }

    /// Create a key-value define.
    pub fn key_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Define::KeyValue {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Get the define name.
    pub fn name(&self) -> &str {
        match self {
            Define::Flag(n) => n,
            Define::KeyValue { name, .. } => name,
        }
    }

    /// Get the define value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Define::Flag(_) => None,
            Define::KeyValue { value, .. } => Some(value),
        }
    }

    /// Convert to gcc/clang flag format.
    pub fn to_flag(&self) -> String {
        format!("-D{}", self)
    }

    /// Convert to a flag in the given dialect.
    pub fn to_flag_with(&self, style: FlagStyle) -> String {
        match style {
            FlagStyle::Msvc => format!("/D{}", self),
            FlagStyle::Gnu => self.to_flag(),
        }
    }
}

impl std::fmt::Display for Define {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Define::Flag(name) => write!(f, "{}", name),
            Define::KeyValue { name, value } => write!(f, "{}={}", name, value),
        }
    }
}

/// Where a definition is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionScope {
    /// Only the declaring module sees it
    Private,
    /// Propagates to dependent modules
    Public,
}

/// A define together with its visibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Definition {
    pub define: Define,
    pub scope: DefinitionScope,
}

impl Definition {
    pub fn new(define: Define, scope: DefinitionScope) -> Self {
        Definition { define, scope }
    }
}

/// A third-party library to link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LibraryRequirement {
    /// Directory the library is found in
    pub search_path: PathBuf,
    /// Library file name, e.g. `winhttp.lib`
    pub name: String,
}

impl LibraryRequirement {
    pub fn new(search_path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        LibraryRequirement {
            search_path: search_path.into(),
            name: name.into(),
        }
    }

    /// Library name without the `.lib` extension.
    pub fn stem(&self) -> &str {
        self.name.strip_suffix(".lib").unwrap_or(&self.name)
    }

    /// Full path of the library inside its search path.
    pub fn path(&self) -> PathBuf {
        self.search_path.join(&self.name)
    }

    /// Convert to a linker flag in the given dialect.
    pub fn to_flag(&self, style: FlagStyle) -> String {
        match style {
            FlagStyle::Msvc => self.name.clone(),
            FlagStyle::Gnu => format!("-l{}", self.stem()),
        }
    }
}

/// An engine module the plugin module must depend on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleDependency {
    pub name: String,
}

impl ModuleDependency {
    pub fn new(name: impl Into<String>) -> Self {
        ModuleDependency { name: name.into() }
    }
}

/// Compile-time requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileRequirements {
    /// Include directories (-I)
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// Preprocessor definitions (-D)
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl CompileRequirements {
    /// Merge another set of requirements into this one.
    pub fn merge(&mut self, other: &CompileRequirements) {
        self.include_dirs.extend(other.include_dirs.iter().cloned());
        self.definitions.extend(other.definitions.iter().cloned());
    }

    /// Definitions visible in the given scope.
    pub fn defines_in(&self, scope: DefinitionScope) -> impl Iterator<Item = &Define> {
        self.definitions
            .iter()
            .filter(move |d| d.scope == scope)
            .map(|d| &d.define)
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.include_dirs.is_empty() && self.definitions.is_empty()
    }
}

/// Link-time requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequirements {
    /// Library search directories (-L)
    #[serde(default)]
    pub lib_dirs: Vec<PathBuf>,

    /// Libraries to link, dependents before dependencies
    #[serde(default)]
    pub libs: Vec<LibraryRequirement>,
}

impl LinkRequirements {
    /// Merge another set of requirements into this one.
    pub fn merge(&mut self, other: &LinkRequirements) {
        self.lib_dirs.extend(other.lib_dirs.iter().cloned());
        self.libs.extend(other.libs.iter().cloned());
    }

    /// Library file names in link order.
    pub fn lib_names(&self) -> Vec<&str> {
        self.libs.iter().map(|l| l.name.as_str()).collect()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.lib_dirs.is_empty() && self.libs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_to_flag() {
        let d1 = Define::flag("DEBUG");
        assert_eq!(d1.to_flag(), "-DDEBUG");

        let d2 = Define::key_value("MIXER_BACKEND_NULL", "1");
        assert_eq!(d2.to_flag(), "-DMIXER_BACKEND_NULL=1");
        assert_eq!(d2.to_flag_with(FlagStyle::Msvc), "/DMIXER_BACKEND_NULL=1");
        assert_eq!(d2.value(), Some("1"));
    }

    #[test]
    fn test_library_to_flag() {
        let lib = LibraryRequirement::new("ThirdParty/Lib/Win64", "crypt32.lib");
        assert_eq!(lib.to_flag(FlagStyle::Msvc), "crypt32.lib");
        assert_eq!(lib.to_flag(FlagStyle::Gnu), "-lcrypt32");
        assert_eq!(lib.path(), PathBuf::from("ThirdParty/Lib/Win64/crypt32.lib"));
    }

    #[test]
    fn test_defines_in_scope() {
        let reqs = CompileRequirements {
            include_dirs: vec![],
            definitions: vec![
                Definition::new(Define::key_value("A", "1"), DefinitionScope::Private),
                Definition::new(Define::key_value("B", "0"), DefinitionScope::Public),
            ],
        };
        let private: Vec<_> = reqs.defines_in(DefinitionScope::Private).collect();
        assert_eq!(private.len(), 1);
        assert_eq!(private[0].name(), "A");
    }

    #[test]
    fn test_link_merge_preserves_order() {
        let mut a = LinkRequirements {
            lib_dirs: vec![],
            libs: vec![LibraryRequirement::new("x", "first.lib")],
        };
        let b = LinkRequirements {
            lib_dirs: vec![PathBuf::from("x")],
            libs: vec![LibraryRequirement::new("x", "second.lib")],
        };
        a.merge(&b);
        assert_eq!(a.lib_names(), vec!["first.lib", "second.lib"]);
        assert_eq!(a.lib_dirs.len(), 1);
    }
}
