//! Plugin module rules.
//!
//! The interactivity plugin ships three modules: the runtime module, the
//! Blueprint node module and the editor module. Each declares the engine
//! modules it depends on. Only the runtime module carries third-party
//! wiring; the other two pick up the runtime module by name.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::core::surface::{CompileRequirements, LinkRequirements, ModuleDependency};
use crate::resolver::errors::ResolveError;
use crate::resolver::Resolution;

/// Name of the runtime module.
pub const RUNTIME_MODULE: &str = "MixerInteractivity";

/// Name of the Blueprint node module.
pub const BLUEPRINT_NODES_MODULE: &str = "MixerInteractivityBlueprintNodes";

/// Name of the editor module.
pub const EDITOR_MODULE: &str = "MixerInteractivityEditor";

/// Precompiled header mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PchUsage {
    #[default]
    UseExplicitOrSharedPCHs,
    UseSharedPCHs,
    NoSharedPCHs,
}

/// Declared build rules of one plugin module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRules {
    pub name: String,

    /// Modules linked privately
    pub private_dependencies: Vec<String>,

    /// Modules whose headers are needed but which are not linked
    pub private_include_path_modules: Vec<String>,

    pub pch_usage: PchUsage,

    /// C++ exceptions enabled
    #[serde(default)]
    pub enable_exceptions: bool,

    /// Excluded from unity builds
    #[serde(default)]
    pub faster_without_unity: bool,
}

impl ModuleRules {
    fn new(name: &str, deps: &[&str], include_path_modules: &[&str]) -> Self {
        ModuleRules {
            name: name.to_string(),
            private_dependencies: deps.iter().map(|s| s.to_string()).collect(),
            private_include_path_modules: include_path_modules
                .iter()
                .map(|s| s.to_string())
                .collect(),
            pch_usage: PchUsage::UseExplicitOrSharedPCHs,
            enable_exceptions: false,
            faster_without_unity: false,
        }
    }

    /// Check whether this module depends on another module by name.
    pub fn depends_on(&self, name: &str) -> bool {
        self.private_dependencies.iter().any(|d| d == name)
    }

    /// Apply a platform resolution to these rules.
    ///
    /// Only the runtime module receives third-party wiring.
    pub fn apply(&self, resolution: &Resolution) -> ResolvedModule {
        let mut rules = self.clone();
        let mut compile = CompileRequirements::default();
        let mut link = LinkRequirements::default();

        if self.name == RUNTIME_MODULE {
            for dep in &resolution.module_dependencies {
                if !rules.depends_on(&dep.name) {
                    rules.private_dependencies.push(dep.name.clone());
                }
            }
            compile.merge(&resolution.compile);
            link.merge(&resolution.link);
        }

        ResolvedModule {
            rules,
            compile,
            link,
        }
    }
}

/// Module rules with a platform resolution applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    pub rules: ModuleRules,
    pub compile: CompileRequirements,
    pub link: LinkRequirements,
}

impl ResolvedModule {
    /// Extra engine modules required on this platform.
    pub fn extra_dependencies(&self, base: &ModuleRules) -> Vec<ModuleDependency> {
        self.rules
            .private_dependencies
            .iter()
            .filter(|d| !base.depends_on(d))
            .map(ModuleDependency::new)
            .collect()
    }
}

/// The three modules of the interactivity plugin.
pub fn plugin_modules() -> Vec<ModuleRules> {
    let mut runtime = ModuleRules::new(
        RUNTIME_MODULE,
        &[
            "Core",
            "CoreUObject",
            "Engine",
            "HTTP",
            "Json",
            "JsonUtilities",
            "SlateCore",
            "Slate",
            "UMG",
            "WebSockets",
        ],
        &["Launch", "OnlineSubsystem"],
    );
    runtime.enable_exceptions = true;
    runtime.faster_without_unity = true;

    let blueprint_nodes = ModuleRules::new(
        BLUEPRINT_NODES_MODULE,
        &[
            "Core",
            "CoreUObject",
            "Engine",
            RUNTIME_MODULE,
            "SlateCore",
            "Slate",
            "BlueprintGraph",
            "UnrealEd",
            "GraphEditor",
            "InputCore",
            "KismetCompiler",
        ],
        &["Launch"],
    );

    let editor = ModuleRules::new(
        EDITOR_MODULE,
        &[
            "Core",
            "CoreUObject",
            "Engine",
            RUNTIME_MODULE,
            BLUEPRINT_NODES_MODULE,
            "PropertyEditor",
            "SlateCore",
            "Slate",
            "HTTP",
            "Json",
            "EditorStyle",
            "BlueprintGraph",
            "UnrealEd",
            "GraphEditor",
            "ContentBrowser",
            "InputCore",
            "KismetCompiler",
            "AssetTools",
            "Projects",
        ],
        &["Settings"],
    );

    vec![runtime, blueprint_nodes, editor]
}

/// Dependency graph between plugin modules.
///
/// Engine modules are not nodes; only edges between modules of the same
/// plugin are tracked.
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    graph: DiGraph<String, ()>,
    name_to_node: HashMap<String, NodeIndex>,
}

impl ModuleGraph {
    /// Build the graph for a set of modules.
    pub fn new(modules: &[ModuleRules]) -> Self {
        let mut graph = DiGraph::new();
        let mut name_to_node = HashMap::new();

        for module in modules {
            let node = graph.add_node(module.name.clone());
            name_to_node.insert(module.name.clone(), node);
        }

        // Edge dep -> dependent, so a topological walk yields dependencies first.
        for module in modules {
            let to = name_to_node[&module.name];
            for dep in &module.private_dependencies {
                if let Some(&from) = name_to_node.get(dep) {
                    if !graph.contains_edge(from, to) {
                        graph.add_edge(from, to, ());
                    }
                }
            }
        }

        ModuleGraph {
            graph,
            name_to_node,
        }
    }

    /// Module names with dependencies before dependents.
    pub fn load_order(&self) -> Result<Vec<String>, ResolveError> {
        toposort(&self.graph, None)
            .map(|nodes| nodes.into_iter().map(|n| self.graph[n].clone()).collect())
            .map_err(|cycle| ResolveError::ModuleCycle {
                module: self.graph[cycle.node_id()].clone(),
            })
    }

    /// Plugin modules that depend directly on `name`.
    pub fn dependents(&self, name: &str) -> Vec<String> {
        match self.name_to_node.get(name) {
            Some(&node) => {
                let mut names: Vec<_> = self
                    .graph
                    .neighbors(node)
                    .map(|n| self.graph[n].clone())
                    .collect();
                names.sort();
                names
            }
            None => Vec::new(),
        }
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
