//! Plugin module plan for a platform.

use std::fmt::Write as _;

use anyhow::Result;

use crate::core::module::{plugin_modules, ModuleGraph, ModuleRules, ResolvedModule};
use crate::resolver::Resolution;

/// Plugin modules in load order with the resolution applied.
pub fn module_plan(resolution: &Resolution) -> Result<Vec<ResolvedModule>> {
    plan_for(&plugin_modules(), resolution)
}

/// Plan for an arbitrary set of module rules.
pub fn plan_for(modules: &[ModuleRules], resolution: &Resolution) -> Result<Vec<ResolvedModule>> {
    let order = ModuleGraph::new(modules).load_order()?;

    Ok(order
        .iter()
        .filter_map(|name| modules.iter().find(|m| &m.name == name))
        .map(|m| m.apply(resolution))
        .collect())
}

/// Format a module plan for terminal output.
pub fn format_plan(plan: &[ResolvedModule]) -> String {
    let mut out = String::new();
    let base = plugin_modules();

    for (i, module) in plan.iter().enumerate() {
        let rules = &module.rules;
        let _ = writeln!(out, "{}. {}", i + 1, rules.name);
        let _ = writeln!(
            out,
            "   deps:     {}",
            rules.private_dependencies.join(", ")
        );
        if !rules.private_include_path_modules.is_empty() {
            let _ = writeln!(
                out,
                "   includes: {}",
                rules.private_include_path_modules.join(", ")
            );
        }

        if let Some(declared) = base.iter().find(|b| b.name == rules.name) {
            let extra = module.extra_dependencies(declared);
            if !extra.is_empty() {
                let names: Vec<_> = extra.iter().map(|d| d.name.as_str()).collect();
                let _ = writeln!(out, "   platform: {}", names.join(", "));
            }
        }

        let mut switches = vec![format!("{:?}", rules.pch_usage)];
        if rules.enable_exceptions {
            switches.push("exceptions".to_string());
        }
        if rules.faster_without_unity {
            switches.push("no-unity".to_string());
        }
        let _ = writeln!(out, "   switches: {}", switches.join(", "));

        if !module.link.libs.is_empty() {
            let _ = writeln!(out, "   libs:     {}", module.link.lib_names().join(", "));
        }
    }

    out
}
