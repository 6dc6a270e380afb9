//! Target resolution.
//!
//! Given a target descriptor, the project's module descriptors, and an
//! engine subsystem registry, produce the full set of modules to compile
//! and the deduplicated set of subsystem libraries to link. Everything is
//! resolved once, at configuration time; the output is immutable.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, Result};
use crate::module::{ModuleDescriptor, PchMode};
use crate::registry::ModuleRegistry;
use crate::target::{TargetDescriptor, TargetKind};

/// Where a dependency name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencySource {
    /// Another module descriptor in this project.
    Project,
    /// A subsystem registered with the host toolchain.
    Engine,
}

/// A resolved public dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    /// Dependency name.
    pub name: String,
    /// Where the name resolved to.
    pub source: DependencySource,
}

/// A project module as it will be compiled into a specific target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    /// Module name.
    pub name: String,
    /// Effective PCH mode after version defaulting.
    pub pch: PchMode,
    /// Resolved public dependencies, in declaration order.
    pub dependencies: Vec<ResolvedDependency>,
}

/// The result of resolving one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    /// Target name.
    pub name: String,
    /// Target kind.
    pub kind: TargetKind,
    /// All project modules compiled into this target, in dependency order:
    /// a module appears after every project module it depends on.
    pub modules: Vec<ResolvedModule>,
    /// Deduplicated, sorted set of engine subsystems to link.
    pub link_set: Vec<String>,
}

/// Resolve a target against the project's module descriptors and an engine
/// subsystem registry.
pub fn resolve_target(
    target: &TargetDescriptor,
    modules: &[ModuleDescriptor],
    registry: &dyn ModuleRegistry,
) -> Result<ResolvedTarget> {
    target.check()?;

    let by_name = index_modules(modules)?;

    let mut resolver = Resolver {
        target,
        by_name: &by_name,
        registry,
        resolved: Vec::new(),
        done: HashSet::new(),
        in_progress: Vec::new(),
        link_set: BTreeSet::new(),
    };

    for name in &target.extra_modules {
        if !by_name.contains_key(name.as_str()) {
            return Err(DescriptorError::Configuration {
                detail: format!(
                    "target '{}' references unknown module '{}'",
                    target.name, name
                ),
            });
        }
        resolver.visit(name)?;
    }

    Ok(ResolvedTarget {
        name: target.name.clone(),
        kind: target.kind,
        modules: resolver.resolved,
        link_set: resolver.link_set.into_iter().collect(),
    })
}

/// Index module descriptors by name, rejecting duplicate declarations.
///
/// The original material leaves conflicting duplicate declarations
/// unspecified; they are treated as a configuration error here.
fn index_modules<'a>(
    modules: &'a [ModuleDescriptor],
) -> Result<HashMap<&'a str, &'a ModuleDescriptor>> {
    let mut by_name = HashMap::new();
    for module in modules {
        module.check()?;
        if by_name.insert(module.name.as_str(), module).is_some() {
            return Err(DescriptorError::DuplicateModule {
                name: module.name.clone(),
            });
        }
    }
    Ok(by_name)
}

struct Resolver<'a> {
    target: &'a TargetDescriptor,
    by_name: &'a HashMap<&'a str, &'a ModuleDescriptor>,
    registry: &'a dyn ModuleRegistry,
    resolved: Vec<ResolvedModule>,
    done: HashSet<String>,
    in_progress: Vec<String>,
    link_set: BTreeSet<String>,
}

impl Resolver<'_> {
    /// Resolve one project module and, transitively, every project module
    /// reachable from it. Engine subsystem names land in the link set.
    fn visit(&mut self, name: &str) -> Result<()> {
        if self.done.contains(name) {
            return Ok(());
        }
        if self.in_progress.iter().any(|n| n == name) {
            return Err(DescriptorError::Configuration {
                detail: format!(
                    "dependency cycle between project modules: {} -> {}",
                    self.in_progress.join(" -> "),
                    name
                ),
            });
        }

        let module = self.by_name[name];
        self.check_editor_constraint(module)?;

        self.in_progress.push(name.to_string());

        let mut dependencies = Vec::new();
        for dep in &module.public_dependencies {
            let source = self.classify(module, dep)?;
            if source == DependencySource::Project {
                self.visit(dep)?;
            }
            dependencies.push(ResolvedDependency {
                name: dep.clone(),
                source,
            });
        }

        self.in_progress.pop();
        self.done.insert(name.to_string());
        self.resolved.push(ResolvedModule {
            name: module.name.clone(),
            pch: module.pch.unwrap_or(self.target.settings.default_pch_mode()),
            dependencies,
        });
        Ok(())
    }

    /// Resolve a dependency name: project modules shadow registry entries.
    fn classify(&mut self, module: &ModuleDescriptor, dep: &str) -> Result<DependencySource> {
        if self.by_name.contains_key(dep) {
            return Ok(DependencySource::Project);
        }
        if self.registry.contains(dep) {
            if self.registry.editor_only(dep) && !self.target.kind.allows_editor_modules() {
                return Err(DescriptorError::Configuration {
                    detail: format!(
                        "{} target '{}' links editor-only subsystem '{}' (via module '{}')",
                        self.target.kind, self.target.name, dep, module.name
                    ),
                });
            }
            self.link_set.insert(dep.to_string());
            return Ok(DependencySource::Engine);
        }
        Err(DescriptorError::UnknownDependency {
            module: module.name.clone(),
            dependency: dep.to_string(),
        })
    }

    fn check_editor_constraint(&self, module: &ModuleDescriptor) -> Result<()> {
        if module.editor_only && !self.target.kind.allows_editor_modules() {
            return Err(DescriptorError::Configuration {
                detail: format!(
                    "{} target '{}' includes editor-only module '{}'",
                    self.target.kind, self.target.name, module.name
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EngineRegistry;
    use crate::target::BuildSettingsVersion;

    fn target(name: &str, kind: TargetKind, modules: &[&str]) -> TargetDescriptor {
        TargetDescriptor {
            name: name.to_string(),
            kind,
            settings: BuildSettingsVersion::V2,
            extra_modules: modules.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn module(name: &str, deps: &[&str]) -> ModuleDescriptor {
        ModuleDescriptor {
            name: name.to_string(),
            pch: Some(PchMode::UseExplicitOrShared),
            public_dependencies: deps.iter().map(|d| d.to_string()).collect(),
            editor_only: false,
        }
    }

    fn survival_module() -> ModuleDescriptor {
        module(
            "TPSurvival",
            &["Core", "CoreUObject", "Engine", "InputCore", "HeadMountedDisplay"],
        )
    }

    #[test]
    fn game_target_resolves_with_stock_registry() {
        // Scenario: a game target pulling one module with the stock
        // engine dependency set resolves with zero errors.
        let target = target("tp-survival", TargetKind::Game, &["TPSurvival"]);
        let modules = vec![survival_module()];
        let registry = EngineRegistry::builtin();

        let resolved = resolve_target(&target, &modules, &registry).unwrap();
        assert_eq!(resolved.modules.len(), 1);
        assert_eq!(resolved.modules[0].name, "TPSurvival");
        assert_eq!(
            resolved.link_set,
            vec!["Core", "CoreUObject", "Engine", "HeadMountedDisplay", "InputCore"]
        );
    }

    #[test]
    fn empty_module_list_fails() {
        let target = target("empty", TargetKind::Game, &[]);
        let err = resolve_target(&target, &[], &EngineRegistry::builtin()).unwrap_err();
        assert!(matches!(err, DescriptorError::Configuration { .. }));
    }

    #[test]
    fn unknown_dependency_fails() {
        let target = target("tp-survival", TargetKind::Game, &["TPSurvival"]);
        let modules = vec![module("TPSurvival", &["Core", "NonexistentModule"])];
        let err = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap_err();
        match err {
            DescriptorError::UnknownDependency { module, dependency } => {
                assert_eq!(module, "TPSurvival");
                assert_eq!(dependency, "NonexistentModule");
            }
            other => panic!("expected UnknownDependency, got {other:?}"),
        }
    }

    #[test]
    fn editor_and_game_targets_share_module_resolution() {
        // Two targets naming the same module resolve to identical
        // ResolvedModule values — dependency data is never duplicated.
        let game = target("tp-survival", TargetKind::Game, &["TPSurvival"]);
        let editor = target("tp-survival-editor", TargetKind::Editor, &["TPSurvival"]);
        let modules = vec![survival_module()];
        let registry = EngineRegistry::builtin();

        let game_resolved = resolve_target(&game, &modules, &registry).unwrap();
        let editor_resolved = resolve_target(&editor, &modules, &registry).unwrap();
        assert_eq!(game_resolved.modules, editor_resolved.modules);
        assert_eq!(game_resolved.link_set, editor_resolved.link_set);
    }

    #[test]
    fn target_referencing_unknown_module_fails() {
        let target = target("tp-survival", TargetKind::Game, &["Missing"]);
        let err = resolve_target(&target, &[], &EngineRegistry::builtin()).unwrap_err();
        assert!(err.to_string().contains("unknown module 'Missing'"));
    }

    #[test]
    fn duplicate_module_declarations_fail() {
        let target = target("tp-survival", TargetKind::Game, &["TPSurvival"]);
        let modules = vec![survival_module(), module("TPSurvival", &["Core"])];
        let err = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap_err();
        assert!(matches!(err, DescriptorError::DuplicateModule { .. }));
    }

    #[test]
    fn game_target_rejects_editor_only_module() {
        let target = target("tp-survival", TargetKind::Game, &["LevelTools"]);
        let mut tools = module("LevelTools", &["Core"]);
        tools.editor_only = true;
        let err = resolve_target(&target, &[tools], &EngineRegistry::builtin()).unwrap_err();
        assert!(err.to_string().contains("editor-only module"));
    }

    #[test]
    fn editor_target_accepts_editor_only_module() {
        let target = target("tp-editor", TargetKind::Editor, &["LevelTools"]);
        let mut tools = module("LevelTools", &["Core", "PropertyEditor"]);
        tools.editor_only = true;
        let resolved = resolve_target(&target, &[tools], &EngineRegistry::builtin()).unwrap();
        assert!(resolved.link_set.contains(&"PropertyEditor".to_string()));
    }

    #[test]
    fn game_target_rejects_editor_only_subsystem() {
        let target = target("tp-survival", TargetKind::Game, &["TPSurvival"]);
        let modules = vec![module("TPSurvival", &["Core", "PropertyEditor"])];
        let err = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap_err();
        assert!(err.to_string().contains("editor-only subsystem"));
    }

    #[test]
    fn transitive_project_modules_are_included() {
        let target = target("tp-survival", TargetKind::Game, &["TPSurvival"]);
        let modules = vec![
            module("TPSurvival", &["Core", "SurvivalShared"]),
            module("SurvivalShared", &["Core", "Engine"]),
        ];
        let resolved = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap();

        let names: Vec<_> = resolved.modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["SurvivalShared", "TPSurvival"]);
        assert_eq!(resolved.link_set, vec!["Core", "Engine"]);
    }

    #[test]
    fn project_module_cycle_fails() {
        let target = target("tp-survival", TargetKind::Game, &["A"]);
        let modules = vec![module("A", &["B"]), module("B", &["A"])];
        let err = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn pch_mode_defaults_from_settings_version() {
        let mut v1_target = target("legacy", TargetKind::Game, &["M"]);
        v1_target.settings = BuildSettingsVersion::V1;
        let mut m = module("M", &["Core"]);
        m.pch = None;

        let resolved =
            resolve_target(&v1_target, std::slice::from_ref(&m), &EngineRegistry::builtin())
                .unwrap();
        assert_eq!(resolved.modules[0].pch, PchMode::UseShared);

        let v2_target = target("modern", TargetKind::Game, &["M"]);
        let resolved =
            resolve_target(&v2_target, std::slice::from_ref(&m), &EngineRegistry::builtin())
                .unwrap();
        assert_eq!(resolved.modules[0].pch, PchMode::UseExplicitOrShared);
    }

    #[test]
    fn explicit_pch_mode_wins_over_default() {
        let target = target("tp-survival", TargetKind::Game, &["M"]);
        let mut m = module("M", &["Core"]);
        m.pch = Some(PchMode::None);
        let resolved =
            resolve_target(&target, &[m], &EngineRegistry::builtin()).unwrap();
        assert_eq!(resolved.modules[0].pch, PchMode::None);
    }

    #[test]
    fn link_set_deduplicates_shared_subsystems() {
        let target = target("tp-survival", TargetKind::Game, &["A", "B"]);
        let modules = vec![module("A", &["Core", "Engine"]), module("B", &["Core"])];
        let resolved = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap();
        assert_eq!(resolved.link_set, vec!["Core", "Engine"]);
    }

    #[test]
    fn resolved_target_json_round_trips() {
        let target = target("tp-survival", TargetKind::Game, &["A"]);
        let modules = vec![module("A", &["Core", "B"]), module("B", &["Engine"])];
        let resolved = resolve_target(&target, &modules, &EngineRegistry::builtin()).unwrap();

        let json = serde_json::to_string(&resolved).unwrap();
        let parsed: ResolvedTarget = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resolved);
    }
}
