//! `buildplan resolve` — resolve one target and print its dependency tree.

use anyhow::{bail, Result};

use buildplan_core::{format_link_set, format_tree, resolve_target};

use crate::manifest::LoadedProject;

/// Resolve the named target (or the project's default) and print the
/// module tree plus the engine link set.
pub fn run(project: &LoadedProject, target_name: Option<&str>, export: Option<&str>) -> Result<()> {
    let target = match target_name {
        Some(name) => match project.target(name) {
            Some(t) => t,
            None => bail!(
                "unknown target: '{name}'. Use 'buildplan target list' to see available targets."
            ),
        },
        None => match project.default_target() {
            Some(t) => t,
            None => bail!(
                "no unambiguous default target; pass --target <name> (available: {})",
                project
                    .targets
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        },
    };

    let registry = project.manifest.registry();
    let resolved = resolve_target(target, &project.modules, &registry)?;

    match export {
        Some("json") => {
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Some(other) => bail!("unknown export format: '{other}' (expected json)"),
        None => {
            print!("{}", format_tree(&resolved));
            println!("Linked engine subsystems:");
            print!("{}", format_link_set(&resolved));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ProjectManifest;
    use buildplan_core::{
        BuildSettingsVersion, ModuleDescriptor, PchMode, TargetDescriptor, TargetKind,
    };
    use std::path::PathBuf;

    fn sample_project() -> LoadedProject {
        let manifest: ProjectManifest = toml::from_str("[project]\nname = \"tp\"\n").unwrap();
        let target = TargetDescriptor {
            name: "tp-survival".to_string(),
            kind: TargetKind::Game,
            settings: BuildSettingsVersion::V2,
            extra_modules: vec!["TPSurvival".to_string()],
        };
        let module = ModuleDescriptor {
            name: "TPSurvival".to_string(),
            pch: Some(PchMode::UseExplicitOrShared),
            public_dependencies: vec!["Core".to_string(), "Engine".to_string()],
            editor_only: false,
        };
        LoadedProject {
            manifest,
            root: PathBuf::from("/p"),
            targets: vec![target],
            modules: vec![module],
        }
    }

    #[test]
    fn resolve_default_target() {
        let project = sample_project();
        run(&project, None, None).unwrap();
    }

    #[test]
    fn resolve_named_target_json() {
        let project = sample_project();
        run(&project, Some("tp-survival"), Some("json")).unwrap();
    }

    #[test]
    fn resolve_unknown_target_fails() {
        let project = sample_project();
        let err = run(&project, Some("nope"), None).unwrap_err();
        assert!(err.to_string().contains("unknown target"));
    }

    #[test]
    fn resolve_unknown_export_format_fails() {
        let project = sample_project();
        let err = run(&project, None, Some("yaml")).unwrap_err();
        assert!(err.to_string().contains("unknown export format"));
    }
}
