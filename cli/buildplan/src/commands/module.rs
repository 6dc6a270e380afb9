//! `buildplan module` — module listing and description.

use anyhow::{bail, Result};

use buildplan_core::module_to_toml;

use crate::manifest::LoadedProject;

/// List all modules declared by the project.
pub fn list(project: &LoadedProject) -> Result<()> {
    if project.modules.is_empty() {
        println!("No modules declared.");
        return Ok(());
    }

    println!("Modules:");
    println!();
    for module in &project.modules {
        let editor = if module.editor_only { " (editor-only)" } else { "" };
        println!(
            "  {:<30} {} public dependenc{}{editor}",
            module.name,
            module.public_dependencies.len(),
            if module.public_dependencies.len() == 1 { "y" } else { "ies" },
        );
    }
    println!();
    println!("Use 'buildplan module describe <name>' for details.");
    Ok(())
}

/// Describe a specific module in detail.
pub fn describe(project: &LoadedProject, name: &str, format: Option<&str>) -> Result<()> {
    let module = match project.module(name) {
        Some(m) => m,
        None => bail!("unknown module: '{name}'. Use 'buildplan module list' to see modules."),
    };

    if format == Some("toml") {
        print!("{}", module_to_toml(module)?);
        return Ok(());
    }

    println!("=== Module: {} ===", module.name);
    match module.pch {
        Some(mode) => println!("PCH mode:    {mode}"),
        None => println!("PCH mode:    (from target settings version)"),
    }
    println!("Editor-only: {}", module.editor_only);
    println!("Public dependencies:");
    for dep in &module.public_dependencies {
        println!("  {dep}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ProjectManifest;
    use buildplan_core::{ModuleDescriptor, PchMode};
    use std::path::PathBuf;

    fn project_with_module() -> LoadedProject {
        let manifest: ProjectManifest = toml::from_str("[project]\nname = \"tp\"\n").unwrap();
        LoadedProject {
            manifest,
            root: PathBuf::from("/p"),
            targets: Vec::new(),
            modules: vec![ModuleDescriptor {
                name: "TPSurvival".to_string(),
                pch: Some(PchMode::UseExplicitOrShared),
                public_dependencies: vec!["Core".to_string()],
                editor_only: false,
            }],
        }
    }

    #[test]
    fn list_succeeds() {
        list(&project_with_module()).unwrap();
    }

    #[test]
    fn describe_known_module() {
        describe(&project_with_module(), "TPSurvival", None).unwrap();
        describe(&project_with_module(), "TPSurvival", Some("toml")).unwrap();
    }

    #[test]
    fn describe_unknown_module() {
        assert!(describe(&project_with_module(), "nonexistent", None).is_err());
    }
}
