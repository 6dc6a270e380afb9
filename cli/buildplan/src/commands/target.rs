//! `buildplan target` — target listing and description.

use anyhow::{bail, Result};

use buildplan_core::target_to_toml;

use crate::manifest::LoadedProject;

/// List all targets declared by the project.
pub fn list(project: &LoadedProject) -> Result<()> {
    if project.targets.is_empty() {
        println!("No targets declared.");
        return Ok(());
    }

    println!("Targets:");
    println!();
    for target in &project.targets {
        println!(
            "  {:<30} {:<8} {} module{}",
            target.name,
            target.kind.to_string(),
            target.extra_modules.len(),
            if target.extra_modules.len() == 1 { "" } else { "s" },
        );
    }
    println!();
    println!("Use 'buildplan target describe <name>' for details.");
    Ok(())
}

/// Describe a specific target in detail.
pub fn describe(project: &LoadedProject, name: &str, format: Option<&str>) -> Result<()> {
    let target = match project.target(name) {
        Some(t) => t,
        None => bail!("unknown target: '{name}'. Use 'buildplan target list' to see targets."),
    };

    if format == Some("toml") {
        print!("{}", target_to_toml(target)?);
        return Ok(());
    }

    println!("=== Target: {} ===", target.name);
    println!("Kind:     {}", target.kind);
    println!("Settings: {}", target.settings);
    println!("Modules:");
    for module in &target.extra_modules {
        println!("  {module}");
    }
    Ok(())
}
