//! `buildplan doctor` — project diagnostics.

use std::path::Path;

use anyhow::Result;

use buildplan_core::{resolve_target, ModuleRegistry};

use crate::manifest::{LoadedProject, ProjectManifest};

/// Print project diagnostic information.
pub fn run(start_dir: &Path) -> Result<()> {
    println!("=== Buildplan Doctor ===");
    println!();

    println!("Buildplan version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Project Status ---");
    let (manifest, root) = match ProjectManifest::find_and_load(start_dir) {
        Ok(Some(found)) => found,
        Ok(None) => {
            println!("  buildplan.toml: not found (run 'buildplan init' first)");
            return Ok(());
        }
        Err(e) => {
            println!("  buildplan.toml: error — {e}");
            return Ok(());
        }
    };

    println!("  buildplan.toml: found at {}", root.display());
    println!("  Project: {}", manifest.project.name);
    println!("  Version: {}", manifest.project.version);
    if let Some(engine) = &manifest.engine {
        if let Some(version) = &engine.version {
            println!("  Engine:  {version}");
        }
        if !engine.extra_subsystems.is_empty() {
            println!("  Extra subsystems: {}", engine.extra_subsystems.join(", "));
        }
    }
    println!();

    let registry = manifest.registry();
    println!("--- Registry ---");
    println!("  {} known engine subsystems", registry.known_modules().len());
    println!();

    println!("--- Descriptors ---");
    let project = match LoadedProject::load(manifest, root) {
        Ok(p) => p,
        Err(e) => {
            println!("  load error: {e:#}");
            return Ok(());
        }
    };
    println!(
        "  {} target(s), {} module(s) under {}",
        project.targets.len(),
        project.modules.len(),
        project.root.display()
    );
    println!();

    println!("--- Target Resolution ---");
    for target in &project.targets {
        match resolve_target(target, &project.modules, &registry) {
            Ok(resolved) => println!(
                "  {:<30} ok ({} modules, {} subsystems)",
                target.name,
                resolved.modules.len(),
                resolved.link_set.len()
            ),
            Err(e) => println!("  {:<30} error: {e}", target.name),
        }
    }

    Ok(())
}
