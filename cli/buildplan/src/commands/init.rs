//! `buildplan init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use buildplan_core::{
    module_to_toml, target_to_toml, BuildSettingsVersion, ModuleDescriptor, PchMode,
    TargetDescriptor, TargetKind,
};

use crate::manifest::ProjectManifest;

/// Create a new buildplan project at the given path.
///
/// `name` is the project name. The directory `name` is created relative to cwd.
pub fn run(name: &str) -> Result<()> {
    let project_dir = Path::new(name);
    create_project(project_dir, name)
}

pub(crate) fn create_project(project_dir: &Path, name: &str) -> Result<()> {
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    // Create directory structure
    fs::create_dir_all(project_dir.join("targets")).context("creating targets/ directory")?;
    fs::create_dir_all(project_dir.join("modules")).context("creating modules/ directory")?;

    // Generate buildplan.toml
    let manifest_content = ProjectManifest::template(name);
    fs::write(project_dir.join("buildplan.toml"), &manifest_content)
        .context("writing buildplan.toml")?;

    // Game and editor targets, both pulling the project's one module
    let game = TargetDescriptor {
        name: name.to_string(),
        kind: TargetKind::Game,
        settings: BuildSettingsVersion::V2,
        extra_modules: vec![name.to_string()],
    };
    let editor_name = format!("{name}-editor");
    let editor = TargetDescriptor {
        name: editor_name.clone(),
        kind: TargetKind::Editor,
        settings: BuildSettingsVersion::V2,
        extra_modules: vec![name.to_string()],
    };
    write_target(project_dir, &game)?;
    write_target(project_dir, &editor)?;

    // One module with the stock dependency set
    let module = ModuleDescriptor {
        name: name.to_string(),
        pch: Some(PchMode::UseExplicitOrShared),
        public_dependencies: vec![
            "Core".to_string(),
            "CoreUObject".to_string(),
            "Engine".to_string(),
            "InputCore".to_string(),
            "HeadMountedDisplay".to_string(),
        ],
        editor_only: false,
    };
    let module_toml = module_to_toml(&module).context("serializing module descriptor")?;
    let module_path = format!("modules/{name}.module.toml");
    fs::write(project_dir.join(&module_path), module_toml)
        .with_context(|| format!("writing {module_path}"))?;

    // The host orchestrator drops build output under out/
    fs::write(project_dir.join(".gitignore"), "out/\n").context("writing .gitignore")?;

    println!("Created project '{name}'");
    println!("  {name}/buildplan.toml");
    println!("  {name}/targets/{name}.target.toml");
    println!("  {name}/targets/{editor_name}.target.toml");
    println!("  {name}/{module_path}");
    println!("  {name}/.gitignore");

    Ok(())
}

fn write_target(project_dir: &Path, target: &TargetDescriptor) -> Result<()> {
    let toml_str = target_to_toml(target).context("serializing target descriptor")?;
    let path = project_dir
        .join("targets")
        .join(format!("{}.target.toml", target.name));
    fs::write(&path, toml_str).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
