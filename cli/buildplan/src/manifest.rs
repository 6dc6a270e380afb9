//! `buildplan.toml` manifest parsing and project loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use buildplan_core::{ModuleDescriptor, StaticRegistry, TargetDescriptor};

/// The top-level manifest structure for a buildplan project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Engine association and registry extensions.
    #[serde(default)]
    pub engine: Option<EngineConfig>,
    /// Directory layout overrides.
    #[serde(default)]
    pub layout: Option<LayoutConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Engine configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EngineConfig {
    /// Engine version the descriptors were authored against (e.g., "4.26").
    #[serde(default)]
    pub version: Option<String>,
    /// Extra subsystems available in this engine install, beyond the
    /// stock registry.
    #[serde(default)]
    pub extra_subsystems: Vec<String>,
}

/// Directory layout section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Directory holding `*.target.toml` files (default: `targets`).
    #[serde(default)]
    pub targets_dir: Option<String>,
    /// Directory holding `*.module.toml` files (default: `modules`).
    #[serde(default)]
    pub modules_dir: Option<String>,
}

impl ProjectManifest {
    /// Search upward from `start_dir` for a `buildplan.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("buildplan.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: ProjectManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing buildplan.toml")
    }

    /// The directory holding target descriptor files.
    pub fn targets_dir(&self, root: &Path) -> PathBuf {
        let dir = self
            .layout
            .as_ref()
            .and_then(|l| l.targets_dir.as_deref())
            .unwrap_or("targets");
        root.join(dir)
    }

    /// The directory holding module descriptor files.
    pub fn modules_dir(&self, root: &Path) -> PathBuf {
        let dir = self
            .layout
            .as_ref()
            .and_then(|l| l.modules_dir.as_deref())
            .unwrap_or("modules");
        root.join(dir)
    }

    /// Build the subsystem registry for this project: the stock engine set
    /// plus any extra subsystems the manifest declares.
    pub fn registry(&self) -> StaticRegistry {
        let mut registry = buildplan_core::EngineRegistry::builtin();
        if let Some(engine) = &self.engine {
            for name in &engine.extra_subsystems {
                registry.register(name.clone());
            }
        }
        registry
    }

    /// Generate the default template for `buildplan init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[engine]
version = "4.26"
"#
        )
    }
}

/// A fully loaded project: manifest plus every discovered descriptor.
#[derive(Debug)]
pub struct LoadedProject {
    /// The parsed manifest.
    pub manifest: ProjectManifest,
    /// Project root (the directory holding `buildplan.toml`).
    pub root: PathBuf,
    /// All target descriptors, sorted by name.
    pub targets: Vec<TargetDescriptor>,
    /// All module descriptors, sorted by name.
    pub modules: Vec<ModuleDescriptor>,
}

impl LoadedProject {
    /// Load every descriptor named by the manifest's layout.
    pub fn load(manifest: ProjectManifest, root: PathBuf) -> Result<Self> {
        let mut targets = Vec::new();
        for (_, path) in buildplan_core::discover_targets(&manifest.targets_dir(&root))? {
            let target = buildplan_core::load_target(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            targets.push(target);
        }

        let mut modules = Vec::new();
        for (_, path) in buildplan_core::discover_modules(&manifest.modules_dir(&root))? {
            let module = buildplan_core::load_module(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            modules.push(module);
        }

        Ok(LoadedProject {
            manifest,
            root,
            targets,
            modules,
        })
    }

    /// Find a target by name.
    pub fn target(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Find a module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Pick the target to resolve when none is named: the sole target if
    /// there is exactly one, otherwise the sole game target.
    pub fn default_target(&self) -> Option<&TargetDescriptor> {
        if self.targets.len() == 1 {
            return self.targets.first();
        }
        let mut games = self
            .targets
            .iter()
            .filter(|t| t.kind == buildplan_core::TargetKind::Game);
        match (games.next(), games.next()) {
            (Some(target), None) => Some(target),
            _ => None,
        }
    }
}
