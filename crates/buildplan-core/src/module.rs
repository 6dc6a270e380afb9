//! Module descriptors.
//!
//! A module is one compiled unit: it declares a precompiled-header strategy
//! and a public dependency list on named engine subsystems (or other project
//! modules). Dependencies are weak references — names resolved later against
//! the host toolchain's registry, never owned here.

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, Result};

/// Precompiled-header strategy for a module.
///
/// A compilation-batching hint only: it constrains how the build tool
/// batches translation units and has no effect on program semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PchMode {
    /// No precompiled headers.
    None,
    /// Use the engine-wide shared PCH.
    UseShared,
    /// Use the module's explicit PCH if it has one, the shared PCH otherwise.
    UseExplicitOrShared,
}

impl std::fmt::Display for PchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PchMode::None => "none",
            PchMode::UseShared => "use-shared",
            PchMode::UseExplicitOrShared => "use-explicit-or-shared",
        };
        f.write_str(s)
    }
}

/// A module descriptor: one compiled unit's PCH strategy and public
/// dependency set.
///
/// Write-once at authoring time, read-only at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleDescriptor {
    /// Module name, unique within the project.
    pub name: String,
    /// PCH strategy. When absent the consuming target's build settings
    /// version supplies the default.
    #[serde(default)]
    pub pch: Option<PchMode>,
    /// Names of engine subsystems or project modules this module's public
    /// interface requires at compile/link time.
    #[serde(default)]
    pub public_dependencies: Vec<String>,
    /// Whether this module may only be linked into editor targets.
    #[serde(default)]
    pub editor_only: bool,
}

impl ModuleDescriptor {
    /// Check the descriptor's own invariants: a non-empty name, no
    /// self-reference, and no duplicated dependency entries.
    pub fn check(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(DescriptorError::Configuration {
                detail: "module name must not be empty".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for dep in &self.public_dependencies {
            if dep == &self.name {
                return Err(DescriptorError::Configuration {
                    detail: format!("module '{}' depends on itself", self.name),
                });
            }
            if !seen.insert(dep.as_str()) {
                return Err(DescriptorError::Configuration {
                    detail: format!(
                        "module '{}' lists dependency '{}' more than once",
                        self.name, dep
                    ),
                });
            }
        }

        Ok(())
    }
}
