//! Target descriptors.
//!
//! A target is a named, buildable output variant — the shipping game
//! executable, the editor tooling build, or a dedicated client/server.
//! Each target declares which project modules are compiled into it; the
//! host build orchestrator resolves those names against module descriptors
//! and its own subsystem registry.

use serde::{Deserialize, Serialize};

use crate::error::{DescriptorError, Result};
use crate::module::PchMode;

/// The kind of buildable output a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    /// Shipping game executable.
    Game,
    /// Editor tooling build (superset of the game build).
    Editor,
    /// Networked client without embedded server.
    Client,
    /// Dedicated server without rendering.
    Server,
}

impl TargetKind {
    /// Whether editor-only modules may be linked into this target.
    pub fn allows_editor_modules(self) -> bool {
        matches!(self, TargetKind::Editor)
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TargetKind::Game => "game",
            TargetKind::Editor => "editor",
            TargetKind::Client => "client",
            TargetKind::Server => "server",
        };
        f.write_str(s)
    }
}

/// Build settings version. Selects the defaulting rules applied to module
/// descriptors consumed by this target.
///
/// A closed set: descriptor files carrying anything else fail with
/// [`DescriptorError::UnsupportedVersion`] rather than being treated as an
/// open-ended flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildSettingsVersion {
    #[serde(rename = "v1")]
    V1,
    #[serde(rename = "v2")]
    V2,
}

impl BuildSettingsVersion {
    /// Parse a version string, rejecting anything outside the supported set.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "v1" => Ok(BuildSettingsVersion::V1),
            "v2" => Ok(BuildSettingsVersion::V2),
            other => Err(DescriptorError::UnsupportedVersion {
                value: other.to_string(),
            }),
        }
    }

    /// The PCH mode applied to modules that do not declare one.
    pub fn default_pch_mode(self) -> PchMode {
        match self {
            BuildSettingsVersion::V1 => PchMode::UseShared,
            BuildSettingsVersion::V2 => PchMode::UseExplicitOrShared,
        }
    }
}

impl std::fmt::Display for BuildSettingsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildSettingsVersion::V1 => f.write_str("v1"),
            BuildSettingsVersion::V2 => f.write_str("v2"),
        }
    }
}

/// A target descriptor: one buildable output and the modules it pulls in.
///
/// Constructed once per build invocation from static source and immutable
/// thereafter. Pure declaration — no side effects, no state machine.
/// Parsing from TOML goes through [`crate::parse::parse_target_toml`] so the
/// settings version is checked against the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    /// Target name (the file stem of `<name>.target.toml`).
    pub name: String,
    /// What kind of output this target produces.
    pub kind: TargetKind,
    /// Build settings version selecting defaulting rules (default: v2).
    pub settings: BuildSettingsVersion,
    /// Ordered list of project modules compiled into this target.
    pub extra_modules: Vec<String>,
}

impl TargetDescriptor {
    /// Check the descriptor's own invariants: a buildable target names at
    /// least one module, and names no module twice.
    pub fn check(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(DescriptorError::Configuration {
                detail: "target name must not be empty".to_string(),
            });
        }

        if self.extra_modules.is_empty() {
            return Err(DescriptorError::Configuration {
                detail: format!("target '{}' declares no modules", self.name),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for module in &self.extra_modules {
            if !seen.insert(module.as_str()) {
                return Err(DescriptorError::Configuration {
                    detail: format!(
                        "target '{}' lists module '{}' more than once",
                        self.name, module
                    ),
                });
            }
        }

        Ok(())
    }
}
