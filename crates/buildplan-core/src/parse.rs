//! TOML parsing, serialization, validation, and discovery for descriptors.
//!
//! Target descriptors are stored as `<name>.target.toml` and module
//! descriptors as `<name>.module.toml`. This module provides functions to
//! load, validate, serialize, and discover these files.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DescriptorError, Result};
use crate::module::ModuleDescriptor;
use crate::target::{BuildSettingsVersion, TargetDescriptor, TargetKind};

/// A validation issue found in a descriptor.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// The on-disk shape of a target descriptor. The settings version is kept
/// as a string here so an unrecognized value fails with
/// [`DescriptorError::UnsupportedVersion`] naming the version, not with a
/// deserialization detail.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawTarget {
    name: String,
    kind: TargetKind,
    #[serde(default)]
    settings: Option<String>,
    #[serde(default)]
    extra_modules: Vec<String>,
}

/// Parse a target descriptor from a TOML string.
pub fn parse_target_toml(toml_str: &str) -> Result<TargetDescriptor> {
    let raw: RawTarget = toml::from_str(toml_str)?;
    let settings = match raw.settings.as_deref() {
        Some(value) => BuildSettingsVersion::parse(value)?,
        None => BuildSettingsVersion::V2,
    };
    Ok(TargetDescriptor {
        name: raw.name,
        kind: raw.kind,
        settings,
        extra_modules: raw.extra_modules,
    })
}

/// Serialize a target descriptor to pretty TOML.
pub fn target_to_toml(target: &TargetDescriptor) -> Result<String> {
    let toml_str = toml::to_string_pretty(target)?;
    Ok(toml_str)
}

/// Parse a module descriptor from a TOML string.
pub fn parse_module_toml(toml_str: &str) -> Result<ModuleDescriptor> {
    let module: ModuleDescriptor = toml::from_str(toml_str)?;
    Ok(module)
}

/// Serialize a module descriptor to pretty TOML.
pub fn module_to_toml(module: &ModuleDescriptor) -> Result<String> {
    let toml_str = toml::to_string_pretty(module)?;
    Ok(toml_str)
}

/// Load a target descriptor from a `.target.toml` file.
pub fn load_target(path: &Path) -> Result<TargetDescriptor> {
    let content = read_descriptor(path)?;
    let target = parse_target_toml(&content)?;
    check_stem_matches(path, ".target.toml", &target.name)?;
    Ok(target)
}

/// Load a module descriptor from a `.module.toml` file.
pub fn load_module(path: &Path) -> Result<ModuleDescriptor> {
    let content = read_descriptor(path)?;
    let module = parse_module_toml(&content)?;
    check_stem_matches(path, ".module.toml", &module.name)?;
    Ok(module)
}

fn read_descriptor(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DescriptorError::NotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// The file stem must agree with the declared name so that discovery and
/// the descriptor itself can never disagree about identity.
fn check_stem_matches(path: &Path, suffix: &str, declared: &str) -> Result<()> {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return Ok(());
    };
    let Some(stem) = file_name.strip_suffix(suffix) else {
        return Ok(());
    };
    if stem != declared {
        return Err(DescriptorError::Configuration {
            detail: format!(
                "descriptor file '{file_name}' declares name '{declared}' (expected '{stem}')"
            ),
        });
    }
    Ok(())
}

/// Validate a target descriptor, collecting issues instead of failing on the
/// first one.
pub fn validate_target(target: &TargetDescriptor) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if target.name.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "target name must not be empty".into(),
        });
    }

    if target.extra_modules.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("target '{}' declares no modules", target.name),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for module in &target.extra_modules {
        if !seen.insert(module.as_str()) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "target '{}' lists module '{}' more than once",
                    target.name, module
                ),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate a module descriptor, collecting issues.
pub fn validate_module(module: &ModuleDescriptor) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if module.name.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "module name must not be empty".into(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for dep in &module.public_dependencies {
        if dep == &module.name {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("module '{}' depends on itself", module.name),
            });
        }
        if !seen.insert(dep.as_str()) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "module '{}' lists dependency '{}' more than once",
                    module.name, dep
                ),
            });
        }
    }

    if module.public_dependencies.is_empty() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!("module '{}' has no public dependencies", module.name),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Discover all `.target.toml` files in a directory.
///
/// Returns a list of (target_name, file_path) pairs sorted by name.
pub fn discover_targets(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    discover(dir, ".target.toml")
}

/// Discover all `.module.toml` files in a directory.
pub fn discover_modules(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    discover(dir, ".module.toml")
}

fn discover(dir: &Path, suffix: &str) -> Result<Vec<(String, PathBuf)>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if let Some(stem) = file_name.strip_suffix(suffix) {
                found.push((stem.to_string(), path));
            }
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
