//! Engine subsystem registry.
//!
//! The real registry of compiled engine subsystems lives inside the host
//! build orchestrator, outside this project. Resolution therefore takes the
//! registry as an injected capability — the `ModuleRegistry` trait — rather
//! than a hard-coded table. `EngineRegistry::builtin()` carries the stock
//! subsystem set for a standard engine install; `StaticRegistry` lets a
//! custom install (or a test) supply its own.

use std::collections::BTreeMap;

/// Abstract lookup of engine subsystem modules.
pub trait ModuleRegistry {
    /// Whether a subsystem with this name is registered.
    fn contains(&self, name: &str) -> bool;

    /// Whether the named subsystem may only be linked into editor targets.
    /// Unknown names are not editor-only.
    fn editor_only(&self, name: &str) -> bool {
        let _ = name;
        false
    }

    /// All registered subsystem names, sorted.
    fn known_modules(&self) -> Vec<&str>;
}

/// An in-memory registry built from an explicit subsystem list.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    // name -> editor-only flag
    entries: BTreeMap<String, bool>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        StaticRegistry::default()
    }

    /// Register a runtime subsystem.
    pub fn register(&mut self, name: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), false);
        self
    }

    /// Register an editor-only subsystem.
    pub fn register_editor_only(&mut self, name: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), true);
        self
    }
}

impl ModuleRegistry for StaticRegistry {
    fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn editor_only(&self, name: &str) -> bool {
        self.entries.get(name).copied().unwrap_or(false)
    }

    fn known_modules(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

/// The stock subsystem set shipped with a standard engine install.
pub struct EngineRegistry;

impl EngineRegistry {
    /// Runtime subsystems available to any target kind.
    pub const RUNTIME: &'static [&'static str] = &[
        "AIModule",
        "ApplicationCore",
        "Core",
        "CoreUObject",
        "Engine",
        "HeadMountedDisplay",
        "InputCore",
        "NavigationSystem",
        "Projects",
        "RHI",
        "RenderCore",
        "Slate",
        "SlateCore",
        "UMG",
    ];

    /// Subsystems only present in editor builds.
    pub const EDITOR_ONLY: &'static [&'static str] = &[
        "EditorFramework",
        "EditorSubsystem",
        "PropertyEditor",
    ];

    /// Build the stock registry.
    pub fn builtin() -> StaticRegistry {
        let mut registry = StaticRegistry::new();
        for name in Self::RUNTIME {
            registry.register(*name);
        }
        for name in Self::EDITOR_ONLY {
            registry.register_editor_only(*name);
        }
        registry
    }
}
