//! Build-target and module descriptor model for game projects.
//!
//! Declarative configuration consumed by a host build orchestrator: target
//! descriptors name the buildable output variants (game, editor, client,
//! server) and the project modules compiled into them; module descriptors
//! declare each compiled unit's precompiled-header strategy and its public
//! dependency set on named engine subsystems.
//!
//! Everything is parse → validate → resolve, once, at configuration time.
//! Descriptors are immutable values; the engine subsystem registry the
//! names resolve against is injected through the [`ModuleRegistry`] trait
//! because the real registry belongs to the host toolchain.

pub mod error;
pub mod module;
pub mod parse;
pub mod registry;
pub mod resolve;
pub mod target;
pub mod tree;

// Re-exports for convenience.
pub use error::{DescriptorError, Result};
pub use module::{ModuleDescriptor, PchMode};
pub use parse::{
    discover_modules, discover_targets, load_module, load_target, module_to_toml,
    parse_module_toml, parse_target_toml, target_to_toml, validate_module, validate_target,
    ValidationIssue,
};
pub use registry::{EngineRegistry, ModuleRegistry, StaticRegistry};
pub use resolve::{resolve_target, DependencySource, ResolvedModule, ResolvedTarget};
pub use target::{BuildSettingsVersion, TargetDescriptor, TargetKind};
pub use tree::{format_link_set, format_tree};
