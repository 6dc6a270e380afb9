//! Dependency tree display.
//!
//! Formats a resolved target as a human-readable ASCII tree:
//! ```text
//! tp-survival (game)
//! └── TPSurvival [use-explicit-or-shared]
//!     ├── Core (engine)
//!     ├── CoreUObject (engine)
//!     ├── Engine (engine)
//!     ├── InputCore (engine)
//!     └── HeadMountedDisplay (engine)
//!
//! 1 module, 5 engine subsystems linked
//! ```

use crate::resolve::{DependencySource, ResolvedTarget};

/// Format a resolved target as a human-readable tree.
pub fn format_tree(resolved: &ResolvedTarget) -> String {
    let mut out = format!("{} ({})\n", resolved.name, resolved.kind);

    let count = resolved.modules.len();
    for (i, module) in resolved.modules.iter().enumerate() {
        let is_last = i == count - 1;
        let connector = if is_last { "└── " } else { "├── " };
        out.push_str(&format!("{connector}{} [{}]\n", module.name, module.pch));

        let child_prefix = if is_last { "    " } else { "│   " };
        let dep_count = module.dependencies.len();
        for (j, dep) in module.dependencies.iter().enumerate() {
            let dep_connector = if j == dep_count - 1 {
                "└── "
            } else {
                "├── "
            };
            let marker = match dep.source {
                DependencySource::Engine => " (engine)",
                DependencySource::Project => "",
            };
            out.push_str(&format!("{child_prefix}{dep_connector}{}{marker}\n", dep.name));
        }
    }

    // Summary line
    out.push_str(&format!(
        "\n{} module{}, {} engine subsystem{} linked\n",
        count,
        if count == 1 { "" } else { "s" },
        resolved.link_set.len(),
        if resolved.link_set.len() == 1 { "" } else { "s" },
    ));

    out
}

/// Format the flat link set, one subsystem per line.
pub fn format_link_set(resolved: &ResolvedTarget) -> String {
    let mut out = String::new();
    for name in &resolved.link_set {
        out.push_str(&format!("  {name}\n"));
    }
    out
}
