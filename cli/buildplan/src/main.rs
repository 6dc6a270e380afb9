//! Buildplan CLI — authoring and checking build descriptors for game projects.

mod commands;
mod manifest;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};

use manifest::{LoadedProject, ProjectManifest};

#[derive(Parser)]
#[command(name = "buildplan", version, about = "Game build descriptor tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new buildplan project
    Init {
        /// Project name
        name: String,
    },
    /// Validate all descriptors and resolve all targets
    Check {
        /// Report format (human, json)
        #[arg(long)]
        report: Option<String>,
    },
    /// Resolve a target and print its module tree and link set
    Resolve {
        /// Target name (default: the project's sole game target)
        #[arg(long)]
        target: Option<String>,
        /// Output format (json)
        #[arg(long)]
        export: Option<String>,
    },
    /// Inspect target descriptors
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Inspect module descriptors
    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },
    /// Check project and descriptor status
    Doctor,
}

#[derive(Subcommand)]
enum TargetAction {
    /// List targets declared by the project
    List,
    /// Show details of a target
    Describe {
        /// Target name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
}

#[derive(Subcommand)]
enum ModuleAction {
    /// List modules declared by the project
    List,
    /// Show details of a module
    Describe {
        /// Module name
        name: String,
        /// Output format (default: human-readable, "toml" for TOML)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Check { report } => {
            let project = load_project_required(&cwd)?;
            commands::check::run(&project, report.as_deref())
        }

        Commands::Resolve { target, export } => {
            let project = load_project_required(&cwd)?;
            commands::resolve::run(&project, target.as_deref(), export.as_deref())
        }

        Commands::Target { action } => {
            let project = load_project_required(&cwd)?;
            match action {
                TargetAction::List => commands::target::list(&project),
                TargetAction::Describe { name, format } => {
                    commands::target::describe(&project, &name, format.as_deref())
                }
            }
        }

        Commands::Module { action } => {
            let project = load_project_required(&cwd)?;
            match action {
                ModuleAction::List => commands::module::list(&project),
                ModuleAction::Describe { name, format } => {
                    commands::module::describe(&project, &name, format.as_deref())
                }
            }
        }

        Commands::Doctor => commands::doctor::run(&cwd),
    }
}

/// Load the manifest and all descriptors, erroring if no project is found.
fn load_project_required(cwd: &Path) -> anyhow::Result<LoadedProject> {
    match ProjectManifest::find_and_load(cwd)? {
        Some((manifest, root)) => LoadedProject::load(manifest, root),
        None => anyhow::bail!("no buildplan.toml found (run 'buildplan init' first)"),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    fn load(project_path: &Path) -> LoadedProject {
        let (manifest, root) = ProjectManifest::find_and_load(project_path)
            .unwrap()
            .unwrap();
        LoadedProject::load(manifest, root).unwrap()
    }

    /// Full workflow: init → check → resolve both targets.
    #[test]
    fn init_check_resolve_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("workflow-test");

        // 1. Init
        commands::init::create_project(&project_path, "workflow-test").unwrap();
        assert!(project_path.join("buildplan.toml").is_file());

        // 2. Check — everything the scaffold generates must pass
        let project = load(&project_path);
        commands::check::run(&project, None).unwrap();

        // 3. Resolve — game and editor targets both resolve
        commands::resolve::run(&project, Some("workflow-test"), None).unwrap();
        commands::resolve::run(&project, Some("workflow-test-editor"), None).unwrap();
    }

    /// Check JSON report on a fresh project.
    #[test]
    fn check_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("json-test");
        commands::init::create_project(&project_path, "json-test").unwrap();

        let project = load(&project_path);
        commands::check::run(&project, Some("json")).unwrap();

        let report = commands::check::build_report(&project);
        assert!(report.ok);
        assert_eq!(report.targets.len(), 2);
    }

    /// A target with an empty module list blocks the check.
    #[test]
    fn check_fails_on_empty_target() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("empty-target");
        commands::init::create_project(&project_path, "empty-target").unwrap();

        std::fs::write(
            project_path.join("targets/empty-target.target.toml"),
            "name = \"empty-target\"\nkind = \"game\"\nextra-modules = []\n",
        )
        .unwrap();

        let project = load(&project_path);
        assert!(commands::check::run(&project, None).is_err());
    }

    /// A module depending on an unregistered name blocks the check.
    #[test]
    fn check_fails_on_unknown_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("bad-dep");
        commands::init::create_project(&project_path, "bad-dep").unwrap();

        std::fs::write(
            project_path.join("modules/bad-dep.module.toml"),
            "name = \"bad-dep\"\npublic-dependencies = [\"NonexistentModule\"]\n",
        )
        .unwrap();

        let project = load(&project_path);
        let report = commands::check::build_report(&project);
        assert!(!report.ok);
        assert!(report
            .targets
            .iter()
            .all(|t| t.error.as_deref().unwrap_or("").contains("NonexistentModule")));
    }

    /// Extra subsystems declared in the manifest extend the registry.
    #[test]
    fn manifest_extra_subsystems_resolve() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("extra-subsys");
        commands::init::create_project(&project_path, "extra-subsys").unwrap();

        std::fs::write(
            project_path.join("buildplan.toml"),
            "[project]\nname = \"extra-subsys\"\n\n[engine]\nextra-subsystems = [\"CustomPhysics\"]\n",
        )
        .unwrap();
        std::fs::write(
            project_path.join("modules/extra-subsys.module.toml"),
            "name = \"extra-subsys\"\npublic-dependencies = [\"Core\", \"CustomPhysics\"]\n",
        )
        .unwrap();

        let project = load(&project_path);
        let report = commands::check::build_report(&project);
        assert!(report.ok, "custom subsystem should resolve: {report:?}");
    }

    /// Target/module describe round-trips through files on disk.
    #[test]
    fn describe_scaffolded_descriptors() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("describe-test");
        commands::init::create_project(&project_path, "describe-test").unwrap();

        let project = load(&project_path);
        commands::target::describe(&project, "describe-test", Some("toml")).unwrap();
        commands::module::describe(&project, "describe-test", Some("toml")).unwrap();
    }

    /// Doctor runs cleanly on a scaffolded project.
    #[test]
    fn doctor_on_scaffold() {
        let dir = tempfile::tempdir().unwrap();
        let project_path = dir.path().join("doctor-scaffold");
        commands::init::create_project(&project_path, "doctor-scaffold").unwrap();

        commands::doctor::run(&project_path).unwrap();
    }
}
