//! `buildplan check` — validate and resolve every descriptor in the project.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use buildplan_core::{resolve_target, validate_module, validate_target};

use crate::manifest::LoadedProject;

/// Machine-readable check report.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckReport {
    /// Project name.
    pub project: String,
    /// One entry per descriptor validation issue.
    pub issues: Vec<ReportIssue>,
    /// One entry per target resolution.
    pub targets: Vec<TargetStatus>,
    /// Whether everything passed.
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportIssue {
    /// Which descriptor the issue belongs to.
    pub descriptor: String,
    /// "error" or "warning".
    pub severity: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TargetStatus {
    pub name: String,
    /// "ok" or "error".
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Validate every descriptor, resolve every target, and report.
pub fn run(project: &LoadedProject, report: Option<&str>) -> Result<()> {
    let report_json = match report {
        None | Some("human") => false,
        Some("json") => true,
        Some(other) => bail!("unknown report format: '{other}' (expected human or json)"),
    };

    let result = build_report(project);

    if report_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_human(&result);
    }

    if !result.ok {
        bail!("check failed for project '{}'", result.project);
    }
    Ok(())
}

pub(crate) fn build_report(project: &LoadedProject) -> CheckReport {
    let mut issues = Vec::new();

    if project.targets.is_empty() {
        issues.push(ReportIssue {
            descriptor: project.manifest.project.name.clone(),
            severity: "error".to_string(),
            message: "project declares no targets".to_string(),
        });
    }

    for target in &project.targets {
        if let Err(found) = validate_target(target) {
            for issue in found {
                issues.push(ReportIssue {
                    descriptor: format!("target '{}'", target.name),
                    severity: issue.severity.to_string(),
                    message: issue.message,
                });
            }
        }
    }

    for module in &project.modules {
        if let Err(found) = validate_module(module) {
            for issue in found {
                issues.push(ReportIssue {
                    descriptor: format!("module '{}'", module.name),
                    severity: issue.severity.to_string(),
                    message: issue.message,
                });
            }
        }
    }

    let registry = project.manifest.registry();
    let mut targets = Vec::new();
    for target in &project.targets {
        match resolve_target(target, &project.modules, &registry) {
            Ok(_) => targets.push(TargetStatus {
                name: target.name.clone(),
                status: "ok".to_string(),
                error: None,
            }),
            Err(e) => targets.push(TargetStatus {
                name: target.name.clone(),
                status: "error".to_string(),
                error: Some(e.to_string()),
            }),
        }
    }

    let ok = issues.iter().all(|i| i.severity != "error")
        && targets.iter().all(|t| t.status == "ok");

    CheckReport {
        project: project.manifest.project.name.clone(),
        issues,
        targets,
        ok,
    }
}

fn print_human(report: &CheckReport) {
    println!("=== Check: {} ===", report.project);
    println!();

    if !report.issues.is_empty() {
        println!("--- Descriptor Issues ---");
        for issue in &report.issues {
            println!("  [{}] {}: {}", issue.severity, issue.descriptor, issue.message);
        }
        println!();
    }

    println!("--- Targets ---");
    for target in &report.targets {
        match &target.error {
            None => println!("  {:<30} ok", target.name),
            Some(e) => println!("  {:<30} error: {e}", target.name),
        }
    }
    println!();

    if report.ok {
        println!("All descriptors valid, all targets resolve.");
    } else {
        println!("Check FAILED.");
    }
}
