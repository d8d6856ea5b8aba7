use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;
use walkdir::WalkDir;

use pbx_sdk::{is_xcodeproj, ObjectId, SdkConfig, SettingValue, Target, TargetKind, XcodeProj};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;
    match cli.command {
        Command::Targets(args) => cmd_targets(args, config, format),
        Command::Settings(args) => cmd_settings(args, config, format),
        Command::BundleId(args) => cmd_bundle_id(args, config, format),
        Command::Deps(args) => cmd_deps(args, config, format),
        Command::Path(args) => cmd_path(args, config, format),
        Command::Assets(args) => cmd_assets(args, config, format),
        Command::Find(args) => cmd_find(args, format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SdkConfig> {
    match path {
        Some(path) => SdkConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SdkConfig::default()),
    }
}

fn open(path: &Path, config: SdkConfig) -> anyhow::Result<XcodeProj> {
    XcodeProj::open_with_config(path, config)
        .with_context(|| format!("failed to open {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The requested configuration, or the target's default one.
fn target_configuration(
    project: &XcodeProj,
    target: &str,
    requested: Option<String>,
) -> anyhow::Result<String> {
    if let Some(name) = requested {
        return Ok(name);
    }
    let name = project.default_configuration_name(target)?;
    if name.is_empty() {
        bail!("target {target} has no default configuration; pass --configuration");
    }
    Ok(name.to_string())
}

fn kind_label(target: &Target) -> String {
    match &target.kind {
        TargetKind::Native(native) => match &native.product_type {
            Some(product_type) => format!("native, {product_type}"),
            None => "native".to_string(),
        },
        kind => kind.to_string(),
    }
}

fn cmd_targets(args: ProjectArgs, config: SdkConfig, format: OutputFormat) -> anyhow::Result<()> {
    let project = open(&args.project, config)?;
    let targets = project.targets();

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = targets
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "name": t.name,
                        "kind": t.kind.to_string(),
                        "dependencies": t.dependencies.len(),
                    })
                })
                .collect();
            print_json(&rows)
        }
        OutputFormat::Text => {
            println!(
                "{} {} ({} targets)",
                "Project".bold(),
                project.name().cyan(),
                targets.len()
            );
            for target in targets {
                println!(
                    "  {} {} {}",
                    target.id.short().yellow(),
                    target.name.bold(),
                    format!("[{}]", kind_label(target)).dimmed()
                );
            }
            Ok(())
        }
    }
}

fn cmd_settings(args: SettingsArgs, config: SdkConfig, format: OutputFormat) -> anyhow::Result<()> {
    let project = open(&args.project, config)?;

    let (owner, configuration, settings) = match &args.target {
        Some(target) => {
            let configuration = target_configuration(&project, target, args.configuration)?;
            let settings = project.target_build_settings(target, &configuration)?;
            (target.clone(), configuration, settings)
        }
        None => {
            let configuration = match args.configuration {
                Some(name) => name,
                None => project.project_default_configuration_name()?.to_string(),
            };
            if configuration.is_empty() {
                bail!("project has no default configuration; pass --configuration");
            }
            let settings = project.project_build_settings(&configuration)?;
            (project.name().to_string(), configuration, settings)
        }
    };

    if let Some(key) = &args.key {
        let Some(value) = project.expand_setting(settings, key)? else {
            bail!("{key} is not set for {owner} ({configuration})");
        };
        return match format {
            OutputFormat::Json => print_json(&json!({ "key": key, "value": value })),
            OutputFormat::Text => {
                println!("{value}");
                Ok(())
            }
        };
    }

    match format {
        OutputFormat::Json => print_json(settings),
        OutputFormat::Text => {
            println!(
                "{} {} ({})",
                "Settings".bold(),
                owner.cyan(),
                configuration.yellow()
            );
            for (key, value) in settings.iter() {
                match value {
                    SettingValue::Scalar(s) => println!("  {} = {}", key.bold(), s),
                    SettingValue::List(items) => {
                        println!("  {} = ({})", key.bold(), items.join(", "))
                    }
                }
            }
            Ok(())
        }
    }
}

fn cmd_bundle_id(args: TargetArgs, config: SdkConfig, format: OutputFormat) -> anyhow::Result<()> {
    let project = open(&args.project, config)?;
    let configuration = target_configuration(&project, &args.target, args.configuration)?;
    let bundle_id = project.target_bundle_id(&args.target, &configuration)?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "target": args.target,
            "configuration": configuration,
            "bundle_id": bundle_id,
        })),
        OutputFormat::Text => {
            println!("{bundle_id}");
            Ok(())
        }
    }
}

fn cmd_deps(args: DepsArgs, config: SdkConfig, format: OutputFormat) -> anyhow::Result<()> {
    let project = open(&args.project, config)?;
    let walk = project.dependency_walk(&args.target)?;

    match format {
        OutputFormat::Json => {
            let remote: Vec<_> = walk
                .remote
                .iter()
                .map(|proxy| {
                    json!({
                        "container_portal": proxy.container_portal,
                        "remote_global_id": proxy.remote_global_id,
                        "remote_info": proxy.remote_info,
                    })
                })
                .collect();
            print_json(&json!({
                "target": args.target,
                "dependencies": walk.names(),
                "remote": remote,
            }))
        }
        OutputFormat::Text => {
            if walk.targets.is_empty() && walk.remote.is_empty() {
                println!("{} has no dependencies", args.target.cyan());
                return Ok(());
            }
            println!("{} {}", "Dependencies of".bold(), args.target.cyan());
            for target in &walk.targets {
                println!("  {} {}", target.id.short().yellow(), target.name);
            }
            for proxy in &walk.remote {
                println!(
                    "  {} {} {}",
                    proxy.remote_global_id.short().yellow(),
                    proxy.remote_info.as_deref().unwrap_or("?"),
                    "(remote)".dimmed()
                );
            }
            Ok(())
        }
    }
}

fn cmd_path(args: PathArgs, config: SdkConfig, format: OutputFormat) -> anyhow::Result<()> {
    let project = open(&args.project, config)?;
    let file_ref = ObjectId::from(args.file_ref.as_str());
    let resolved = project.resolve_path(&file_ref)?;

    match format {
        OutputFormat::Json => print_json(&json!({ "file_ref": file_ref, "path": resolved })),
        OutputFormat::Text => {
            match resolved {
                Some(path) => println!("{}", path.display()),
                None => println!("{} {} is not under the main group", "!".yellow().bold(), file_ref),
            }
            Ok(())
        }
    }
}

fn cmd_assets(args: AssetsArgs, config: SdkConfig, format: OutputFormat) -> anyhow::Result<()> {
    let project = open(&args.project, config)?;
    let catalogs = project.asset_catalogs(args.resolve)?;

    match format {
        OutputFormat::Json => print_json(&catalogs),
        OutputFormat::Text => {
            for (target, found) in &catalogs {
                println!("{} ({})", target.bold(), found.len());
                for catalog in found {
                    let location = match &catalog.resolved_path {
                        Some(path) => path.display().to_string(),
                        None => catalog.file_ref.path.clone(),
                    };
                    println!("  {} {}", catalog.file_ref.id.short().yellow(), location);
                }
            }
            Ok(())
        }
    }
}

fn cmd_find(args: FindArgs, format: OutputFormat) -> anyhow::Result<()> {
    let found = find_projects(&args.dir, args.max_depth)?;

    match format {
        OutputFormat::Json => print_json(&found),
        OutputFormat::Text => {
            if found.is_empty() {
                println!("No projects found under {}", args.dir.display());
            }
            for path in &found {
                println!("{} {}", "✓".green().bold(), path.display());
            }
            Ok(())
        }
    }
}

/// `.xcodeproj` bundles under `root`, sorted. Bundles are not descended into.
fn find_projects(root: &Path, max_depth: usize) -> anyhow::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut entries = WalkDir::new(root)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if entry.file_type().is_dir() && is_xcodeproj(entry.path()) {
            found.push(entry.into_path());
            entries.skip_current_dir();
        }
    }
    tracing::debug!(root = %root.display(), found = found.len(), "searched for projects");
    Ok(found)
}
