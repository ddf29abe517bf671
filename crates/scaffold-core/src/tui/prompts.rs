//! Charm-style CLI prompts using cliclack

use crate::builder::{self, DryRunFs, LocalFs};
use crate::config::{ParseOverrides, ScaffoldConfig};
use crate::source::{expand_home, StructureLoader, StructureSource};
use crate::tree::{self, NormalizedEntry, ParseOptions};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Directory the project folder is created in
    pub base_dir: Option<PathBuf>,

    /// Project folder name
    pub name: Option<String>,

    /// Structure file path or URL
    pub structure: Option<String>,

    /// Parser settings overriding the settings file
    pub parse: ParseOverrides,

    /// Show what would be created without writing anything
    pub dry_run: bool,

    /// Explicit settings file
    pub config: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the create flow with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("Project Scaffold Tool")?;

    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Step 1: Settings
    let config = ScaffoldConfig::discover(args.config.as_deref(), &current_dir)?;
    let options = config.parse_options_with(&args.parse);

    // Step 2: Where and what
    let base_dir = select_base_dir(&config, &args, &current_dir)?;
    let project_name = select_project_name(&config, &args)?;
    let source = select_structure(&config, &args, &current_dir)?;

    // Step 3: Read and check the structure before touching the disk
    let entries = load_entries(&source, &options).await?;
    let project_root = base_dir.join(&project_name);

    // Step 4: Summary and confirmation
    show_summary(&project_root, &source, &entries)?;
    if !confirm(&args)? {
        cliclack::outro_cancel("Aborted.")?;
        return Ok(());
    }

    // Step 5: Create
    create_project(&project_root, &entries, args.dry_run)
}

/// Resolve user input to an absolute path
fn resolve_path(input: &str, current_dir: &Path) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed == "." {
        return current_dir.to_path_buf();
    }
    let path = expand_home(trimmed);
    if path.is_absolute() {
        path
    } else {
        current_dir.join(path)
    }
}

fn validate_project_name(name: &str) -> std::result::Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        Err("Project name cannot be empty")
    } else if name.contains(['/', '\\']) {
        Err("Project name cannot contain path separators")
    } else if name == "." || name == ".." {
        Err("Project name must be a folder name")
    } else {
        Ok(())
    }
}

fn select_base_dir(
    config: &ScaffoldConfig,
    args: &CreateArgs,
    current_dir: &Path,
) -> Result<PathBuf> {
    if let Some(dir) = &args.base_dir {
        let path = resolve_path(&dir.to_string_lossy(), current_dir);
        cliclack::log::info(format!("Using base directory: {}", path.display()))?;
        return Ok(path);
    }

    let default = config
        .base_dir
        .as_ref()
        .map(|dir| resolve_path(&dir.to_string_lossy(), current_dir))
        .unwrap_or_else(|| current_dir.join("projects"));

    if args.yes {
        cliclack::log::info(format!("Using base directory: {}", default.display()))?;
        return Ok(default);
    }

    let default_str = default.display().to_string();
    let input: String = cliclack::input("Where should the project be created?")
        .placeholder(&default_str)
        .default_input(&default_str)
        .interact()?;

    Ok(resolve_path(&input, current_dir))
}

/// Validated project name from a flag or the settings file
fn checked_project_name(name: &str) -> Result<String> {
    if let Err(reason) = validate_project_name(name) {
        anyhow::bail!("{}: '{}'", reason, name);
    }
    Ok(name.trim().to_string())
}

fn select_project_name(config: &ScaffoldConfig, args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.name {
        return checked_project_name(name);
    }

    if args.yes {
        return checked_project_name(&config.project_name);
    }

    let name: String = cliclack::input("Project name")
        .placeholder(&config.project_name)
        .default_input(&config.project_name)
        .validate(|input: &String| validate_project_name(input))
        .interact()?;

    Ok(name.trim().to_string())
}

fn select_structure(
    config: &ScaffoldConfig,
    args: &CreateArgs,
    current_dir: &Path,
) -> Result<StructureSource> {
    let input = match &args.structure {
        Some(structure) => structure.clone(),
        None => {
            let default = StructureSource::default_input(config.structure.as_deref());
            if args.yes {
                default
            } else {
                cliclack::input("Path to structure file")
                    .placeholder(&default)
                    .default_input(&default)
                    .interact()?
            }
        }
    };

    Ok(StructureSource::parse(&input, current_dir))
}

async fn load_entries(
    source: &StructureSource,
    options: &ParseOptions,
) -> Result<Vec<NormalizedEntry>> {
    let spinner = cliclack::spinner();
    spinner.start("Reading structure...");

    let lines = match StructureLoader::default().load(source).await {
        Ok(lines) => lines,
        Err(e) => {
            spinner.stop("Structure file not found");
            return Err(e.into());
        }
    };

    match tree::parse_lines(&lines, options) {
        Ok(entries) => {
            spinner.stop(format!("Read {} entries from {}", entries.len(), source));
            Ok(entries)
        }
        Err(e) => {
            spinner.stop("Structure file is malformed");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Fix the structure file and try again. Nothing was created.");
        }
    }
}

fn show_summary(
    project_root: &Path,
    source: &StructureSource,
    entries: &[NormalizedEntry],
) -> Result<()> {
    let dirs = entries.iter().filter(|e| e.is_dir()).count();
    cliclack::note(
        "Summary",
        format!(
            "Location : {}\nStructure: {}\nEntries  : {} directories, {} files",
            project_root.display(),
            source,
            dirs,
            entries.len() - dirs
        ),
    )?;

    // Existing content is kept; only missing entries are added
    if let Ok(existing) = std::fs::read_dir(project_root) {
        let count = existing.count();
        if count > 0 {
            cliclack::log::warning(format!(
                "Directory has {} existing items; only missing entries will be added",
                count
            ))?;
        }
    }

    Ok(())
}

fn confirm(args: &CreateArgs) -> Result<bool> {
    if args.yes {
        return Ok(true);
    }
    Ok(cliclack::confirm("Proceed?").initial_value(false).interact()?)
}

fn create_project(project_root: &Path, entries: &[NormalizedEntry], dry_run: bool) -> Result<()> {
    if dry_run {
        let mut fs = DryRunFs::new();
        let report = builder::build_project(project_root, entries, &mut fs)?;
        cliclack::log::info("Dry run: nothing was written")?;
        println!();
        print!("{}", builder::render_plan(project_root, fs.ops()));
        println!();
        cliclack::outro(builder::summarize_plan(&report))?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    match builder::build_project(project_root, entries, &mut LocalFs) {
        Ok(report) => {
            spinner.stop(format!("Created project in {}", project_root.display()));
            cliclack::log::success(builder::summarize(&report))?;
            cliclack::outro("Project created successfully!")?;
            Ok(())
        }
        Err(e) => {
            spinner.stop("Failed to create project");
            cliclack::log::error(format!("{}", e))?;
            Err(anyhow::Error::new(e)
                .context("Entries created before the failure were kept; re-running is safe"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path("", cwd), PathBuf::from("/work"));
        assert_eq!(resolve_path(".", cwd), PathBuf::from("/work"));
        assert_eq!(resolve_path("out", cwd), PathBuf::from("/work/out"));
        assert_eq!(resolve_path("/srv", cwd), PathBuf::from("/srv"));
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("app_new_project").is_ok());
        assert!(validate_project_name("  ").is_err());
        assert!(validate_project_name("a/b").is_err());
        assert!(validate_project_name("..").is_err());
    }

    #[test]
    fn test_configured_name_is_validated_with_yes() {
        let args = CreateArgs {
            yes: true,
            ..CreateArgs::default()
        };
        let config = ScaffoldConfig {
            project_name: "../x".to_string(),
            ..ScaffoldConfig::default()
        };
        assert!(select_project_name(&config, &args).is_err());

        let config = ScaffoldConfig {
            project_name: " demo ".to_string(),
            ..ScaffoldConfig::default()
        };
        assert_eq!(select_project_name(&config, &args).unwrap(), "demo");
    }
}
