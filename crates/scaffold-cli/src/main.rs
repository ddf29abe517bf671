//! Scaffold CLI - Generate project folders and files from a structure document

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use scaffold_core::config::{ParseOverrides, ScaffoldConfig};
use scaffold_core::tui::CreateArgs;
use scaffold_core::{IndentStyle, StructureSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scaffold")]
#[command(about = "Generate project folders and files from a structure document")]
#[command(version)]
pub struct Args {
    /// Increase log output (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from a structure file
    Create(CliCreateArgs),
    /// Show what a structure file would create without writing anything
    Preview(PreviewArgs),
}

/// Options for reading structure files, shared by all subcommands
#[derive(ClapArgs, Debug)]
pub struct ParseFlags {
    /// Indentation convention of the structure file
    #[arg(long, value_enum)]
    pub indent: Option<IndentStyle>,

    /// Spaces per nesting level for space-indented files
    #[arg(long = "indent-width")]
    pub indent_width: Option<usize>,

    /// Reject entries that skip nesting levels
    #[arg(long = "strict-depth")]
    pub strict_depth: bool,

    /// Treat `#` after whitespace as the start of a comment in entry names
    #[arg(long)]
    pub comments: bool,

    /// Settings file (defaults to ./scaffold.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Directory the project folder is created in
    #[arg(short, long = "base-dir")]
    pub base_dir: Option<PathBuf>,

    /// Project folder name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Structure file path or http(s) URL
    #[arg(short, long)]
    pub structure: Option<String>,

    #[command(flatten)]
    pub parse: ParseFlags,

    /// Show what would be created without writing anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<&ParseFlags> for ParseOverrides {
    fn from(flags: &ParseFlags) -> Self {
        ParseOverrides {
            indent: flags.indent,
            indent_width: flags.indent_width,
            strict_depth: flags.strict_depth,
            comments: flags.comments,
        }
    }
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            base_dir: args.base_dir,
            name: args.name,
            structure: args.structure,
            parse: (&args.parse).into(),
            dry_run: args.dry_run,
            config: args.parse.config,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct PreviewArgs {
    /// Structure file path or http(s) URL
    #[arg(short, long)]
    pub structure: Option<String>,

    /// Directory the preview is rooted at (defaults to the current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    #[command(flatten)]
    pub parse: ParseFlags,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

async fn run_preview(args: PreviewArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = ScaffoldConfig::discover(args.parse.config.as_deref(), &current_dir)?;

    let options = config.parse_options_with(&(&args.parse).into());

    let input = args
        .structure
        .unwrap_or_else(|| StructureSource::default_input(config.structure.as_deref()));
    let source = StructureSource::parse(&input, &current_dir);
    let root = args.root.unwrap_or(current_dir);

    scaffold_core::preview(&source, &root, &options).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = scaffold_core::run(create_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::Preview(preview_args)) => run_preview(preview_args).await,
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = scaffold_core::run(CreateArgs::default()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_flags_map_to_create_args() {
        let args = Args::parse_from([
            "scaffold",
            "create",
            "--base-dir",
            "out",
            "--name",
            "demo",
            "--indent",
            "spaces",
            "--indent-width",
            "2",
            "--strict-depth",
            "--comments",
            "--dry-run",
            "-y",
        ]);

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();

        assert_eq!(create.base_dir, Some(PathBuf::from("out")));
        assert_eq!(create.name.as_deref(), Some("demo"));
        assert_eq!(create.parse.indent, Some(IndentStyle::Spaces));
        assert_eq!(create.parse.indent_width, Some(2));
        assert!(create.parse.strict_depth);
        assert!(create.parse.comments);
        assert!(create.dry_run);
        assert!(create.yes);
    }

    #[test]
    fn test_no_subcommand_is_interactive_create() {
        let args = Args::parse_from(["scaffold", "-vv"]);
        assert!(args.command.is_none());
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_preview_flags() {
        let args = Args::parse_from([
            "scaffold",
            "preview",
            "--structure",
            "tree.txt",
            "--indent",
            "glyph",
        ]);
        let Some(Command::Preview(preview)) = args.command else {
            panic!("expected preview subcommand");
        };
        assert_eq!(preview.structure.as_deref(), Some("tree.txt"));
        assert_eq!(preview.parse.indent, Some(IndentStyle::Glyph));
        assert!(!preview.parse.comments);
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
