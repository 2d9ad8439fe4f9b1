//! CLI argument definitions
//!
//! All Clap derive structs for `sceneschema` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Validate and inspect editable scene-item schemas.
#[derive(Parser, Debug)]
#[command(name = "sceneschema", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SCENESCHEMA_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate schema files.
    Validate(ValidateArgs),

    /// Look up item types, properties and defaults in a schema.
    Show(ShowArgs),

    /// Check a scene document's items against a schema.
    CheckScene(CheckSceneArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema files to validate.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Enable strict validation (warnings become errors).
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for `show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Schema file to read (defaults to the built-in schema).
    #[arg(short, long, env = "SCENESCHEMA_FILE")]
    pub schema: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// What to show.
    #[command(subcommand)]
    pub target: ShowTarget,
}

/// Lookups available through `show`.
#[derive(Subcommand, Debug)]
pub enum ShowTarget {
    /// List item types.
    Types,

    /// Show one item type definition.
    Item {
        /// Item type key.
        name: String,
    },

    /// Show one property definition.
    Property {
        /// Property name.
        name: String,
    },

    /// Show the merged defaults of an item type.
    Defaults {
        /// Item type key.
        item_type: String,
    },

    /// Show the edit widgets of an item type, in dialog order.
    Widgets {
        /// Item type key.
        item_type: String,
    },
}

/// Arguments for `check-scene`.
#[derive(Args, Debug)]
pub struct CheckSceneArgs {
    /// Scene document to check.
    pub scene: PathBuf,

    /// Schema file to check against (defaults to the built-in schema).
    #[arg(short, long, env = "SCENESCHEMA_FILE")]
    pub schema: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_files() {
        let result = Cli::try_parse_from(["sceneschema", "validate"]);
        assert!(result.is_err(), "Expected error for missing files");
    }

    #[test]
    fn test_validate_strict_json() {
        let cli = Cli::try_parse_from([
            "sceneschema",
            "validate",
            "--strict",
            "--format",
            "json",
            "a.yaml",
            "b.yaml",
        ])
        .unwrap();
        let Commands::Validate(args) = cli.command else {
            panic!("Expected ValidateArgs");
        };
        assert!(args.strict);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_show_defaults_target() {
        let cli = Cli::try_parse_from([
            "sceneschema",
            "show",
            "--schema",
            "items.yaml",
            "defaults",
            "circle",
        ])
        .unwrap();
        let Commands::Show(args) = cli.command else {
            panic!("Expected ShowArgs");
        };
        assert_eq!(args.schema, Some(PathBuf::from("items.yaml")));
        assert!(matches!(args.target, ShowTarget::Defaults { ref item_type } if item_type == "circle"));
    }

    #[test]
    fn test_show_requires_target() {
        assert!(Cli::try_parse_from(["sceneschema", "show"]).is_err());
    }

    #[test]
    fn test_check_scene_requires_scene() {
        assert!(Cli::try_parse_from(["sceneschema", "check-scene"]).is_err());
        assert!(Cli::try_parse_from(["sceneschema", "check-scene", "scene.yaml"]).is_ok());
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["sceneschema", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["sceneschema", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["sceneschema", "--color", variant, "show", "types"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["sceneschema", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::try_parse_from(["sceneschema", "-vvv", "show", "types"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["sceneschema", "--quiet", "show", "types"]).unwrap();
        assert!(cli.quiet);
    }
}
