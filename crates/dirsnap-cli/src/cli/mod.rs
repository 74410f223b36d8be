//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "dirsnap",
    bin_name = "dirsnap",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f4e6} Directory snapshot templates",
    long_about = "Dirsnap snapshots a directory tree into a named, reusable \
                  template archive and clones it back out later.",
    after_help = "EXAMPLES:\n\
        \x20 dirsnap snap   --name webapp          # snapshot the current directory\n\
        \x20 dirsnap create --name webapp          # clone it back out somewhere else\n\
        \x20 dirsnap list\n\
        \x20 dirsnap list --name webapp            # metadata + archive contents",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Snapshot a directory into a new template.
    #[command(
        visible_alias = "s",
        about = "Snapshot a directory into a new template",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap snap --name webapp\n\
            \x20 dirsnap snap --name webapp --path ~/work/webapp"
    )]
    Snap(SnapArgs),

    /// Clone a stored template into a directory.
    #[command(
        visible_alias = "c",
        about = "Clone a stored template into a directory",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap create --name webapp\n\
            \x20 dirsnap create --name webapp --path ./fresh-copy"
    )]
    Create(CreateArgs),

    /// Refresh an existing template from a directory.
    #[command(
        about = "Refresh an existing template from a directory",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap update --name webapp\n\
            \x20 dirsnap update --name webapp --path ~/work/webapp"
    )]
    Update(UpdateArgs),

    /// Delete a stored template.
    #[command(
        visible_alias = "rm",
        about = "Delete a stored template",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap delete --name webapp"
    )]
    Delete(DeleteArgs),

    /// List stored templates, or one template's contents.
    #[command(
        visible_alias = "ls",
        about = "List stored templates",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap list\n\
            \x20 dirsnap list --name webapp\n\
            \x20 dirsnap list --format json"
    )]
    List(ListArgs),

    /// Delete every stored template.
    #[command(
        about = "Delete every stored template",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap clear\n\
            \x20 dirsnap clear --yes   # skip the confirmation prompt"
    )]
    Clear(ClearArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 dirsnap completions bash > ~/.local/share/bash-completion/completions/dirsnap\n\
            \x20 dirsnap completions zsh  > ~/.zfunc/_dirsnap\n\
            \x20 dirsnap completions fish > ~/.config/fish/completions/dirsnap.fish"
    )]
    Completions(CompletionsArgs),
}

// ── snap ──────────────────────────────────────────────────────────────────────

/// Arguments for `dirsnap snap`.
#[derive(Debug, Args)]
pub struct SnapArgs {
    /// Name for the new template.  Trimmed and lowercased before use.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Name for the new template"
    )]
    pub name: String,

    /// Directory to snapshot.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to snapshot (default: current directory)"
    )]
    pub path: PathBuf,
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `dirsnap create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Name of the template to clone.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Name of the template to clone"
    )]
    pub name: String,

    /// Directory to clone into.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Destination directory (default: current directory)"
    )]
    pub path: PathBuf,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `dirsnap update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Name of the template to refresh.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Name of the template to refresh"
    )]
    pub name: String,

    /// Directory to re-snapshot.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        default_value = ".",
        help = "Directory to re-snapshot (default: current directory)"
    )]
    pub path: PathBuf,
}

// ── delete ────────────────────────────────────────────────────────────────────

/// Arguments for `dirsnap delete`.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Name of the template to delete.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Name of the template to delete"
    )]
    pub name: String,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `dirsnap list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show one template's metadata and archive contents instead of the
    /// full table.
    #[arg(
        short = 'n',
        long = "name",
        value_name = "NAME",
        help = "Show one template's metadata and contents"
    )]
    pub name: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── clear ─────────────────────────────────────────────────────────────────────

/// Arguments for `dirsnap clear`.
#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and delete immediately"
    )]
    pub yes: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `dirsnap completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
