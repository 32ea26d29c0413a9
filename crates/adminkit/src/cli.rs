//! Clap derive structures for the `adminkit` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// adminkit -- browse and edit any schema-described admin backend
#[derive(Debug, Parser)]
#[command(
    name = "adminkit",
    version,
    about = "Browse and edit records of a schema-described admin backend",
    long_about = "Generic admin client driven by the backend's OpenAPI document.\n\n\
        Lists and filters records, walks next/previous, creates, updates and\n\
        deletes them, and shows type definitions with their reference choices.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "ADMINKIT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'u', env = "ADMINKIT_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "ADMINKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the config file's `defaults.output`)
    #[arg(long, short = 'o', env = "ADMINKIT_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ADMINKIT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ADMINKIT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// Effective output format.
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the records of an endpoint
    #[command(alias = "ls")]
    List(ListArgs),

    /// Find records whose fields equal the given values
    Find(FindArgs),

    /// Show the record after (or before) a given one
    Next(NextArgs),

    /// Create a record, or update it when it carries an id
    #[command(alias = "save")]
    Upsert(UpsertArgs),

    /// Delete a record by id
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Inspect the backend's schema document
    Schema(SchemaArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Query Arguments ───────────────────────────────────────────

/// Query parameters and cache control shared by read commands.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Extra query parameter sent with the list request (key=value, repeatable)
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Bypass the cache and re-fetch the list
    #[arg(long, short = 'f')]
    pub force: bool,
}

// ── Record Commands ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection endpoint, e.g. /back/api/people/
    pub endpoint: String,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Debug, Args)]
pub struct FindArgs {
    /// Collection endpoint
    pub endpoint: String,

    /// Field condition (field=value, repeatable). Values are read as JSON
    /// when they parse, so `status=null` matches a null field.
    #[arg(long = "where", short = 'w', value_name = "FIELD=VALUE", required = true)]
    pub conditions: Vec<String>,

    /// Return every match instead of the first
    #[arg(long, short = 'a')]
    pub all: bool,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Debug, Args)]
pub struct NextArgs {
    /// Collection endpoint
    pub endpoint: String,

    /// Id of the current record (read as JSON when it parses)
    pub id: String,

    /// Go backwards instead
    #[arg(long)]
    pub previous: bool,

    /// Step size
    #[arg(long, default_value = "1")]
    pub step: usize,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Debug, Args)]
pub struct UpsertArgs {
    /// Collection endpoint
    pub endpoint: String,

    /// Record as inline JSON
    #[arg(long, short = 'd', conflicts_with = "from_file")]
    pub data: Option<String>,

    /// Record read from a JSON file
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Collection endpoint
    pub endpoint: String,

    /// Id of the record to delete (read as JSON when it parses)
    pub id: String,
}

// ── Schema ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub command: SchemaCommand,
}

#[derive(Debug, Subcommand)]
pub enum SchemaCommand {
    /// List every type name in the schema
    Types,

    /// Show a type definition, selected by name or by list endpoint
    #[command(alias = "def")]
    Type {
        /// Type name (omit when using --path)
        #[arg(required_unless_present = "path")]
        name: Option<String>,

        /// Select the type listed by this endpoint instead
        #[arg(long, conflicts_with = "name")]
        path: Option<String>,

        /// Attach choices to reference properties
        #[arg(long, short = 'r')]
        resolve: bool,

        /// How many levels of references to expand (implies --resolve)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Show the type name listed by an endpoint
    Name {
        /// Collection endpoint
        path: String,
    },

    /// Show the list endpoint of a type
    Path {
        /// Type name
        name: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Print the effective settings of the active profile
    Show,

    /// Create or replace a profile
    Init {
        /// Backend base URL
        #[arg(long)]
        url: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Make this the default profile
        #[arg(long)]
        set_default: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
