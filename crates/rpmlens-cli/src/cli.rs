use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rpmlens",
    about = "Query the content of RPM repository versions",
    arg_required_else_help = true
)]
pub struct Args {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results and log events as JSON
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use a different config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Repository versions to query.
#[derive(ClapArgs, Debug)]
pub struct VersionArgs {
    /// Repository version reference, e.g.
    /// /api/pulp/<domain>/api/v3/repositories/rpm/rpm/<uuid>/versions/<n>/
    #[arg(long = "version", value_name = "HREF", required = true)]
    pub versions: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search package names
    #[command(visible_alias = "search")]
    Packages {
        #[command(flatten)]
        versions: VersionArgs,

        /// Substring of the package name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Maximum number of results (0 for the default)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,
    },

    /// Search package groups
    Groups {
        #[command(flatten)]
        versions: VersionArgs,

        /// Substring of the group name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Maximum number of results (0 for the default)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,
    },

    /// Search package environments
    #[command(visible_alias = "envs")]
    Environments {
        #[command(flatten)]
        versions: VersionArgs,

        /// Substring of the environment name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Maximum number of results (0 for the default)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,
    },

    /// List packages page by page
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        versions: VersionArgs,

        /// Substring of the package name
        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Page size (0 for the default)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,

        /// Sort as field:direction (name, version, release, arch)
        #[arg(long)]
        sort_by: Option<String>,
    },

    /// List module streams
    Modules {
        #[command(flatten)]
        versions: VersionArgs,

        /// Keep streams providing this package (repeatable)
        #[arg(long = "rpm-name", value_name = "NAME")]
        rpm_names: Vec<String>,

        /// Substring of the module name
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort by name; contains "desc" for descending order
        #[arg(long, default_value = "")]
        sort_by: String,
    },

    /// List advisories page by page
    Errata {
        #[command(flatten)]
        versions: VersionArgs,

        /// Substring of the advisory id or summary
        #[arg(short, long, default_value = "")]
        search: String,

        /// Advisory type (repeatable); "other" matches unclassified advisories
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        types: Vec<String>,

        /// Severity (repeatable); "Unknown" matches unrated advisories
        #[arg(long = "severity", value_name = "SEVERITY")]
        severities: Vec<String>,

        #[arg(long, default_value_t = 0)]
        offset: i64,

        /// Page size (0 for the default)
        #[arg(short, long, default_value_t = 0)]
        limit: i64,

        /// Sort as field:direction (issued_date, updated_date, type, severity)
        #[arg(long)]
        sort_by: Option<String>,
    },

    /// Print the effective configuration
    Config,

    /// Write an annotated default configuration file
    #[command(name = "defconfig")]
    DefConfig,

    /// Print the paths rpmlens uses
    Env,
}
