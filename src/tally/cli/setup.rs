use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TALLY_LOG";

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "tally", bin_name = "tally", version = get_version())]
#[command(about = "Keep count of things from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $TALLY_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item, or bump its count by one
    #[command(alias = "a")]
    Add {
        /// Item name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Take one away; the item is removed when its count reaches zero
    #[command(alias = "rm")]
    Remove {
        /// Item name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// List items
    #[command(alias = "ls")]
    List {
        /// Only show items whose name contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// none, name-asc, name-desc, count-asc or count-desc
        #[arg(long)]
        sort: Option<String>,
    },

    /// Interactive session: add, +, -, search, sort, clear
    Shell,

    /// Get or set configuration
    Config {
        /// Configuration key (collection, default-sort)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the data directory
    Init,
}

/// Installs the stderr log subscriber. `$TALLY_LOG` overrides the level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiword_add() {
        let cli = Cli::try_parse_from(["tally", "add", "green", "tea"]).unwrap();
        match cli.command {
            Some(Commands::Add { name }) => assert_eq!(name.join(" "), "green tea"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_list_flags() {
        let cli =
            Cli::try_parse_from(["tally", "ls", "-s", "ap", "--sort", "count-desc", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::List { search, sort }) => {
                assert_eq!(search.as_deref(), Some("ap"));
                assert_eq!(sort.as_deref(), Some("count-desc"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn remove_requires_a_name() {
        assert!(Cli::try_parse_from(["tally", "rm"]).is_err());
    }

    #[test]
    fn bare_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["tally", "--dir", "/tmp/t"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/t")));
    }
}
