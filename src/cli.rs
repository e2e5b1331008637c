//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::{CollateConfig, DEFAULT_OUTPUT_FILE};
use crate::flows::merge::MergeOptions;

/// codecollate - render a directory tree and collate source files into one document.
#[derive(Parser, Debug)]
#[command(name = "codecollate")]
#[command(
    author,
    version,
    about,
    long_about = r#"codecollate writes a single text document made of a directory tree diagram
followed by the contents of every .py, .ts, .tsx and .css file under ROOT.

Run without a command to merge ROOT (default: the current directory) into
all_codes_combined.txt.

Examples:
    codecollate
    codecollate --root ~/src/webapp merge --output /tmp/webapp.txt
    codecollate tree
    codecollate config
"#
)]
pub struct Cli {
    /// Root directory to collate.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to collate (defaults to the current directory).\n\n\
File labels in the merged document are relative to this root."
    )]
    pub root: PathBuf,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored status output. This is useful when piping to files or when\n\
your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (no status lines, no logging).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress the per-file status lines and the final summary, and turn\n\
logging off. Fatal errors are still reported."
    )]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge the directory tree and source files into one document (default).
    #[command(
        long_about = "Write the directory tree of ROOT followed by one section per .py, .ts,\n\
.tsx and .css file, sorted by path.\n\n\
Files under node_modules, .next, .git and __pycache__ are left out, as is the output\n\
file itself. A file that cannot be read as UTF-8 gets a one-line diagnostic instead\n\
of its content.\n\n\
Examples:\n\
  codecollate merge\n\
  codecollate merge --output combined.txt\n"
    )]
    Merge {
        /// Output file path.
        #[arg(
            long,
            short,
            default_value = DEFAULT_OUTPUT_FILE,
            value_name = "FILE",
            long_help = "Output file path. Relative paths are resolved against the current\n\
directory, not ROOT. The file is overwritten."
        )]
        output: PathBuf,
    },

    /// Print the directory tree of ROOT.
    #[command(
        long_about = "Print \". (ROOT: <name>)\" followed by the tree diagram used in the\n\
merged document. .git, node_modules, __pycache__, .next, .vscode and dist are hidden\n\
at every level.\n\n\
Example:\n\
  codecollate --root src tree\n"
    )]
    Tree,

    /// Print the effective configuration as JSON.
    #[command(
        long_about = "Print the exclusion sets and extension allow-list as JSON.\n\n\
The tree and the merged content use different exclusion sets; both are shown."
    )]
    Config,
}

/// Environment variable holding `env_logger` directives that replace the `-v` level.
pub const LOG_ENV: &str = "CODECOLLATE_LOG";

/// What a run reports: per-file status lines and summary, and the log level.
///
/// `-q` turns both off together; `-v` only raises the log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reporting {
    pub status_lines: bool,
    pub log_level: log::LevelFilter,
}

impl Reporting {
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self {
                status_lines: false,
                log_level: log::LevelFilter::Off,
            };
        }
        let log_level = match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        Self {
            status_lines: true,
            log_level,
        }
    }

    fn logger(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(self.log_level).format_timestamp(None);
        if self.log_level != log::LevelFilter::Off {
            builder.parse_env(env_logger::Env::new().filter(LOG_ENV));
        }
        builder
    }

    fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            quiet: !self.status_lines,
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let reporting = Reporting::from_flags(cli.quiet, cli.verbose);
    reporting.logger().init();
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = CollateConfig::default();
    let command = cli.command.unwrap_or(Commands::Merge {
        output: PathBuf::from(DEFAULT_OUTPUT_FILE),
    });
    log::debug!("Running {:?} on {}", command, cli.root.display());

    match command {
        Commands::Merge { output } => crate::flows::merge::run_merge(
            &cli.root,
            &output,
            &config,
            reporting.merge_options(),
        ),

        Commands::Tree => {
            crate::flows::tree::run_tree(&cli.root, &config, !reporting.status_lines)
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
