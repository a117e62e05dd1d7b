//! CLI tool for patching Debian packages and other ar archives.

mod commands;
mod exit_codes;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use exit_codes::ExitCode;

/// Add or replace members of .deb packages and other ar archives
#[derive(Parser)]
#[command(name = "debpatch")]
#[command(author, version, about = "Add or replace members of .deb packages", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Suppress normal output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Log each member decision to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace members or add new ones (alias: a)
    ///
    /// Arguments are `ARCHIVE SOURCE=TARGET...`, or just
    /// `SOURCE=TARGET...` when --control names the package.
    #[command(alias = "a")]
    Add {
        /// Debian control file; the archive is `<package>_<version>_<arch>.deb`
        /// in the current directory
        #[arg(short = 'c', long)]
        control: Option<PathBuf>,

        /// Keep the original archive as `<archive>.orig`
        #[arg(long, env = "DEBPATCH_BACKUP")]
        backup: bool,

        /// Archive path (unless --control is given) followed by SOURCE=TARGET pairs
        #[arg(required = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// List archive members (alias: l)
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,
    },

    /// Extract members from an archive (alias: x)
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Extract only this member
        #[arg(short = 'm', long)]
        member: Option<String>,

        /// Output directory
        #[arg(short = 'o', long, default_value = ".")]
        output: PathBuf,

        /// Overwrite mode
        #[arg(long, value_enum, default_value = "always")]
        overwrite: OverwriteMode,

        /// Set file modification times from the archive
        #[arg(long)]
        preserve_mtime: bool,
    },

    /// Check whether a file is an ar archive
    Check {
        /// File to check
        archive: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OverwriteMode {
    Always,
    Never,
    Error,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .format_timestamp(None)
        .format_target(false)
        .filter_module("debpatch", level)
        .init();
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Add {
            control,
            backup,
            args,
        } => commands::add(&commands::AddConfig {
            control: control.as_deref(),
            backup,
            args: &args,
            format: cli.format,
            quiet: cli.quiet,
        }),

        Commands::List { archive } => commands::list(&archive, cli.format, cli.quiet),

        Commands::Extract {
            archive,
            member,
            output,
            overwrite,
            preserve_mtime,
        } => commands::extract(&commands::ExtractConfig {
            archive_path: &archive,
            member: member.as_deref(),
            output_dir: &output,
            overwrite,
            preserve_mtime,
            format: cli.format,
            quiet: cli.quiet,
        }),

        Commands::Check { archive } => commands::check(&archive, cli.quiet),

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(exit_code.code());
}
