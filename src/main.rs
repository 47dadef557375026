mod app;

use app::App;
use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const VERSION: &str = concat!(env!("RSYNCER_VERSION"), " ", env!("RSYNCER_BUILD_HASH"));

/// Resolve `login[:port]@host[:path]` sync targets
#[derive(Parser)]
#[command(name = "rsyncer", version = VERSION)]
struct Arguments {
    /// Increase console verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of ~/.rsyncer.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log to the console only, without a session log directory
    #[arg(long, global = true)]
    no_log_files: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a sync target into login, port, hosts and path
    Resolve {
        /// Target in the form login[:port]@host[:path]
        descriptor: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print every IPv4 address found in the given text
    Ips {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the current user and known system users
    Users {
        /// Do not put root first
        #[arg(long)]
        no_root: bool,

        /// Skip configured and SSH config logins
        #[arg(long)]
        no_known: bool,
    },
    /// Verify that a recent enough rsync is installed
    Check,
    /// Write the default config file if none exists
    InitConfig,
}

fn main() -> ExitCode {
    let args = Arguments::parse();

    let app = match App::load(args.config.clone()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = app.init_logging(args.verbose, args.no_log_files) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let mut out = io::stdout().lock();
    let result = match args.command {
        Command::Resolve { descriptor, json } => app.resolve(&descriptor, json, &mut out),
        Command::Ips { text } => App::ips(&text, &mut out),
        Command::Users { no_root, no_known } => app.users(no_root, no_known, &mut out),
        Command::Check => app.check(&mut out),
        Command::InitConfig => app.init_config(&mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
