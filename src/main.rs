use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use pianokeys::config::PianoConfig;
use pianokeys::error::PkResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file; explicit command-line flags override it.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rect of every key.
    Layout(cmd::layout::LayoutArgs),
    /// Print the key under a point.
    Locate(cmd::locate::LocateArgs),
    /// Feed recorded pointer events through a piano and print the key events.
    Replay(cmd::replay::ReplayArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let sub_matches = matches.subcommand().map(|(_, m)| m);

    let result = match &cli.command {
        Commands::Layout(args) => resolve_config(&cli, &args.config, sub_matches)
            .and_then(|config| cmd::layout::run(args, &config)),
        Commands::Locate(args) => resolve_config(&cli, &args.config, sub_matches)
            .and_then(|config| cmd::locate::run(args, &config)),
        Commands::Replay(args) => resolve_config(&cli, &args.config, sub_matches)
            .and_then(|config| cmd::replay::run(args, &config)),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

/// File config (if any) as the base, command-line flags on top.
fn resolve_config(
    cli: &Cli,
    cli_config: &PianoConfig,
    sub_matches: Option<&ArgMatches>,
) -> PkResult<PianoConfig> {
    let config = match (&cli.config_file, sub_matches) {
        (Some(path), Some(matches)) => {
            info!("Loading config from: {}", path);
            let mut file_config = PianoConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, matches);
            file_config
        }
        _ => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}
