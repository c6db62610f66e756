use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use pmview::commands;

fn source_args() -> [Arg; 4] {
    [
        Arg::new("host")
            .long("host")
            .value_name("URL")
            .help("Base URL of the power monitor (overrides config)")
            .global(true),
        Arg::new("path")
            .long("path")
            .value_name("PATH")
            .help("Readings endpoint path (default: /pm)")
            .global(true),
        Arg::new("interval")
            .short('i')
            .long("interval")
            .value_name("MS")
            .help("Poll period in milliseconds (default: 1000)")
            .value_parser(clap::value_parser!(u64).range(1..))
            .global(true),
        Arg::new("timeout")
            .long("timeout")
            .value_name("MS")
            .help("HTTP request timeout in milliseconds (default: 5000)")
            .value_parser(clap::value_parser!(u64).range(1..))
            .global(true),
    ]
}

fn build_cli() -> Command {
    Command::new("pmview")
        .about("Live gauges for a power monitor's /pm endpoint")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .args(source_args())
        .subcommand(
            Command::new("monitor")
                .about("Show apparent power, real power, current and voltage gauges")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print one JSON line per reading instead of the dashboard")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("read")
                .about("Fetch a single reading and print it")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the reading as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Manage configuration (use 'pmview config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the current configuration"))
                .subcommand(
                    Command::new("set")
                        .about("Set a configuration value")
                        .arg(
                            Arg::new("key")
                                .help("host, data_path, period_ms, request_timeout_ms, reset_on_error, max.p_va, max.p_w, max.i_rms, max.v_rms")
                                .required(true)
                                .index(1),
                        )
                        .arg(Arg::new("value").required(true).index(2)),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Restore the default configuration")
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Do not ask for confirmation")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(Command::new("path").about("Print the configuration file path")),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        println!("pmview version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let level = if matches.get_flag("verbose") {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    pmview::init_logging(level);

    match matches.subcommand() {
        Some(("monitor", sub_matches)) => commands::monitor::execute(sub_matches),
        Some(("read", sub_matches)) => commands::read::execute(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        // Bare `pmview` opens the dashboard
        _ => commands::monitor::execute(&matches),
    }
}
