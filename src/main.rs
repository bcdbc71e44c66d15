use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{error, info};
use simplelog::{
    format_description, ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use discon_params::application::{self, Action};
use discon_params::constants::FILEPATH_PARAMETERS_APP;
use discon_params::settings::Settings;

fn main() -> ExitCode {
    // Parse the command line arguments
    let matches = build_command().get_matches();

    // Read the settings
    let settings_file = matches
        .get_one::<PathBuf>("settings")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(FILEPATH_PARAMETERS_APP));
    let settings = match Settings::new(&settings_file) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Failed to read the settings {:?}: {error}.", settings_file);
            return ExitCode::FAILURE;
        }
    };

    // Check the log filter
    let log_filter = get_log_filter(matches.get_one::<u32>("level"));

    // Initiate the logger
    initiate_logger(log_filter, &settings.log_file);
    info!("Log level: {log_filter}.");

    let Some(action) = get_action(&matches) else {
        error!("Unknown subcommand.");
        return ExitCode::FAILURE;
    };

    // Run the application
    match application::run(&action, &settings) {
        Ok(report) => {
            println!("{}", report.output);
            if report.is_success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// Build the command line interface.
///
/// # Returns
/// Command.
fn build_command() -> Command {
    let arg_file = || {
        Arg::new("file")
            .help("Controller parameter file. Default is the discon_file in the settings.")
            .value_parser(value_parser!(PathBuf))
    };

    Command::new("discon_tool")
        .about("Load, validate, write, and compare the controller parameter files.")
        .subcommand_required(true)
        .arg(
            Arg::new("level")
                .short('l')
                .long("log-level")
                .help("Log level: 0 (Off), 1 (Error), 2 (Warn), 3 (Info), 4 (Debug), 5 (Trace)")
                .default_value("3")
                .global(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("settings")
                .short('s')
                .long("settings")
                .help("Settings file of the application.")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("check")
                .about("Load and validate the parameter file.")
                .arg(arg_file()),
        )
        .subcommand(
            Command::new("show")
                .about("Print the parameters.")
                .arg(arg_file())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print in the JSON format"),
                ),
        )
        .subcommand(
            Command::new("write")
                .about("Write the loaded parameters to a new file.")
                .arg(arg_file())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .required(true)
                        .help("Output parameter file.")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Name of the turbine in the first line."),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Compare two parameter files. Exit with 1 if they differ.")
                .arg(
                    Arg::new("left")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("right")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("tolerance")
                        .short('t')
                        .long("tolerance")
                        .help("Absolute tolerance. Default is the compare_tolerance in the settings.")
                        .value_parser(value_parser!(f64)),
                ),
        )
}

/// Get the action from the command line arguments.
///
/// # Arguments
/// * `matches` - Matched arguments.
///
/// # Returns
/// Action. None if the subcommand is unknown.
fn get_action(matches: &ArgMatches) -> Option<Action> {
    let file = |sub: &ArgMatches| sub.get_one::<PathBuf>("file").cloned();

    match matches.subcommand()? {
        ("check", sub) => Some(Action::Check { file: file(sub) }),
        ("show", sub) => Some(Action::Show {
            file: file(sub),
            is_json: sub.get_flag("json"),
        }),
        ("write", sub) => Some(Action::Write {
            file: file(sub),
            output: sub.get_one::<PathBuf>("output")?.clone(),
            title: sub.get_one::<String>("title").cloned(),
        }),
        ("compare", sub) => Some(Action::Compare {
            left: sub.get_one::<PathBuf>("left")?.clone(),
            right: sub.get_one::<PathBuf>("right")?.clone(),
            tolerance: sub.get_one::<f64>("tolerance").copied(),
        }),
        _ => None,
    }
}

/// Get the log filter.
///
/// # Arguments
/// * `log_level` - Log level.
///
/// # Returns
/// Log filter.
fn get_log_filter(log_level: Option<&u32>) -> LevelFilter {
    match log_level {
        Some(level) => match level {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        None => LevelFilter::Info,
    }
}

/// Initiate the logger.
///
/// # Arguments
/// * `level` - Log level.
/// * `filepath` - Log file path.
fn initiate_logger(level: LevelFilter, filepath: &Path) {
    let config = ConfigBuilder::new()
        .set_time_format_custom(format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second].[subsecond]"
        ))
        .build();

    // Log to the terminal
    let logger_terminal = TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    // Log to the file
    match File::create(filepath) {
        Ok(file) => {
            let logger_file = WriteLogger::new(level, config, file);
            let _ = CombinedLogger::init(vec![logger_terminal, logger_file]);
        }
        Err(error) => {
            eprintln!("Failed to create the log file: {error}.");
            let _ = CombinedLogger::init(vec![logger_terminal]);
        }
    }
}
