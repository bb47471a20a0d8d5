// src/cli.rs
use anyhow::Result;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::commands;
use crate::core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::infra::{logging, t};

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

/// Builds the command tree. Help texts use the current UI locale.
pub fn build_cli() -> Command {
    Command::new("i18n-catalog")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about").to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang").to_string())
                .value_name("UI_LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli_config").to_string())
                .value_name("CONFIG")
                .default_value(DEFAULT_CONFIG_FILE)
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("database")
                .short('d')
                .long("database")
                .help(t!("cli_database").to_string())
                .value_name("DATABASE")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli_verbose").to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("extract").about(t!("cmd_extract_about").to_string()))
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about").to_string())
                .arg(
                    Arg::new("language")
                        .help(t!("arg_language").to_string())
                        .value_name("LANGUAGE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .help(t!("arg_model").to_string())
                        .value_name("MODEL")
                        .action(ArgAction::Set),
                ),
        )
}

/// Renders the help of the whole command set: the top-level command followed
/// by each subcommand.
pub fn compose_help() -> String {
    let mut cli = build_cli();
    let mut help = cli.render_long_help().to_string();
    for sub in cli.get_subcommands_mut() {
        help.push('\n');
        help.push_str(&sub.render_long_help().to_string());
    }
    help
}

pub fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    let requested_language = pre_parse_language();
    crate::init(requested_language.as_deref());

    let matches = build_cli().get_matches();
    logging::init(matches.get_flag("verbose"));

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let explicit_config = matches.value_source("config") == Some(ValueSource::CommandLine);
    let config = AppConfig::load(&config_path, explicit_config)?;

    // The configuration may pick the UI language when the command line did not.
    if requested_language.is_none() {
        if let Some(language) = config.language.as_deref() {
            crate::init(Some(language));
        }
    }

    let database = config.database_path(matches.get_one::<PathBuf>("database").map(PathBuf::as_path))?;
    let context = commands::Context {
        config,
        config_path,
        database,
    };

    match matches.subcommand() {
        Some(("init", init_matches)) => {
            let language = init_matches.get_one::<String>("language").cloned();
            let model = init_matches.get_one::<String>("model").cloned();
            commands::init::execute(&context, language, model)
        }
        Some(("extract", _)) => commands::extract::execute(&context),
        _ => commands::interactive::execute(&context, compose_help()),
    }
}
