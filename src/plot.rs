use super::VERSION;
use crate::block::ResultPolicy;
use crate::chart::ChartStyle;
use crate::discover::DEFAULT_PATTERN;
use clap::{value_parser, Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Everything the plot binary needs for one run
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub directory: PathBuf,
    pub filter: Option<String>,
    pub output: PathBuf,
    pub pattern: String,
    pub policy: ResultPolicy,
    pub style: ChartStyle,
    pub verbose: bool,
}

fn command() -> Command {
    let arg_directory = Arg::new("game_logs_directory")
        .help("the folder containing the csv game logs")
        .required(true)
        .value_parser(value_parser!(PathBuf));
    let arg_filter = Arg::new("filter")
        .help("plot only the games of this AI name, with its lines solid")
        .long("filter")
        .value_name("ai_name")
        .num_args(1);
    let arg_output = Arg::new("output")
        .help("output folder for the png graphs, emptied at every run")
        .short('o')
        .long("output")
        .num_args(1)
        .value_parser(value_parser!(PathBuf))
        .default_value("graphs");
    let arg_pattern = Arg::new("pattern")
        .help("glob pattern of the game logs inside the folder")
        .short('p')
        .long("pattern")
        .num_args(1)
        .default_value(DEFAULT_PATTERN);
    let arg_policy = Arg::new("result_policy")
        .help("how the won flags of the result block are read")
        .long_help(
            "draw-on-both: first result row is the first player, second row the second player, \
            both flagged is a draw; first-flag: the first flagged row wins",
        )
        .long("result-policy")
        .num_args(1)
        .value_parser(["draw-on-both", "first-flag"])
        .default_value("draw-on-both");
    let arg_ceiling = Arg::new("ceiling")
        .help("remaining time ceiling of the left axis")
        .long("ceiling")
        .num_args(1)
        .value_parser(value_parser!(i64).range(1..))
        .default_value("120000");
    let arg_verbose = Arg::new("verbose")
        .help("print debug information")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue);
    Command::new("gamelog_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("process and visualize the clock usage of game logs")
        .arg(arg_directory)
        .arg(arg_filter)
        .arg(arg_output)
        .arg(arg_pattern)
        .arg(arg_policy)
        .arg(arg_ceiling)
        .arg(arg_verbose)
}

/// Takes the CLI arguments that control the plotting of the game logs.
pub fn parse_cli() -> PlotConfig {
    let cli_args = command().get_matches();
    config_from(&cli_args)
}

/// same as parse_cli with explicit arguments, the first one is the binary name
pub fn parse_cli_from<I, T>(args: I) -> Result<PlotConfig, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = command().try_get_matches_from(args)?;
    Ok(config_from(&cli_args))
}

/// message for a game logs directory that cannot be used
pub fn check_directory(dir: &Path) -> Result<(), String> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(format!("not a directory (or does not exist): {}", dir.display()))
    }
}

fn config_from(cli_args: &clap::ArgMatches) -> PlotConfig {
    // required or defaulted args always return Some(T)
    let directory = cli_args
        .get_one::<PathBuf>("game_logs_directory")
        .cloned()
        .unwrap_or_default();
    let output = cli_args
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("graphs"));
    let pattern = cli_args
        .get_one::<String>("pattern")
        .cloned()
        .unwrap_or_else(|| DEFAULT_PATTERN.to_string());
    let policy = cli_args
        .get_one::<String>("result_policy")
        .and_then(|p| p.parse().ok())
        .unwrap_or_default();
    let mut style = ChartStyle::default();
    if let Some(&ceiling) = cli_args.get_one::<i64>("ceiling") {
        style.ceiling = ceiling;
    }
    PlotConfig {
        directory,
        filter: cli_args.get_one::<String>("filter").cloned(),
        output,
        pattern,
        policy,
        style,
        verbose: cli_args.get_flag("verbose"),
    }
}
