use gamelog_lpp::batch::run;
use gamelog_lpp::plot::{check_directory, parse_cli};
use log::info;
use std::io::Write;

fn main() {
    let config = parse_cli();

    let log_level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
    .init();

    if let Err(msg) = check_directory(&config.directory) {
        eprintln!("{}", msg);
        std::process::exit(1);
    }

    info!(
        "read game logs from {} and plot to {}",
        config.directory.display(),
        config.output.display()
    );
    match run(&config) {
        Ok(summary) => info!(
            "done: {} plotted, {} filtered out, {} failed",
            summary.rendered, summary.skipped, summary.failed
        ),
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    }
}
