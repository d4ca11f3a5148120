use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging();

    match case_trends::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("exiting: {err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// `RUST_LOG` wins; otherwise keep dependencies quiet and this crate at info in debug builds.
fn init_logging() {
    let crate_level = if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Warn)
        .filter(Some("case_trends"), crate_level)
        .parse_default_env()
        .init();
}
