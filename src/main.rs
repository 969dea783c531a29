use fidget_spin::{config::SpinnerConfig, error::AppError, window};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = try_main() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), AppError> {
    // Optional JSON config path as the only argument.
    let config = match std::env::args().nth(1) {
        Some(path) => SpinnerConfig::load(path)?,
        None => SpinnerConfig::default(),
    };
    window::run(config)
}
