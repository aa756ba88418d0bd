use std::process::ExitCode;

use mapc::prelude::*;

fn main() -> ExitCode {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            mapc::init_logger(false);
            log::error!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    mapc::init_logger(config.verbose);

    match compile_file(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
