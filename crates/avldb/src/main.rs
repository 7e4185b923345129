use std::io;
use std::process::ExitCode;

use avldb::{Command, Config, Store, USAGE, cli, init_logging};

fn main() -> ExitCode {
    let cli = match cli::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if cli.command == Command::Help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let mut config = Config::from_env();
    cli.apply(&mut config);
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store = Store::new(&config);
    let mut stdout = io::stdout().lock();
    match cli::run(&cli.command, &store, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
