use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::LevelFilter;

use crate::config::Config;
use crate::error::LoggingError;

/// Routes the `log` facade into `<log_dir>/<log_file>`, appending.
///
/// The level defaults to `info`; `RUST_LOG` overrides it.
pub fn init_logging(config: &Config) -> Result<PathBuf, LoggingError> {
    let path = config.log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                buf.timestamp(),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .try_init()?;
    Ok(path)
}
