use core::fmt;
use std::{
    env,
    fs::File,
    io::BufWriter,
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use gbreak_common::KiB;
use gbreak_logging::{get_logger, log_error, log_info, log_severe, log_warning, LogCategory};
use gbreak_ucd::{Generator, TableEmitter, UcdError};
use scopeguard::defer;

mod settings;
use settings::{Settings, SettingsError, DEFAULT_SETTINGS_PATH};

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

/// Error that ends the run
#[derive(Debug)]
enum AppError {
    Settings(SettingsError),
    Ucd(UcdError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Settings(err) => f.write_fmt(format_args!("Invalid settings: {err}")),
            AppError::Ucd(err)      => f.write_fmt(format_args!("{err}")),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        AppError::Settings(err)
    }
}

impl From<UcdError> for AppError {
    fn from(err: UcdError) -> Self {
        AppError::Ucd(err)
    }
}

fn main() -> ExitCode {
    let logger = get_logger();
    defer!(logger.flush());

    match actual_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_severe!(LOG_CAT, main, "{err}");
            ExitCode::FAILURE
        },
    }
}

fn actual_main() -> Result<(), AppError> {
    // An explicitly passed settings file has to exist
    let (settings_path, required) = match env::args_os().nth(1) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_PATH), false),
    };
    let settings = Settings::load_file(&settings_path, required)?;
    setup_logger(&settings);

    let start = Instant::now();
    log_info!(LOG_CAT, "Generating grapheme break table from '{}'", settings.input_path.display());

    let generation = Generator::new(settings.generator).generate_file(&settings.input_path)?;
    log_info!(LOG_CAT, "Processed {}", generation.stats);
    if generation.stats.rejected_ranges != 0 {
        log_warning!(LOG_CAT, "{} range(s) were dropped, their codepoints are missing from the table", generation.stats.rejected_ranges);
    }

    let output_path = &settings.output_path;
    let file = File::create(output_path).map_err(|err| UcdError::io(output_path, &err))?;
    let mut writer = BufWriter::with_capacity(KiB(64), file);
    settings.emitter().emit(&generation.table, &mut writer)?;

    log_info!(LOG_CAT, "Wrote {} codepoints to '{}' in {:.2?}", generation.table.len(), output_path.display(), start.elapsed());
    Ok(())
}

fn setup_logger(settings: &Settings) {
    let logger = get_logger();
    logger.set_max_level(settings.log_level);
    logger.set_always_flush(settings.log_always_flush);

    let Some(log_path) = &settings.log_file else { return; };
    match File::create(log_path) {
        Ok(file) => {
            // Escape codes would end up in the file
            logger.set_colored(false);
            if logger.add_writer(Box::new(file)).is_err() {
                log_error!(LOG_CAT, setup_logger, "No space left for a log writer, '{}' won't be written", log_path.display());
            }
        },
        Err(err) => log_error!(LOG_CAT, setup_logger, "Failed to create log file '{}': {err}", log_path.display()),
    }
}
