use core::fmt;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gbreak_logging::{log_info, LogLevel};
use gbreak_toml::{self as toml, Toml, TomlParseError};
use gbreak_ucd::{DegenerateRangePolicy, GeneratorOptions, RustTableEmitter};

use crate::LOG_CAT;

/// Settings file used when none is passed on the command line
pub const DEFAULT_SETTINGS_PATH: &str = "gbreak.toml";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SettingsError {
    /// The settings file could not be read
    Io { path: PathBuf, msg: String },
    /// The settings file isn't valid toml
    Parse(TomlParseError),
    /// A key has a value of the wrong type or an unsupported value
    InvalidValue { key: String, msg: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, msg }        => f.write_fmt(format_args!("Failed to read '{}': {msg}", path.display())),
            SettingsError::Parse(err)              => f.write_fmt(format_args!("{err}")),
            SettingsError::InvalidValue { key, msg } => f.write_fmt(format_args!("Invalid value for '{key}': {msg}")),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<TomlParseError> for SettingsError {
    fn from(err: TomlParseError) -> Self {
        SettingsError::Parse(err)
    }
}

/// Generator settings
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Settings {
    /// UCD property file to read
    pub input_path        : PathBuf,

    /// File the table is written to
    pub output_path       : PathBuf,
    /// Name of the generated constant
    pub table_name        : String,
    /// Type used for the tags in the generated table, tags are written as strings when not set
    pub tag_type          : Option<String>,

    pub generator         : GeneratorOptions,

    /// Maximum log level
    pub log_level         : LogLevel,
    /// Additional file to write the log to
    pub log_file          : Option<PathBuf>,
    /// Flush the log after every message
    pub log_always_flush  : bool,
}

impl Settings {
    /// Load the settings from the contents of a settings file, missing keys keep their default
    pub fn load(toml: &str) -> Result<Settings, SettingsError> {
        let toml = Toml::parse(toml)?;
        let mut settings = Settings::default();

        if let Some(input) = get_table(&toml, "input")? {
            if let Some(path) = get_str(input, "input", "path")? {
                settings.input_path = PathBuf::from(path);
            }
        }

        if let Some(output) = get_table(&toml, "output")? {
            if let Some(path) = get_str(output, "output", "path")? {
                settings.output_path = PathBuf::from(path);
            }
            if let Some(name) = get_str(output, "output", "name")? {
                if !is_identifier(name) {
                    return Err(invalid_value("output", "name", format!("'{name}' is not a valid rust identifier")));
                }
                settings.table_name = name.to_string();
            }
            if let Some(tag_type) = get_str(output, "output", "tag-type")? {
                if !is_type_path(tag_type) {
                    return Err(invalid_value("output", "tag-type", format!("'{tag_type}' is not a valid rust type path")));
                }
                settings.tag_type = Some(tag_type.to_string());
            }
        }

        if let Some(ranges) = get_table(&toml, "ranges")? {
            if let Some(policy) = get_str(ranges, "ranges", "degenerate")? {
                settings.generator.degenerate_ranges = DegenerateRangePolicy::from_name(policy)
                    .ok_or_else(|| invalid_value("ranges", "degenerate", format!("expected \"drop\" or \"single\", found \"{policy}\"")))?;
            }
        }

        if let Some(properties) = get_table(&toml, "properties")? {
            if let Some(validate) = get_bool(properties, "properties", "validate")? {
                settings.generator.validate_tags = validate;
            }
        }

        if let Some(log) = get_table(&toml, "log")? {
            if let Some(level) = get_str(log, "log", "level")? {
                settings.log_level = LogLevel::from_name(level)
                    .ok_or_else(|| invalid_value("log", "level", format!("unknown log level \"{level}\"")))?;
            }
            if let Some(file) = get_str(log, "log", "file")? {
                settings.log_file = Some(PathBuf::from(file));
            }
            if let Some(always_flush) = get_bool(log, "log", "always-flush")? {
                settings.log_always_flush = always_flush;
            }
        }

        Ok(settings)
    }

    /// Load the settings from a file
    ///
    /// When the file doesn't exist and it is not `required`, the default settings are returned.
    pub fn load_file(path: &Path, required: bool) -> Result<Settings, SettingsError> {
        match fs::read_to_string(path) {
            Ok(toml) => Settings::load(&toml),
            Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
                log_info!(LOG_CAT, "No '{}' found, using default settings", path.display());
                Ok(Settings::default())
            },
            Err(err) => Err(SettingsError::Io { path: path.to_path_buf(), msg: err.to_string() }),
        }
    }

    /// Create the emitter for the output settings
    pub fn emitter(&self) -> RustTableEmitter {
        let mut emitter = RustTableEmitter::new(&self.table_name);
        if let Some(tag_type) = &self.tag_type {
            emitter = emitter.with_tag_type(tag_type);
        }
        match self.input_path.file_name() {
            Some(file_name) => emitter.with_source(&file_name.to_string_lossy()),
            None => emitter,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("unicode/GraphemeBreakProperty.txt"),
            output_path: PathBuf::from("grapheme_break_table.rs"),
            table_name: RustTableEmitter::DEFAULT_NAME.to_string(),
            tag_type: None,
            generator: GeneratorOptions::default(),
            log_level: LogLevel::Info,
            log_file: None,
            log_always_flush: false,
        }
    }
}

fn invalid_value(table: &str, key: &str, msg: String) -> SettingsError {
    SettingsError::InvalidValue { key: format!("{table}.{key}"), msg }
}

fn get_table<'a>(toml: &'a Toml, name: &str) -> Result<Option<&'a toml::Table>, SettingsError> {
    match toml.get(name) {
        None => Ok(None),
        Some(toml::Item::Table(table)) => Ok(Some(table)),
        Some(item) => Err(SettingsError::InvalidValue { key: name.to_string(), msg: format!("expected a table, found {}", item.type_name()) }),
    }
}

fn get_str<'a>(table: &'a toml::Table, table_name: &str, key: &str) -> Result<Option<&'a str>, SettingsError> {
    match table.get_item(key) {
        None => Ok(None),
        Some(toml::Item::String(val)) => Ok(Some(val.as_str())),
        Some(item) => Err(invalid_value(table_name, key, format!("expected a string, found {}", item.type_name()))),
    }
}

fn get_bool(table: &toml::Table, table_name: &str, key: &str) -> Result<Option<bool>, SettingsError> {
    match table.get_item(key) {
        None => Ok(None),
        Some(toml::Item::Boolean(val)) => Ok(Some(*val)),
        Some(item) => Err(invalid_value(table_name, key, format!("expected a boolean, found {}", item.type_name()))),
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(ch) if ch == '_' || ch.is_ascii_alphabetic())
        && chars.all(|ch| ch == '_' || ch.is_ascii_alphanumeric())
}

/// `::` separated identifiers, like `crate::GraphemeBreak`
fn is_type_path(path: &str) -> bool {
    path.split("::").all(is_identifier)
}
