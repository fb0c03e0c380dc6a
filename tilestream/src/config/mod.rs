//! User configuration for tilestream.
//!
//! Settings live in an INI file at `~/.tilestream/config.ini`:
//!
//! ```ini
//! [source]
//! type = ign
//!
//! [ign]
//! api_key = YOUR_KEY
//! layer = plan_ign
//!
//! [download]
//! timeout = 10
//! max_attempts = 3
//! ```
//!
//! Missing files and missing keys fall back to defaults. The loaded
//! [`ConfigFile`] turns into the inputs of the provider factory through
//! [`ConfigFile::source_config`] and [`DownloadSettings::retry_policy`].

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DownloadSettings, IgnSettings, OrdnanceSurveySettings, SourceSettings,
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
};
