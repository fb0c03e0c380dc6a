//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use tilestream::config::ConfigFileError;
use tilestream::coord::TileAddress;
use tilestream::provider::{FetchError, MapSource, ProviderError};

/// Exit code when the requested tile is outside the source's coverage.
pub const EXIT_OUT_OF_BOUNDS: i32 = 2;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Failed to create provider
    Provider(ProviderError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// The tile is outside the source's coverage
    OutOfBounds {
        source: MapSource,
        address: TileAddress,
    },
    /// The tile could not be fetched
    Fetch {
        address: TileAddress,
        error: FetchError,
    },
    /// Failed to write output file
    FileWrite { path: String, error: std::io::Error },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::OutOfBounds { .. } => EXIT_OUT_OF_BOUNDS,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Provider(ProviderError::MissingApiKey { map_source }) => {
                eprintln!();
                eprintln!(
                    "Set api_key in the [{}] section of the config file, or pass --api-key.",
                    map_source.key()
                );
            }
            CliError::Fetch { error, .. } if error.is_transient() => {
                eprintln!();
                eprintln!("The service may be temporarily unavailable. Try again later.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Provider(e) => write!(f, "Failed to create provider: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::OutOfBounds { source, address } => {
                write!(f, "Tile {} is outside {} coverage", address, source)
            }
            CliError::Fetch { address, error } => {
                write!(f, "Failed to fetch tile {}: {}", address, error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Provider(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::Fetch { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ProviderError> for CliError {
    fn from(e: ProviderError) -> Self {
        CliError::Provider(e)
    }
}
