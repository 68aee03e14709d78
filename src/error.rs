//! Error types for netdiag.

use thiserror::Error;

/// Main error type for netdiag operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Address parsing and validation errors
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// Driver runtime errors (load, invoke)
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Diagnostic definition errors
    #[error("Diagnostic error: {0}")]
    Diagnostic(#[from] DiagnosticError),

    /// Dispatcher-level errors
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Network address errors.
#[derive(Error, Debug)]
pub enum AddressError {
    /// The text is not a well-formed address literal
    #[error("Invalid address format: '{text}'")]
    InvalidFormat { text: String },

    /// Prefix length outside the valid range for the address family
    #[error("Invalid prefix length {length} for {family} address")]
    InvalidPrefixLength { length: u32, family: &'static str },
}

/// Driver runtime errors (behavior loading and execution).
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The behavior definition could not be parsed or compiled
    #[error("Driver '{driver}' failed to load: {message}")]
    Load { driver: String, message: String },

    /// The loaded behavior does not expose the requested entry point
    #[error("Driver '{driver}' does not support entry point '{entry_point}'")]
    UnsupportedEntryPoint { driver: String, entry_point: String },

    /// The behavior raised a failure during execution
    #[error("Driver '{driver}' failed during execution: {message}")]
    Execution { driver: String, message: String },
}

/// Diagnostic definition errors (per-item, recoverable at batch level).
#[derive(Error, Debug)]
pub enum DiagnosticError {
    /// A required field of the definition is blank
    #[error("Diagnostic '{name}' has an empty {field}")]
    EmptyField { name: String, field: &'static str },

    /// The output extraction pattern does not compile
    #[error("Diagnostic '{name}' has an invalid extraction pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Dispatcher errors (run preconditions and classification).
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Authentication rejected, or credential variant does not match the
    /// driver's declared protocol
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    /// The device references a driver that is not registered
    #[error("Device '{device}' has no usable driver '{driver}'")]
    MissingDriver { device: String, driver: String },

    /// No live session of the required kind was lent to the run
    #[error("No {protocol} session available for this run")]
    SessionUnavailable { protocol: &'static str },

    /// A driver with the same name is already registered
    #[error("Driver '{name}' is already registered")]
    DriverAlreadyRegistered { name: String },
}

/// Result type alias using netdiag's Error.
pub type Result<T> = std::result::Result<T, Error>;
