//! Error types for focus-motion.
//!
//! Two vocabularies live here. [`ErrorCode`] is the diagnostic taxonomy recorded in
//! the event log and reported in fault feeds; it never propagates through `?`.
//! [`Error`] is the operational error returned by fallible operations (configuration
//! loading and coil actuation).

use core::fmt;

use serde::Serialize;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Diagnostic outcome classification shared by the core and its collaborators.
///
/// The numeric codes are stable and match what status consumers already decode.
/// `InvalidRequestFormat`, `RequestBufferOverflow`, `PositionStateCorrupted` and
/// `ConnectivityFailure` are raised by collaborators, never by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorCode {
    /// Nothing noteworthy.
    #[default]
    None = 0,
    /// Requested position rejected or ignored.
    InvalidPosition = 1,
    /// Requested speed out of range.
    InvalidSpeed = 2,
    /// Malformed request payload.
    InvalidRequestFormat = 3,
    /// Request larger than the receive buffer.
    RequestBufferOverflow = 4,
    /// Persisted position failed its integrity check.
    PositionStateCorrupted = 5,
    /// Position inside the soft-limit margin.
    SoftLimitWarning = 6,
    /// Position beyond the hard travel bound.
    HardLimitExceeded = 7,
    /// Network connectivity lost.
    ConnectivityFailure = 8,
}

impl ErrorCode {
    /// Stable numeric code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// `true` for anything other than [`ErrorCode::None`].
    #[inline]
    pub const fn is_fault(self) -> bool {
        !matches!(self, ErrorCode::None)
    }

    /// Short machine-friendly name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::None => "none",
            ErrorCode::InvalidPosition => "invalid_position",
            ErrorCode::InvalidSpeed => "invalid_speed",
            ErrorCode::InvalidRequestFormat => "invalid_request_format",
            ErrorCode::RequestBufferOverflow => "request_buffer_overflow",
            ErrorCode::PositionStateCorrupted => "position_state_corrupted",
            ErrorCode::SoftLimitWarning => "soft_limit_warning",
            ErrorCode::HardLimitExceeded => "hard_limit_exceeded",
            ErrorCode::ConnectivityFailure => "connectivity_failure",
        }
    }
}

impl TryFrom<u8> for ErrorCode {
    type Error = u8;

    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => ErrorCode::None,
            1 => ErrorCode::InvalidPosition,
            2 => ErrorCode::InvalidSpeed,
            3 => ErrorCode::InvalidRequestFormat,
            4 => ErrorCode::RequestBufferOverflow,
            5 => ErrorCode::PositionStateCorrupted,
            6 => ErrorCode::SoftLimitWarning,
            7 => ErrorCode::HardLimitExceeded,
            8 => ErrorCode::ConnectivityFailure,
            other => return Err(other),
        })
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for all focus-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Travel bound must be strictly positive
    InvalidMaxSteps(i32),
    /// Steps per rotation must be strictly positive
    InvalidStepsPerRotation(i32),
    /// Speed bounds must satisfy `0 < min <= max`
    InvalidSpeedRange {
        /// Minimum speed (steps/s)
        min: u32,
        /// Maximum speed (steps/s)
        max: u32,
    },
    /// Default speed outside the configured bounds
    DefaultSpeedOutOfRange {
        /// Configured default speed
        speed: u32,
        /// Minimum speed (steps/s)
        min: u32,
        /// Maximum speed (steps/s)
        max: u32,
    },
    /// Soft-limit margin must satisfy `0 <= margin < max_steps`
    InvalidSoftLimit {
        /// Configured warning margin
        margin: i32,
        /// Configured travel bound
        max_steps: i32,
    },
    /// A scheduling interval was zero
    ZeroInterval(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Writing a coil line failed
    CoilError,
    /// Controller built without a coil driver
    NotInitialized,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMaxSteps(v) => write!(f, "Invalid max steps: {}. Must be > 0", v),
            ConfigError::InvalidStepsPerRotation(v) => {
                write!(f, "Invalid steps per rotation: {}. Must be > 0", v)
            }
            ConfigError::InvalidSpeedRange { min, max } => {
                write!(f, "Invalid speed range: min ({}) must be > 0 and <= max ({})", min, max)
            }
            ConfigError::DefaultSpeedOutOfRange { speed, min, max } => {
                write!(f, "Default speed {} outside [{}, {}]", speed, min, max)
            }
            ConfigError::InvalidSoftLimit { margin, max_steps } => {
                write!(
                    f,
                    "Invalid soft limit margin: {}. Must be >= 0 and < max steps ({})",
                    margin, max_steps
                )
            }
            ConfigError::ZeroInterval(name) => write!(f, "Interval '{}' must be > 0", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::CoilError => write!(f, "Coil line write failed"),
            MotorError::NotInitialized => write!(f, "Coil driver not provided"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
