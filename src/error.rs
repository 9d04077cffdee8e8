//! Error types for the driver
//!
//! Three concerns, three types:
//!
//! - [`BuilderError`] - invalid [`PanelVideoMode`](crate::PanelVideoMode)
//!   construction, caught before any hardware is touched
//! - [`ConfigError`] - a clock plan landed outside hardware limits;
//!   non-fatal, the value is clamped and bring-up proceeds
//! - [`Error`] - runtime failures surfaced by the controller: a missing
//!   attach-time resource or a rejected mode-switch request
//!
//! Register writes themselves cannot fail and are not modeled here.

/// Non-fatal configuration condition detected while resolving the clock plan
///
/// The offending value is clamped and bring-up proceeds; the condition
/// is logged and reported alongside the resolved plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Rounded DDR line frequency exceeded the controller maximum
    DdrClockOutOfRange {
        /// Frequency the mode asked for, in MHz (after rounding)
        computed: u32,
        /// Hardware maximum the value was clamped to, in MHz
        max: u32,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DdrClockOutOfRange { computed, max } => write!(
                f,
                "DDR clock {computed} MHz exceeds hardware maximum {max} MHz, clamped"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// A platform resource required at attach was unavailable
///
/// Fatal: attach aborts and the controller stays in `Off`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceError {
    /// The reference clock could not be enabled
    ClockUnavailable,
}

impl core::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ClockUnavailable => write!(f, "reference clock unavailable"),
        }
    }
}

impl core::error::Error for ResourceError {}

/// Errors surfaced by controller operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Attach-time resource failure
    Resource(ResourceError),
    /// A mode-switch request carried an unrecognized value
    ///
    /// Rejected with no state change; valid values are 0 (normal) and
    /// 1 (ultra-low-power).
    InvalidRequest {
        /// The rejected request value
        value: u32,
    },
}

impl From<ResourceError> for Error {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Resource(e) => write!(f, "resource error: {e}"),
            Self::InvalidRequest { value } => {
                write!(f, "invalid mode request value: {value}")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Errors that can occur when building a panel video mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Divider leaves a pixel clock below 1 MHz
    InvalidDivider {
        /// Reference clock rate in MHz
        ref_clk_mhz: u32,
        /// Requested divider
        divider: u32,
    },
    /// Active area must be non-zero in both dimensions
    InvalidDpiTiming {
        /// Requested active width in pixels
        h_active: u16,
        /// Requested active height in lines
        v_active: u16,
    },
    /// Virtual channel number out of range (valid: 0..=3)
    InvalidVirtualChannel {
        /// Requested channel
        channel: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDivider {
                ref_clk_mhz,
                divider,
            } => write!(
                f,
                "divider {divider} leaves no pixel clock from {ref_clk_mhz} MHz reference"
            ),
            Self::InvalidDpiTiming { h_active, v_active } => {
                write!(f, "invalid active area: {h_active}x{v_active}")
            }
            Self::InvalidVirtualChannel { channel } => {
                write!(f, "invalid virtual channel: {channel} (valid: 0..=3)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
