//! MCom-02 VPOUT MIPI DSI Controller Driver
//!
//! A driver that brings up a MIPI DSI video-mode serial link: it
//! resolves the clock plan for a fixed panel video mode, derives the
//! D-PHY bus timing with integer-only arithmetic, programs the
//! controller's register file and sequences the link through
//! off / normal / ultra-low-power states.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 `DelayNs` for settle-time waits
//! - integer-only D-PHY timing with explicit rounding and clamping
//! - named empirical override table for hand-tuned timing constants
//! - recovery from a link left enabled by a prior boot-stage loader
//! - write-1-to-clear interrupt servicing behind a policy seam
//!
//! ## Usage
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use mcom02_dsi::{Builder, Dsi, DsiInterface, ReferenceClock, ResourceError};
//!
//! # struct MockRegs;
//! # impl DsiInterface for MockRegs {
//! #     fn write_register(&mut self, _offset: u32, _value: u32) {}
//! #     fn read_register(&mut self, _offset: u32) -> u32 { 0 }
//! # }
//! # struct MockClock;
//! # impl ReferenceClock for MockClock {
//! #     fn enable(&mut self) -> Result<(), ResourceError> { Ok(()) }
//! #     fn disable(&mut self) {}
//! #     fn rate_mhz(&self) -> u32 { 144 }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let registers = MockRegs;
//! # let ref_clk = MockClock;
//! # let mut delay = MockDelay;
//! let mode = match Builder::new().build() {
//!     Ok(mode) => mode,
//!     Err(_) => return,
//! };
//!
//! let mut dsi = Dsi::new(registers, ref_clk, mode);
//! if dsi.init(&mut delay).is_ok() {
//!     // link is up; drop to standby when the display sleeps
//!     dsi.enter_low_power();
//!     dsi.enter_normal();
//! }
//! ```

#![no_std]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Clock plan resolution from the panel video mode
pub mod clock;
/// Panel video mode description and builder
pub mod config;
/// Controller state machine and register programming
pub mod controller;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Interrupt status handling
pub mod irq;
/// Integer division helpers
pub mod math;
/// Register map and field packing
pub mod registers;
/// D-PHY and DPI timing calculation
pub mod timing;

pub use clock::{ClockPlan, DDR_MHZ_MAX, DDR_MHZ_STEP};
pub use config::{
    Builder, DpiTiming, LaneCount, PanelVideoMode, PixelFormat, VideoModeClass,
};
pub use controller::{
    ControllerState, Dsi, LinkTiming, RegisterEntry, RegisterSnapshot,
};
pub use error::{BuilderError, ConfigError, Error, ResourceError};
pub use interface::{DsiInterface, MmioInterface, ReferenceClock};
pub use irq::{ClearOnly, StatusBits, StatusPolicy};
pub use timing::{DpiCounts, PhyTimingSet, TimingOverrides};
