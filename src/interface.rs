//! Hardware interface abstraction
//!
//! [`DsiInterface`] is the seam between the controller logic and the
//! MMIO register window; [`MmioInterface`] is the shipped volatile
//! implementation over a platform-provided base address. Tests replace
//! the trait with an in-memory register file.
//!
//! Register access is infallible by contract: the window is mapped
//! before the driver attaches and writes cannot fail, so the trait
//! returns values rather than `Result`s. Resource acquisition failures
//! belong to the [`ReferenceClock`] collaborator instead.

use crate::error::ResourceError;

/// Register window of the DSI controller
///
/// Offsets are the named constants in [`crate::registers`]. The
/// controller performs one ordered write per logical register; an
/// implementation must not reorder or merge accesses.
pub trait DsiInterface {
    /// Write a 32-bit register at `offset` bytes into the window
    fn write_register(&mut self, offset: u32, value: u32);

    /// Read a 32-bit register at `offset` bytes into the window
    fn read_register(&mut self, offset: u32) -> u32;

    /// Read-modify-write: clear `mask`, then set `value`
    fn modify_register(&mut self, offset: u32, mask: u32, value: u32) {
        let v = self.read_register(offset);
        self.write_register(offset, (v & !mask) | value);
    }
}

/// Volatile MMIO implementation of [`DsiInterface`]
///
/// Wraps the physical (or already-mapped virtual) base address of the
/// controller register window obtained from platform resource
/// enumeration.
pub struct MmioInterface {
    /// Base address of the mapped register window
    base: *mut u32,
}

impl MmioInterface {
    /// Create an interface over a mapped register window
    ///
    /// # Safety
    ///
    /// `base` must point to the controller's register window, mapped
    /// uncached and valid for volatile reads and writes for the
    /// lifetime of the returned value. No other code may access the
    /// window while this interface exists.
    #[allow(unsafe_code)]
    pub unsafe fn new(base: *mut u32) -> Self {
        Self { base }
    }
}

#[allow(unsafe_code)]
impl DsiInterface for MmioInterface {
    fn write_register(&mut self, offset: u32, value: u32) {
        // SAFETY: constructor contract guarantees the window covers
        // every named register offset.
        unsafe {
            self.base
                .byte_add(offset as usize)
                .write_volatile(value);
        }
    }

    fn read_register(&mut self, offset: u32) -> u32 {
        // SAFETY: as above.
        unsafe { self.base.byte_add(offset as usize).read_volatile() }
    }
}

// The window is exclusively owned; the raw pointer is the only reason
// the auto trait is lost.
#[allow(unsafe_code)]
unsafe impl Send for MmioInterface {}

/// Reference clock provider for the D-PHY
///
/// Registered by the platform at attach; the controller enables it
/// before touching any register and disables it on release.
pub trait ReferenceClock {
    /// Enable the clock
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ClockUnavailable`] if the clock cannot
    /// be prepared; attach aborts and the controller stays off.
    fn enable(&mut self) -> Result<(), ResourceError>;

    /// Disable the clock
    fn disable(&mut self);

    /// Fixed clock rate in MHz
    fn rate_mhz(&self) -> u32;
}
