//! Interrupt status handling
//!
//! The controller's status register is write-1-to-clear: the handler
//! reads it and writes the same value back, clearing every set bit.
//! Nothing is dispatched beyond that today; [`StatusPolicy`] is the
//! seam where an escalation policy can be added later without touching
//! the bring-up sequencing.

/// Snapshot of the interrupt status register
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatusBits(pub u32);

impl StatusBits {
    /// SoT (start of transmission) error
    pub const SOT_ERROR: u32 = 1 << 0;
    /// SoT sync error
    pub const SOT_SYNC_ERROR: u32 = 1 << 1;
    /// ECC single-bit error, corrected
    pub const ECC_SINGLE_ERROR: u32 = 1 << 2;
    /// ECC multi-bit error, not corrected
    pub const ECC_MULTI_ERROR: u32 = 1 << 3;
    /// Checksum mismatch on a received long packet
    pub const CHECKSUM_ERROR: u32 = 1 << 4;
    /// Low-power contention detected
    pub const LP_CONTENTION: u32 = 1 << 5;
    /// Output FIFO underrun
    pub const OUT_FIFO_UNDERRUN: u32 = 1 << 6;
    /// Turn-around acknowledge timeout
    pub const TURNAROUND_TIMEOUT: u32 = 1 << 7;

    /// No bits pending
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit in `mask` is set
    pub fn contains(self, mask: u32) -> bool {
        self.0 & mask == mask
    }
}

impl core::fmt::Display for StatusBits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Policy invoked with the status bits captured by each interrupt
///
/// The write-1-to-clear itself is performed by the controller before
/// the policy runs; a policy only observes.
pub trait StatusPolicy {
    /// Called once per serviced interrupt with the bits that were pending
    fn on_status(&mut self, status: StatusBits);
}

/// The default policy: clear and ignore
///
/// Status bits are not yet wired to any recovery path; spurious or
/// lost interrupts are tolerated.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearOnly;

impl StatusPolicy for ClearOnly {
    fn on_status(&mut self, _status: StatusBits) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_contains() {
        assert!(StatusBits(0).is_empty());
        let bits = StatusBits(StatusBits::SOT_ERROR | StatusBits::ECC_MULTI_ERROR);
        assert!(!bits.is_empty());
        assert!(bits.contains(StatusBits::SOT_ERROR));
        assert!(bits.contains(StatusBits::SOT_ERROR | StatusBits::ECC_MULTI_ERROR));
        assert!(!bits.contains(StatusBits::CHECKSUM_ERROR));
    }

    #[test]
    fn display_renders_hex() {
        extern crate alloc;
        use alloc::format;
        assert_eq!(format!("{}", StatusBits(0x0000_0005)), "0x00000005");
    }
}
