//! Controller bring-up, mode transitions and register programming
//!
//! [`Dsi`] owns the register window and the reference clock, mirrors
//! the hardware enable state in software, and sequences the controller
//! through Off -> Normal bring-up and Normal <-> UltraLowPower
//! transitions. Register programming for one timing set always
//! completes before any dependent enable bit is written, and every
//! write sequence runs inside a critical section so an interrupt-driven
//! status clear cannot fragment it. Settle waits happen between
//! sections, never inside them.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::clock::ClockPlan;
use crate::config::{PanelVideoMode, PixelFormat, VideoModeClass};
use crate::error::Error;
use crate::interface::{DsiInterface, ReferenceClock};
use crate::irq::{StatusBits, StatusPolicy};
use crate::registers as regs;
use crate::timing::{DpiCounts, PhyTimingSet, TimingOverrides};

/// Settle wait after clearing a link left enabled by a prior boot stage
const FORCED_ULP_SETTLE_MS: u32 = 50;

/// Settle wait after asserting the display front-end reset
const DFE_RESET_SETTLE_MS: u32 = 2;

/// Panel standby-exit wait after the peripheral is turned on
const STANDBY_EXIT_MS: u32 = 120;

/// Controller power state, mirrored in software
///
/// The mirror avoids redundant device-ready reads; it is authoritative
/// only while this handle owns the register window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    /// Not initialized, clock may be off
    #[default]
    Off,
    /// Link powered down to minimal standby
    UltraLowPower,
    /// Link up, video mode active
    Normal,
}

/// Clock plan and derived timing, replaced only as one unit
///
/// A partially updated plan must never be observable by the register
/// programming, so the three pieces live and move together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkTiming {
    /// Resolved clock plan
    pub plan: ClockPlan,
    /// Derived D-PHY byte-clock counts
    pub phy: PhyTimingSet,
    /// Derived DPI register counts
    pub dpi: DpiCounts,
}

/// One entry of a register snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterEntry {
    /// Register name from the controller documentation
    pub name: &'static str,
    /// Byte offset into the register window
    pub offset: u32,
    /// Value read
    pub value: u32,
}

/// Number of named registers in a snapshot
pub const REGISTER_COUNT: usize = regs::REGISTER_NAMES.len();

/// Read-only snapshot of every named register
///
/// The [`core::fmt::Display`] impl renders the textual dump exposed
/// through the platform's debug filesystem.
#[derive(Clone, Copy, Debug)]
pub struct RegisterSnapshot {
    /// Entries in documentation order
    pub entries: [RegisterEntry; REGISTER_COUNT],
}

impl core::fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "=================================")?;
        for entry in &self.entries {
            writeln!(
                f,
                "{}: {:#04x} {:#010x}",
                entry.name, entry.offset, entry.value
            )?;
        }
        writeln!(f, "=================================")
    }
}

/// MIPI DSI link controller
///
/// Generic over the register window ([`DsiInterface`]) and the
/// reference clock provider ([`ReferenceClock`]). One instance per
/// controller; mode-transition requests come from a single caller
/// while [`Dsi::service_interrupt`] may run from the interrupt context.
pub struct Dsi<I, C>
where
    I: DsiInterface,
    C: ReferenceClock,
{
    /// Register window
    interface: I,
    /// D-PHY reference clock
    ref_clk: C,
    /// Fixed panel video mode, set once at attach
    mode: PanelVideoMode,
    /// Empirical override selection
    overrides: TimingOverrides,
    /// Clock plan and derived timing, absent until first bring-up
    timing: Option<LinkTiming>,
    /// Software mirror of the hardware enable state
    state: ControllerState,
    /// Whether the reference clock is currently enabled
    clock_enabled: bool,
}

impl<I, C> Dsi<I, C>
where
    I: DsiInterface,
    C: ReferenceClock,
{
    /// Create a controller handle in the `Off` state
    ///
    /// Uses the HX8369A empirical override table; see
    /// [`Dsi::with_overrides`] to select pure formula output.
    pub fn new(interface: I, ref_clk: C, mode: PanelVideoMode) -> Self {
        Self::with_overrides(interface, ref_clk, mode, TimingOverrides::HX8369A)
    }

    /// Create a controller handle with an explicit override selection
    pub fn with_overrides(
        interface: I,
        ref_clk: C,
        mode: PanelVideoMode,
        overrides: TimingOverrides,
    ) -> Self {
        Self {
            interface,
            ref_clk,
            mode,
            overrides,
            timing: None,
            state: ControllerState::Off,
            clock_enabled: false,
        }
    }

    /// Current controller state
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Clock plan and timing from the last bring-up, if any
    pub fn timing(&self) -> Option<&LinkTiming> {
        self.timing.as_ref()
    }

    /// The fixed panel video mode this controller was attached with
    pub fn mode(&self) -> &PanelVideoMode {
        &self.mode
    }

    /// Full Off -> Normal bring-up
    ///
    /// Enables the reference clock, recovers from any link state left
    /// by a prior boot-stage initializer, recomputes the clock plan and
    /// D-PHY timing as one unit, programs the full register set in
    /// order and enables the link. Idempotent: a repeated call with the
    /// same mode programs bit-identical register values.
    ///
    /// A clamped DDR frequency is recovered locally (logged, bring-up
    /// proceeds); the only failure is a missing reference clock, which
    /// leaves the controller `Off`.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if !self.clock_enabled {
            self.ref_clk.enable()?;
            self.clock_enabled = true;
        }

        // A prior boot-stage loader may have left the link enabled;
        // drop to ultra-low-power first so bring-up always starts from
        // a known-clean hardware state.
        let ready = critical_section::with(|_| {
            self.interface.read_register(regs::DEVICE_READY)
        });
        if ready & regs::DEVICE_ENABLE != 0 {
            debug!("link left enabled by prior boot stage, forcing ULP");
            self.write_ulp_sequence();
            delay.delay_ms(FORCED_ULP_SETTLE_MS);
        }

        let (plan, config_err) = ClockPlan::resolve(&self.mode);
        if let Some(e) = config_err {
            warn!("{e}");
        }
        let phy = PhyTimingSet::derive(&plan, &self.overrides);
        let dpi = DpiCounts::derive(&plan, &self.mode.dpi, &self.overrides);
        self.timing = Some(LinkTiming { plan, phy, dpi });

        critical_section::with(|_| {
            Self::program_link_config(&mut self.interface, &self.mode);
            Self::program_base_timeouts(&mut self.interface);
            Self::program_dpi(&mut self.interface, &dpi);
            Self::program_phy(&mut self.interface, &phy);
            self.interface
                .write_register(regs::TRIM1, regs::pack_trim1(plan.pll_div_ratio));
        });

        critical_section::with(|_| {
            self.interface
                .write_register(regs::RST_ENABLE_DFE, regs::DFE_RST_ENABLE);
        });
        delay.delay_ms(DFE_RESET_SETTLE_MS);

        critical_section::with(|_| {
            self.interface
                .write_register(regs::DEVICE_READY, regs::DEVICE_ENABLE);
            self.interface
                .write_register(regs::DPI_CONTROL, regs::TURN_ON_PERIPHERAL);
        });
        delay.delay_ms(STANDBY_EXIT_MS);

        self.state = ControllerState::Normal;
        info!(
            "link up: {} MHz DDR, {} lanes, {} bpp",
            plan.ddr_mhz,
            self.mode.lanes.count(),
            plan.bits_per_pixel
        );
        Ok(())
    }

    /// Enter ultra-low-power mode
    ///
    /// Peripheral off, then device-ready cleared. Stored timing is
    /// untouched and remains valid for the next [`Dsi::enter_normal`].
    pub fn enter_low_power(&mut self) {
        self.write_ulp_sequence();
        self.state = ControllerState::UltraLowPower;
        debug!("entered ultra-low-power mode");
    }

    /// Return to normal mode from ultra-low-power
    ///
    /// Re-asserts the data-path reset, the device-ready bit and the
    /// peripheral-on bit. Does not recompute the clock plan or timing;
    /// they stay valid as long as the panel mode is unchanged.
    pub fn enter_normal(&mut self) {
        critical_section::with(|_| {
            self.interface
                .write_register(regs::RST_ENABLE_DFE, regs::DFE_RST_ENABLE);
            self.interface
                .write_register(regs::DEVICE_READY, regs::DEVICE_ENABLE);
            self.interface
                .write_register(regs::DPI_CONTROL, regs::TURN_ON_PERIPHERAL);
        });
        self.state = ControllerState::Normal;
        debug!("entered normal mode");
    }

    /// Handle a mode-switch request from the platform control surface
    ///
    /// `0` requests normal mode, `1` requests ultra-low-power. Any
    /// other value is rejected with no state change.
    pub fn set_mode_request(&mut self, value: u32) -> Result<(), Error> {
        match value {
            0 => {
                self.enter_normal();
                Ok(())
            }
            1 => {
                self.enter_low_power();
                Ok(())
            }
            _ => {
                warn!("rejecting invalid mode request: {value}");
                Err(Error::InvalidRequest { value })
            }
        }
    }

    /// Suspend/freeze hook: drop the link to ultra-low-power
    pub fn suspend(&mut self) {
        self.enter_low_power();
    }

    /// Resume hook: bring the link back to normal mode
    pub fn resume(&mut self) {
        self.enter_normal();
    }

    /// Read the interrupt status register without clearing it
    pub fn read_status(&mut self) -> StatusBits {
        StatusBits(critical_section::with(|_| {
            self.interface.read_register(regs::IRQ_STATUS)
        }))
    }

    /// Service a pending interrupt
    ///
    /// Reads the status register and writes the value back; each set
    /// bit clears itself (write-1-to-clear). The captured bits are
    /// handed to `policy` and returned.
    pub fn service_interrupt<P: StatusPolicy>(&mut self, policy: &mut P) -> StatusBits {
        let status = StatusBits(critical_section::with(|_| {
            let v = self.interface.read_register(regs::IRQ_STATUS);
            self.interface.write_register(regs::IRQ_STATUS, v);
            v
        }));
        policy.on_status(status);
        status
    }

    /// Snapshot the current value of every named register
    pub fn snapshot(&mut self) -> RegisterSnapshot {
        let mut entries = [RegisterEntry {
            name: "",
            offset: 0,
            value: 0,
        }; REGISTER_COUNT];
        critical_section::with(|_| {
            for (entry, &(name, offset)) in entries.iter_mut().zip(regs::REGISTER_NAMES) {
                *entry = RegisterEntry {
                    name,
                    offset,
                    value: self.interface.read_register(offset),
                };
            }
        });
        RegisterSnapshot { entries }
    }

    /// Detach: disable the reference clock and return the resources
    ///
    /// No teardown writes are required beyond releasing the clock; the
    /// terminal state is `Off`.
    pub fn release(mut self) -> (I, C) {
        if self.clock_enabled {
            self.ref_clk.disable();
        }
        (self.interface, self.ref_clk)
    }

    /// Peripheral off, then device-ready cleared
    fn write_ulp_sequence(&mut self) {
        critical_section::with(|_| {
            self.interface
                .write_register(regs::DPI_CONTROL, regs::TURN_OFF_PERIPHERAL);
            self.interface.write_register(regs::DEVICE_READY, 0);
        });
    }

    /// Function program, video mode format and protocol policy registers
    fn program_link_config(interface: &mut I, mode: &PanelVideoMode) {
        let format = match mode.format {
            PixelFormat::Rgb565 => regs::FMT_RGB565,
            PixelFormat::Rgb666 => regs::FMT_RGB666,
            PixelFormat::Rgb888 => regs::FMT_RGB888,
        };
        let func_prg = (mode.lanes.count() << regs::FUNC_PRG_LANES_SHIFT)
            | (u32::from(mode.virtual_channel) << regs::FUNC_PRG_CHANNEL_SHIFT)
            | (format << regs::FUNC_PRG_FORMAT_SHIFT);
        interface.write_register(regs::FUNC_PRG, func_prg);

        let vm_format = match mode.mode_class {
            VideoModeClass::Burst => regs::BURST_MODE,
            VideoModeClass::NonBurstSyncPulse => regs::NON_BURST_WITH_SYNC_PULSES,
        };
        interface.write_register(regs::VIDEO_MODE_FORMAT, vm_format);
        interface.write_register(regs::CLK_EOT, regs::DISABLE_VIDEO_BTA);
        interface.write_register(regs::AUTO_ERR_REC, regs::ECC_MUL_ERR_CLR);
    }

    /// Fixed protocol timeout values
    fn program_base_timeouts(interface: &mut I) {
        interface.write_register(regs::HS_TX_TIMEOUT, regs::HS_TX_TIMEOUT_VALUE);
        interface.write_register(regs::LP_RX_TIMEOUT, regs::LP_RX_TIMEOUT_VALUE);
        interface.write_register(regs::TURN_AROUND_TIMEOUT, regs::TURN_AROUND_TIMEOUT_VALUE);
        interface.write_register(regs::DEVICE_RESET, regs::DEVICE_RESET_VALUE);
        interface.write_register(regs::INIT_COUNT, regs::INIT_COUNT_VALUE);
    }

    /// DPI resolution and sync/porch/active counts
    fn program_dpi(interface: &mut I, dpi: &DpiCounts) {
        interface.write_register(
            regs::DPI_RESOLUTION,
            regs::pack_halves(dpi.h_resolution as u16, dpi.v_resolution as u16),
        );
        interface.write_register(regs::HSYNC_COUNT, dpi.hsync_count);
        interface.write_register(regs::HORIZ_BACK_PORCH_COUNT, dpi.hbp_count);
        interface.write_register(regs::HORIZ_FRONT_PORCH_COUNT, dpi.hfp_count);
        interface.write_register(regs::HORIZ_ACTIVE_AREA_COUNT, dpi.haa_count);
        interface.write_register(regs::VSYNC_COUNT, dpi.vsync_lines);
        interface.write_register(regs::VERT_BACK_PORCH_COUNT, dpi.vbp_lines);
        interface.write_register(regs::VERT_FRONT_PORCH_COUNT, dpi.vfp_lines);
    }

    /// D-PHY lane counts, low-power divider and switch-over counters
    fn program_phy(interface: &mut I, phy: &PhyTimingSet) {
        interface.write_register(
            regs::DPHY_PARAM,
            regs::pack_bytes([
                phy.dln_hs_prepare as u8,
                phy.dln_hs_zero as u8,
                phy.dln_hs_trail as u8,
                phy.dln_hs_exit as u8,
            ]),
        );
        interface.write_register(
            regs::CLK_LANE_TIMING_PARAM,
            regs::pack_bytes([
                phy.cln_prepare as u8,
                phy.cln_zero as u8,
                phy.cln_trail as u8,
                phy.cln_exit as u8,
            ]),
        );
        interface.write_register(regs::LP_BYTECLK, phy.lp_byteclk);
        interface.write_register(regs::HIGH_LOW_SWITCH_COUNT, phy.high_low_switch);
        interface.write_register(
            regs::CLK_LANE_SWT,
            regs::pack_halves(phy.hs_to_lp_switch as u16, phy.lp_to_hs_switch as u16),
        );
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::format;
    use alloc::vec::Vec;

    use super::*;
    use crate::config::Builder;
    use crate::error::ResourceError;
    use crate::irq::ClearOnly;

    /// In-memory register file recording every write in order
    struct MockInterface {
        regs: [u32; 64],
        writes: Vec<(u32, u32)>,
    }

    impl MockInterface {
        fn new() -> Self {
            Self {
                regs: [0; 64],
                writes: Vec::new(),
            }
        }

        fn with_preset(offset: u32, value: u32) -> Self {
            let mut mock = Self::new();
            mock.regs[offset as usize / 4] = value;
            mock
        }
    }

    impl DsiInterface for MockInterface {
        fn write_register(&mut self, offset: u32, value: u32) {
            self.regs[offset as usize / 4] = value;
            self.writes.push((offset, value));
        }

        fn read_register(&mut self, offset: u32) -> u32 {
            self.regs[offset as usize / 4]
        }
    }

    struct MockClock {
        enabled: bool,
        fail: bool,
    }

    impl MockClock {
        fn new() -> Self {
            Self {
                enabled: false,
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                enabled: false,
                fail: true,
            }
        }
    }

    impl ReferenceClock for MockClock {
        fn enable(&mut self) -> Result<(), ResourceError> {
            if self.fail {
                return Err(ResourceError::ClockUnavailable);
            }
            self.enabled = true;
            Ok(())
        }

        fn disable(&mut self) {
            self.enabled = false;
        }

        fn rate_mhz(&self) -> u32 {
            144
        }
    }

    struct MockDelay {
        total_ns: u64,
    }

    impl MockDelay {
        fn new() -> Self {
            Self { total_ns: 0 }
        }
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn new_dsi(interface: MockInterface) -> Dsi<MockInterface, MockClock> {
        let mode = Builder::new().build().unwrap();
        Dsi::new(interface, MockClock::new(), mode)
    }

    #[test]
    fn init_brings_link_to_normal() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        assert_eq!(dsi.state(), ControllerState::Off);
        dsi.init(&mut delay).unwrap();
        assert_eq!(dsi.state(), ControllerState::Normal);

        let (interface, clock) = dsi.release();
        assert!(!clock.enabled);
        let regfile = &interface.regs;
        assert_eq!(regfile[regs::DEVICE_READY as usize / 4], regs::DEVICE_ENABLE);
        assert_eq!(
            regfile[regs::DPI_CONTROL as usize / 4],
            regs::TURN_ON_PERIPHERAL
        );
        // 2 lanes, channel 0, RGB888
        assert_eq!(regfile[regs::FUNC_PRG as usize / 4], 2 | (0x4 << 7));
        assert_eq!(
            regfile[regs::VIDEO_MODE_FORMAT as usize / 4],
            regs::NON_BURST_WITH_SYNC_PULSES
        );
        assert_eq!(
            regfile[regs::DPI_RESOLUTION as usize / 4],
            480 | (800 << 16)
        );
        // HX8369A overrides pin the DPI horizontal counts
        assert_eq!(regfile[regs::HSYNC_COUNT as usize / 4], 15);
        assert_eq!(regfile[regs::HORIZ_ACTIVE_AREA_COUNT as usize / 4], 720);
        assert_eq!(regfile[regs::HIGH_LOW_SWITCH_COUNT as usize / 4], 101);
        assert_eq!(
            regfile[regs::CLK_LANE_SWT as usize / 4],
            89 | (162 << 16)
        );
        // PLL ratio 144/12 = 12
        assert_eq!(
            regfile[regs::TRIM1 as usize / 4],
            regs::pack_trim1(12)
        );
    }

    #[test]
    fn ordered_writes_finish_timing_before_enable() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let (interface, _) = dsi.release();

        let ready_pos = interface
            .writes
            .iter()
            .position(|&(o, v)| o == regs::DEVICE_READY && v == regs::DEVICE_ENABLE)
            .unwrap();
        for reg in [
            regs::DPHY_PARAM,
            regs::CLK_LANE_TIMING_PARAM,
            regs::LP_BYTECLK,
            regs::CLK_LANE_SWT,
            regs::TRIM1,
        ] {
            let pos = interface
                .writes
                .iter()
                .position(|&(o, _)| o == reg)
                .unwrap();
            assert!(pos < ready_pos, "register {reg:#x} written after enable");
        }
    }

    #[test]
    fn preset_ready_bit_forces_ulp_before_bring_up() {
        // Simulate a prior boot-stage loader leaving the link enabled.
        let interface = MockInterface::with_preset(regs::DEVICE_READY, regs::DEVICE_ENABLE);
        let mut dsi = new_dsi(interface);
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        assert_eq!(dsi.state(), ControllerState::Normal);

        let (interface, _) = dsi.release();
        // First writes are the forced ULP entry sequence.
        assert_eq!(
            interface.writes[0],
            (regs::DPI_CONTROL, regs::TURN_OFF_PERIPHERAL)
        );
        assert_eq!(interface.writes[1], (regs::DEVICE_READY, 0));
        // Ready is set exactly once after the forced clear.
        let enables = interface
            .writes
            .iter()
            .filter(|&&(o, v)| o == regs::DEVICE_READY && v == regs::DEVICE_ENABLE)
            .count();
        assert_eq!(enables, 1);
    }

    #[test]
    fn clean_boot_skips_forced_ulp() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let (interface, _) = dsi.release();
        assert!(
            !interface
                .writes
                .iter()
                .any(|&(o, v)| o == regs::DEVICE_READY && v == 0)
        );
    }

    #[test]
    fn low_power_clears_ready_and_peripheral() {
        // Scenario C: normal then immediately low power, independent of
        // the stored clock plan.
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        dsi.enter_normal();
        dsi.enter_low_power();
        assert_eq!(dsi.state(), ControllerState::UltraLowPower);

        let (interface, _) = dsi.release();
        assert_eq!(interface.regs[regs::DEVICE_READY as usize / 4], 0);
        assert_eq!(
            interface.regs[regs::DPI_CONTROL as usize / 4],
            regs::TURN_OFF_PERIPHERAL
        );
    }

    #[test]
    fn resume_restores_normal_without_recompute() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let timing_before = *dsi.timing().unwrap();
        dsi.suspend();
        dsi.resume();
        assert_eq!(dsi.state(), ControllerState::Normal);
        assert_eq!(*dsi.timing().unwrap(), timing_before);

        let (interface, _) = dsi.release();
        assert_eq!(
            interface.regs[regs::DEVICE_READY as usize / 4],
            regs::DEVICE_ENABLE
        );
        assert_eq!(
            interface.regs[regs::DPI_CONTROL as usize / 4],
            regs::TURN_ON_PERIPHERAL
        );
    }

    #[test]
    fn repeated_init_is_bit_identical() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let first = dsi.snapshot();
        dsi.init(&mut delay).unwrap();
        let second = dsi.snapshot();
        for (a, b) in first.entries.iter().zip(second.entries.iter()) {
            assert_eq!(a, b, "register {} differs between inits", a.name);
        }
    }

    #[test]
    fn invalid_mode_request_is_rejected_without_state_change() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let before = dsi.state();
        let result = dsi.set_mode_request(7);
        assert_eq!(result, Err(Error::InvalidRequest { value: 7 }));
        assert_eq!(dsi.state(), before);

        assert!(dsi.set_mode_request(1).is_ok());
        assert_eq!(dsi.state(), ControllerState::UltraLowPower);
        assert!(dsi.set_mode_request(0).is_ok());
        assert_eq!(dsi.state(), ControllerState::Normal);
    }

    #[test]
    fn missing_clock_aborts_attach_in_off_state() {
        let mode = Builder::new().build().unwrap();
        let mut dsi = Dsi::new(MockInterface::new(), MockClock::failing(), mode);
        let mut delay = MockDelay::new();
        let result = dsi.init(&mut delay);
        assert_eq!(
            result,
            Err(Error::Resource(ResourceError::ClockUnavailable))
        );
        assert_eq!(dsi.state(), ControllerState::Off);
        assert!(dsi.timing().is_none());

        let (interface, _) = dsi.release();
        assert!(interface.writes.is_empty());
    }

    #[test]
    fn service_interrupt_clears_by_writing_back() {
        let pending = StatusBits::SOT_ERROR | StatusBits::OUT_FIFO_UNDERRUN;
        let interface = MockInterface::with_preset(regs::IRQ_STATUS, pending);
        let mut dsi = new_dsi(interface);
        let status = dsi.service_interrupt(&mut ClearOnly);
        assert_eq!(status, StatusBits(pending));

        let (interface, _) = dsi.release();
        let last = interface.writes.last().unwrap();
        assert_eq!(*last, (regs::IRQ_STATUS, pending));
    }

    #[test]
    fn settle_waits_run_between_write_sections() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let expected =
            u64::from(DFE_RESET_SETTLE_MS + STANDBY_EXIT_MS) * 1_000_000;
        assert_eq!(delay.total_ns, expected);
    }

    #[test]
    fn snapshot_renders_named_dump() {
        let mut dsi = new_dsi(MockInterface::new());
        let mut delay = MockDelay::new();
        dsi.init(&mut delay).unwrap();
        let snapshot = dsi.snapshot();
        assert_eq!(snapshot.entries.len(), REGISTER_COUNT);
        let text = format!("{snapshot}");
        assert!(text.contains("DEVICE_READY: 0x00 0x00000001"));
        assert!(text.contains("DPHY_PARAM"));
        assert!(text.contains("TRIM1"));
    }
}
