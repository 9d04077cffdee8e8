//! D-PHY and DPI timing calculation
//!
//! Converts the D-PHY specification's nanosecond interval table into
//! counts of byte-clock periods, separately for the data lane(s) and
//! the shared clock lane, plus the DPI horizontal counts re-expressed
//! in the byte-clock domain.
//!
//! The interval minimums come from table 14 of the MIPI D-PHY v1.00
//! specification, taken either mid-range or with a small margin above
//! the lower bound. UI below is any DDR half cycle: `UI = 500 / ddr`.
//!
//! All arithmetic is integer-only. Several counts legitimately come out
//! negative at high DDR frequencies, where the declared margin absorbs
//! the rounding error; every count is clamped to zero before it reaches
//! a register.

use crate::clock::ClockPlan;
use crate::config::DpiTiming;
use crate::math::{ceil_div, ceil_div_i32, round_div};

/// HS exit interval minimum plus margin, in ns
const HS_EXIT_NS: u32 = 115;

/// Clock lane prepare interval, in ns
const CLK_PREP_NS: u32 = 60;

/// Clock lane prepare + zero interval total, in ns
const CLK_PREP_ZERO_NS: u32 = 330;

/// Clock lane trail interval, in ns
const CLK_TRAIL_NS: u32 = 60;

/// Clock lane exit interval, in ns
const CLK_EXIT_NS: u32 = 60;

/// Direction factor: 1 for forward-direction HS mode, 4 for reverse
const HS_DIRECTION_FACTOR: u32 = 1;

/// Minimum horizontal back porch count, in byte-clock ticks
const HBP_COUNT_MIN: u32 = 4;

/// Minimum horizontal front porch count, in byte-clock ticks
const HFP_COUNT_MIN: u32 = 4;

/// Minimum vertical back porch, in lines
const VBP_LINES_MIN: u32 = 2;

/// Minimum vertical front porch, in lines
const VFP_LINES_MIN: u32 = 2;

/// Named empirical overrides for formula outputs
///
/// The integer formulas are known to drift from the values validated on
/// real hardware (the original bring-up was tuned against a HX8369A
/// panel), so selected outputs can be pinned to hand-tuned constants.
/// Which of the two is authoritative for a given clock plan has not
/// been established against the controller's full timing specification;
/// an override is therefore an explicit, named substitution rather than
/// a silent code path, and must not be trusted under clock plans it was
/// never validated on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimingOverrides {
    /// HS/LP switch count for the data lane
    pub high_low_switch: Option<u32>,
    /// HS to LP switch-over counter for the clock lane
    pub hs_to_lp_switch: Option<u32>,
    /// LP to HS switch-over counter for the clock lane
    pub lp_to_hs_switch: Option<u32>,
    /// DPI horizontal sync count, in byte-clock ticks
    pub dpi_hsync_count: Option<u32>,
    /// DPI horizontal back porch count, in byte-clock ticks
    pub dpi_hbp_count: Option<u32>,
    /// DPI horizontal front porch count, in byte-clock ticks
    pub dpi_hfp_count: Option<u32>,
    /// DPI horizontal active area count, in byte-clock ticks
    pub dpi_haa_count: Option<u32>,
}

impl TimingOverrides {
    /// Pure formula output, no substitutions
    pub const NONE: Self = Self {
        high_low_switch: None,
        hs_to_lp_switch: None,
        lp_to_hs_switch: None,
        dpi_hsync_count: None,
        dpi_hbp_count: None,
        dpi_hfp_count: None,
        dpi_haa_count: None,
    };

    /// Constants validated on the HX8369A reference panel
    /// (480x800, two lanes, RGB888, non-burst, 144 MHz DDR)
    pub const HX8369A: Self = Self {
        high_low_switch: Some(101),
        hs_to_lp_switch: Some(89),
        lp_to_hs_switch: Some(162),
        dpi_hsync_count: Some(15),
        dpi_hbp_count: Some(15),
        dpi_hfp_count: Some(15),
        dpi_haa_count: Some(720),
    };
}

/// Clamp a possibly-negative tick count to zero
fn clamp_zero(count: i32) -> u32 {
    count.max(0) as u32
}

/// Derived D-PHY bus timing, in byte-clock tick counts
///
/// The prepare/zero/trail/exit counts are register-biased: the hardware
/// counts the value as cycles beyond an implicit minimum, hence the
/// fixed 1- or 2-tick reduction applied after the division.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhyTimingSet {
    /// Data lane HS prepare count
    pub dln_hs_prepare: u32,
    /// Data lane HS zero count
    pub dln_hs_zero: u32,
    /// Data lane HS trail count
    pub dln_hs_trail: u32,
    /// Data lane HS exit count
    pub dln_hs_exit: u32,
    /// Clock lane prepare count
    pub cln_prepare: u32,
    /// Clock lane zero count
    pub cln_zero: u32,
    /// Clock lane HS trail count
    pub cln_trail: u32,
    /// Clock lane HS exit count
    pub cln_exit: u32,
    /// Byte-clock to low-power clock divider
    pub lp_byteclk: u32,
    /// HS/LP switch count for the data lane
    pub high_low_switch: u32,
    /// HS to LP switch-over counter for the clock lane
    pub hs_to_lp_switch: u32,
    /// LP to HS switch-over counter for the clock lane
    pub lp_to_hs_switch: u32,
}

impl PhyTimingSet {
    /// Derive the D-PHY timing set from a resolved clock plan
    pub fn derive(plan: &ClockPlan, overrides: &TimingOverrides) -> Self {
        let ddr = plan.ddr_mhz;
        let t_byteclk = plan.t_byteclk_ns;
        let n = HS_DIRECTION_FACTOR;

        // Interval table in ns, parameterized by UI = 500/ddr.
        let hs_prep_ns = 60 + ceil_div(4 * 500, ddr);
        let hs_zero_ns = 170 + ceil_div(10 * 500, ddr) - hs_prep_ns;
        let hs_trail_ns =
            ceil_div(n * 8 * 500, ddr).max(60 + ceil_div(n * 4 * 500, ddr)) + 30;

        // Data lane counts. The prepare interval is measured against a
        // half-period reference (9000/ddr), short enough that
        // round-to-nearest division applies instead of the ceiling.
        let dln_hs_prepare = clamp_zero(
            round_div(
                hs_prep_ns.abs_diff(round_div(9 * 1000, ddr)),
                t_byteclk,
            ) as i32
                - 1,
        );
        let dln_hs_zero = clamp_zero(ceil_div(hs_zero_ns, t_byteclk) as i32 - 1);
        let dln_hs_trail = clamp_zero(ceil_div(hs_trail_ns, t_byteclk) as i32 - 2);
        let dln_hs_exit = clamp_zero(ceil_div(HS_EXIT_NS, t_byteclk) as i32 - 1);

        // Clock lane counts; the clock lane has its own constant table
        // because its duty cycle differs from the data lane's.
        let clk_zero_ns = CLK_PREP_ZERO_NS - CLK_PREP_NS;
        let cln_prepare = clamp_zero(ceil_div(CLK_PREP_NS, t_byteclk) as i32 - 1);
        let cln_zero = clamp_zero(ceil_div(clk_zero_ns, t_byteclk) as i32 - 1);
        let cln_trail = clamp_zero(
            ceil_div_i32(
                CLK_TRAIL_NS as i32 - round_div(3 * 1000, ddr) as i32,
                t_byteclk as i32,
            ) + 3,
        );
        let cln_exit = clamp_zero(
            ceil_div_i32(
                CLK_EXIT_NS as i32 - round_div(2 * 1000, ddr) as i32,
                t_byteclk as i32,
            ) - 1,
        );

        let lp_byteclk = ceil_div(ddr, 12 * 4);

        // Switch-over counters bound how long the PHY stays in each
        // direction before flipping.
        let high_low_switch = overrides.high_low_switch.unwrap_or(
            4 * lp_byteclk + dln_hs_prepare + dln_hs_zero + 4 * t_byteclk,
        );
        let hs_to_lp_switch = overrides
            .hs_to_lp_switch
            .unwrap_or(cln_trail + cln_exit + 3 * t_byteclk);
        let lp_to_hs_switch = overrides.lp_to_hs_switch.unwrap_or(
            4 * lp_byteclk + cln_prepare + cln_zero + ceil_div(8 * 500, ddr) + 4 * t_byteclk,
        );

        Self {
            dln_hs_prepare,
            dln_hs_zero,
            dln_hs_trail,
            dln_hs_exit,
            cln_prepare,
            cln_zero,
            cln_trail,
            cln_exit,
            lp_byteclk,
            high_low_switch,
            hs_to_lp_switch,
            lp_to_hs_switch,
        }
    }
}

/// DPI timing re-expressed for the controller's register file
///
/// Horizontal counts convert from pixel-clock to byte-clock units
/// (ceiling division); vertical counts stay in lines with the
/// controller's minimum porch floors applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DpiCounts {
    /// Active width in pixels, as programmed in the resolution register
    pub h_resolution: u32,
    /// Active height in lines, as programmed in the resolution register
    pub v_resolution: u32,
    /// Horizontal sync count, in byte-clock ticks
    pub hsync_count: u32,
    /// Horizontal back porch count, in byte-clock ticks
    pub hbp_count: u32,
    /// Horizontal front porch count, in byte-clock ticks
    pub hfp_count: u32,
    /// Horizontal active area count, in byte-clock ticks
    pub haa_count: u32,
    /// Vertical sync width, in lines
    pub vsync_lines: u32,
    /// Vertical back porch, in lines
    pub vbp_lines: u32,
    /// Vertical front porch, in lines
    pub vfp_lines: u32,
}

impl DpiCounts {
    /// Derive the DPI register counts from the clock plan and pixel timing
    pub fn derive(plan: &ClockPlan, dpi: &DpiTiming, overrides: &TimingOverrides) -> Self {
        let t_pclk = plan.t_pclk_ns;
        let t_byteclk = plan.t_byteclk_ns;
        let h_ticks = |pixels: u16| ceil_div(u32::from(pixels) * t_pclk, t_byteclk);

        let hsync_count = overrides
            .dpi_hsync_count
            .unwrap_or_else(|| h_ticks(dpi.h_sync));
        let hbp_count = overrides
            .dpi_hbp_count
            .unwrap_or_else(|| h_ticks(dpi.h_back_porch).max(HBP_COUNT_MIN));
        let hfp_count = overrides
            .dpi_hfp_count
            .unwrap_or_else(|| h_ticks(dpi.h_front_porch).max(HFP_COUNT_MIN));
        let haa_count = overrides
            .dpi_haa_count
            .unwrap_or_else(|| h_ticks(dpi.h_active));

        Self {
            h_resolution: u32::from(dpi.h_active),
            v_resolution: u32::from(dpi.v_active),
            hsync_count,
            hbp_count,
            hfp_count,
            haa_count,
            vsync_lines: u32::from(dpi.v_sync),
            vbp_lines: u32::from(dpi.v_back_porch).max(VBP_LINES_MIN),
            vfp_lines: u32::from(dpi.v_front_porch).max(VFP_LINES_MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;

    fn plan_for_ddr(ddr_mhz: u32) -> ClockPlan {
        ClockPlan {
            pclk_mhz: 24,
            t_pclk_ns: 41,
            bits_per_pixel: 24,
            raw_ddr_mhz: ddr_mhz,
            ddr_mhz,
            t_byteclk_ns: 4000 / ddr_mhz,
            pll_div_ratio: (ddr_mhz / 12).clamp(1, 50),
            clamped: false,
        }
    }

    fn reference_plan() -> ClockPlan {
        let mode = Builder::new().build().unwrap();
        let (plan, _) = ClockPlan::resolve(&mode);
        plan
    }

    #[test]
    fn reference_plan_phy_counts() {
        // ddr = 144 MHz, t_byteclk = 27 ns, computed by hand from the
        // interval table.
        let phy = PhyTimingSet::derive(&reference_plan(), &TimingOverrides::NONE);
        assert_eq!(phy.dln_hs_prepare, 0); // formula yields -1, clamped
        assert_eq!(phy.dln_hs_zero, 4);
        assert_eq!(phy.dln_hs_trail, 2);
        assert_eq!(phy.dln_hs_exit, 4);
        assert_eq!(phy.cln_prepare, 2);
        assert_eq!(phy.cln_zero, 9);
        assert_eq!(phy.cln_trail, 5);
        assert_eq!(phy.cln_exit, 1);
        assert_eq!(phy.lp_byteclk, 3);
        // 4*lp + prep + zero + 4*t_byteclk, and the clock lane pair
        assert_eq!(phy.high_low_switch, 124);
        assert_eq!(phy.hs_to_lp_switch, 87);
        assert_eq!(phy.lp_to_hs_switch, 159);
    }

    #[test]
    fn overrides_replace_only_named_outputs() {
        let plan = reference_plan();
        let formula = PhyTimingSet::derive(&plan, &TimingOverrides::NONE);
        let pinned = PhyTimingSet::derive(&plan, &TimingOverrides::HX8369A);
        assert_eq!(pinned.high_low_switch, 101);
        assert_eq!(pinned.hs_to_lp_switch, 89);
        assert_eq!(pinned.lp_to_hs_switch, 162);
        // Lane counts are never overridden.
        assert_eq!(pinned.dln_hs_zero, formula.dln_hs_zero);
        assert_eq!(pinned.cln_trail, formula.cln_trail);
        assert_eq!(pinned.lp_byteclk, formula.lp_byteclk);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        // At 12 MHz DDR the clock lane exit margin goes negative:
        // 60 - round(2000/12) = -107 ns.
        let phy = PhyTimingSet::derive(&plan_for_ddr(12), &TimingOverrides::NONE);
        assert_eq!(phy.cln_exit, 0);

        // At high DDR the data lane prepare reference overtakes the
        // interval and the biased count lands below zero.
        let phy = PhyTimingSet::derive(&plan_for_ddr(144), &TimingOverrides::NONE);
        assert_eq!(phy.dln_hs_prepare, 0);
    }

    #[test]
    fn lp_byteclk_divider() {
        assert_eq!(
            PhyTimingSet::derive(&plan_for_ddr(144), &TimingOverrides::NONE).lp_byteclk,
            3
        );
        assert_eq!(
            PhyTimingSet::derive(&plan_for_ddr(48), &TimingOverrides::NONE).lp_byteclk,
            1
        );
        assert_eq!(
            PhyTimingSet::derive(&plan_for_ddr(49), &TimingOverrides::NONE).lp_byteclk,
            2
        );
    }

    #[test]
    fn dpi_counts_formula_and_minimum_floors() {
        let mode = Builder::new().build().unwrap();
        let (plan, _) = ClockPlan::resolve(&mode);
        let counts = DpiCounts::derive(&plan, &mode.dpi, &TimingOverrides::NONE);
        assert_eq!(counts.h_resolution, 480);
        assert_eq!(counts.v_resolution, 800);
        // 12 px * 41 ns / 27 ns, ceiling
        assert_eq!(counts.hsync_count, 19);
        assert_eq!(counts.hbp_count, 19);
        assert_eq!(counts.hfp_count, 19);
        // 480 px * 41 ns / 27 ns, ceiling
        assert_eq!(counts.haa_count, 729);
        assert_eq!(counts.vsync_lines, 6);
        assert_eq!(counts.vbp_lines, 6);
        assert_eq!(counts.vfp_lines, 6);
    }

    #[test]
    fn dpi_overrides_pin_reference_panel_counts() {
        let mode = Builder::new().build().unwrap();
        let (plan, _) = ClockPlan::resolve(&mode);
        let counts = DpiCounts::derive(&plan, &mode.dpi, &TimingOverrides::HX8369A);
        assert_eq!(counts.hsync_count, 15);
        assert_eq!(counts.hbp_count, 15);
        assert_eq!(counts.hfp_count, 15);
        assert_eq!(counts.haa_count, 720);
        // Resolution is never overridden.
        assert_eq!(counts.h_resolution, 480);
        assert_eq!(counts.v_resolution, 800);
    }

    #[test]
    fn vertical_porch_floors_apply() {
        let mode = Builder::new().build().unwrap();
        let (plan, _) = ClockPlan::resolve(&mode);
        let dpi = DpiTiming {
            v_back_porch: 1,
            v_front_porch: 0,
            ..mode.dpi
        };
        let counts = DpiCounts::derive(&plan, &dpi, &TimingOverrides::NONE);
        assert_eq!(counts.vbp_lines, VBP_LINES_MIN);
        assert_eq!(counts.vfp_lines, VFP_LINES_MIN);
    }
}
