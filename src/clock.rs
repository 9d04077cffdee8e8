//! Clock plan resolution
//!
//! Derives the pixel-clock, byte-clock and DDR line frequencies from a
//! [`PanelVideoMode`], integer arithmetic only. The DDR frequency is
//! rounded up to the reference divider granularity (12 MHz steps) and
//! clamped to the controller maximum; the clamp is the one non-fatal
//! configuration error this driver knows about.

use crate::config::PanelVideoMode;
use crate::error::ConfigError;
use crate::math::round_up_to_multiple;

/// Maximum DDR line frequency the controller PLL can produce, in MHz
pub const DDR_MHZ_MAX: u32 = 600;

/// Reference divider granularity of the DDR PLL, in MHz
pub const DDR_MHZ_STEP: u32 = 12;

/// Minimum PLL divider ratio accepted by the TRIM1 register
pub const PLL_DIV_RATIO_MIN: u32 = 1;

/// Maximum PLL divider ratio accepted by the TRIM1 register
pub const PLL_DIV_RATIO_MAX: u32 = 50;

/// Resolved clock plan for one link configuration
///
/// Recomputed on every full bring-up and stored next to the derived
/// [`PhyTimingSet`](crate::timing::PhyTimingSet) as one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockPlan {
    /// Pixel clock frequency in MHz
    pub pclk_mhz: u32,
    /// Pixel clock period in ns (1000 / pclk, integer)
    pub t_pclk_ns: u32,
    /// Bits per pixel of the configured format
    pub bits_per_pixel: u32,
    /// DDR line frequency as computed from the mode, in MHz
    pub raw_ddr_mhz: u32,
    /// DDR line frequency rounded up to [`DDR_MHZ_STEP`] and clamped
    /// to [`DDR_MHZ_MAX`], in MHz
    pub ddr_mhz: u32,
    /// Byte clock period in ns (4000 / raw DDR frequency, integer)
    pub t_byteclk_ns: u32,
    /// PLL divider ratio (rounded DDR frequency / 12, clamped)
    pub pll_div_ratio: u32,
    /// Whether the rounded DDR frequency had to be clamped
    pub clamped: bool,
}

impl ClockPlan {
    /// Resolve a clock plan from a panel video mode
    ///
    /// Each data lane carries the high and low halves of a DDR bit
    /// alternately, so the per-lane line rate is
    /// `pclk * bpp * multiplier / (2 * lanes)` (integer floor).
    ///
    /// Returns the plan together with the clamp condition, if any.
    /// The clamp is non-fatal: the plan is still usable and callers are
    /// expected to proceed with bring-up after logging it.
    pub fn resolve(mode: &PanelVideoMode) -> (Self, Option<ConfigError>) {
        let pclk_mhz = mode.pclk_mhz();
        let t_pclk_ns = 1000 / pclk_mhz;
        let bits_per_pixel = mode.format.bits_per_pixel();

        let raw_ddr_mhz = pclk_mhz * bits_per_pixel * mode.mode_class.multiplier()
            / (2 * mode.lanes.count());

        let rounded = round_up_to_multiple(raw_ddr_mhz, DDR_MHZ_STEP);
        let (ddr_mhz, error) = if rounded > DDR_MHZ_MAX {
            (
                DDR_MHZ_MAX,
                Some(ConfigError::DdrClockOutOfRange {
                    computed: rounded,
                    max: DDR_MHZ_MAX,
                }),
            )
        } else {
            (rounded, None)
        };

        // The byte-clock period follows the raw frequency; the rounded
        // value feeds the PLL and the D-PHY interval tables.
        let t_byteclk_ns = 4000 / raw_ddr_mhz;

        let pll_div_ratio = (ddr_mhz / DDR_MHZ_STEP)
            .clamp(PLL_DIV_RATIO_MIN, PLL_DIV_RATIO_MAX);

        (
            Self {
                pclk_mhz,
                t_pclk_ns,
                bits_per_pixel,
                raw_ddr_mhz,
                ddr_mhz,
                t_byteclk_ns,
                pll_div_ratio,
                clamped: error.is_some(),
            },
            error,
        )
    }
}
