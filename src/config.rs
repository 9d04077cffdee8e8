//! Panel video mode description and builder

pub use crate::error::BuilderError;

/// Pixel format on the DSI link
///
/// Determines the bits-per-pixel factor in the DDR line frequency
/// calculation and the format field of the function program register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    /// 16 bpp, RGB565
    Rgb565,
    /// 18 bpp, RGB666
    Rgb666,
    /// 24 bpp, RGB888
    #[default]
    Rgb888,
}

impl PixelFormat {
    /// Bits per pixel carried on the link
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Rgb565 => 16,
            Self::Rgb666 => 18,
            Self::Rgb888 => 24,
        }
    }
}

/// Video mode class
///
/// Burst mode doubles the byte throughput requirement relative to
/// non-burst with sync pulses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoModeClass {
    /// Burst mode
    Burst,
    /// Non-burst mode with sync pulses
    #[default]
    NonBurstSyncPulse,
}

impl VideoModeClass {
    /// Throughput multiplier used by the DDR frequency calculation
    pub fn multiplier(self) -> u32 {
        match self {
            Self::Burst => 2,
            Self::NonBurstSyncPulse => 1,
        }
    }
}

/// Number of active data lanes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaneCount {
    /// Single data lane
    One,
    /// Two data lanes
    #[default]
    Two,
}

impl LaneCount {
    /// Lane count as an integer
    pub fn count(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// DPI (parallel pixel interface) timing in pixel-clock units
///
/// Horizontal values are in pixels, vertical values in lines. All
/// counts are the real interval lengths, not the minus-one register
/// encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DpiTiming {
    /// Active width in pixels
    pub h_active: u16,
    /// Horizontal sync pulse width in pixels
    pub h_sync: u16,
    /// Horizontal back porch in pixels
    pub h_back_porch: u16,
    /// Horizontal front porch in pixels
    pub h_front_porch: u16,
    /// Active height in lines
    pub v_active: u16,
    /// Vertical sync pulse width in lines
    pub v_sync: u16,
    /// Vertical back porch in lines
    pub v_back_porch: u16,
    /// Vertical front porch in lines
    pub v_front_porch: u16,
}

impl Default for DpiTiming {
    /// Timing of the 480x800 reference panel
    fn default() -> Self {
        Self {
            h_active: 480,
            h_sync: 12,
            h_back_porch: 12,
            h_front_porch: 12,
            v_active: 800,
            v_sync: 6,
            v_back_porch: 6,
            v_front_porch: 6,
        }
    }
}

/// Fixed panel video mode description
///
/// Immutable once built; the controller derives its whole clock plan and
/// D-PHY timing set from this plus the reference clock parameters.
/// Use [`Builder`] to construct one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelVideoMode {
    /// Active data lane count
    pub lanes: LaneCount,
    /// Link pixel format
    pub format: PixelFormat,
    /// Video mode class
    pub mode_class: VideoModeClass,
    /// Virtual channel number (0..=3)
    pub virtual_channel: u8,
    /// DPI timing
    pub dpi: DpiTiming,
    /// Reference clock rate in MHz feeding the pixel-clock divider
    pub ref_clk_mhz: u32,
    /// Pixel clock divider; pclk = ref_clk / (divider + 1)
    pub pclk_divider: u32,
}

impl PanelVideoMode {
    /// Pixel clock frequency in MHz
    pub fn pclk_mhz(&self) -> u32 {
        self.ref_clk_mhz / self.pclk_divider.saturating_add(1)
    }
}

/// Builder for [`PanelVideoMode`]
///
/// Defaults describe the reference configuration: 480x800 panel, two
/// lanes, RGB888, non-burst with sync pulses, 144 MHz reference clock
/// divided by 6 for a 24 MHz pixel clock.
///
/// # Example
///
/// ```
/// use mcom02_dsi::{Builder, PixelFormat};
///
/// let mode = match Builder::new().format(PixelFormat::Rgb888).build() {
///     Ok(mode) => mode,
///     Err(_) => return,
/// };
/// assert_eq!(mode.pclk_mhz(), 24);
/// ```
#[must_use]
pub struct Builder {
    /// Active data lane count
    lanes: LaneCount,
    /// Link pixel format
    format: PixelFormat,
    /// Video mode class
    mode_class: VideoModeClass,
    /// Virtual channel number
    virtual_channel: u8,
    /// DPI timing
    dpi: DpiTiming,
    /// Reference clock rate in MHz
    ref_clk_mhz: u32,
    /// Pixel clock divider
    pclk_divider: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            lanes: LaneCount::Two,
            format: PixelFormat::Rgb888,
            mode_class: VideoModeClass::NonBurstSyncPulse,
            virtual_channel: 0,
            dpi: DpiTiming::default(),
            // VPOUT AXI-derived reference, divided to a 24 MHz pixel clock
            ref_clk_mhz: 144,
            pclk_divider: 5,
        }
    }
}

impl Builder {
    /// Create a new Builder with reference-panel defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active data lane count
    pub fn lanes(mut self, lanes: LaneCount) -> Self {
        self.lanes = lanes;
        self
    }

    /// Set the link pixel format
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the video mode class
    pub fn mode_class(mut self, mode_class: VideoModeClass) -> Self {
        self.mode_class = mode_class;
        self
    }

    /// Set the virtual channel number (0..=3)
    pub fn virtual_channel(mut self, channel: u8) -> Self {
        self.virtual_channel = channel;
        self
    }

    /// Set the DPI timing
    pub fn dpi(mut self, dpi: DpiTiming) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the reference clock rate in MHz
    pub fn ref_clk_mhz(mut self, mhz: u32) -> Self {
        self.ref_clk_mhz = mhz;
        self
    }

    /// Set the pixel clock divider; pclk = ref_clk / (divider + 1)
    pub fn pclk_divider(mut self, divider: u32) -> Self {
        self.pclk_divider = divider;
        self
    }

    /// Build the video mode description
    ///
    /// # Errors
    ///
    /// - `BuilderError::InvalidDivider` if the divider leaves a pixel
    ///   clock below 1 MHz (all later timing arithmetic divides by it)
    /// - `BuilderError::InvalidDpiTiming` if the active area is zero
    /// - `BuilderError::InvalidVirtualChannel` if the channel is > 3
    pub fn build(self) -> Result<PanelVideoMode, BuilderError> {
        if self.ref_clk_mhz / self.pclk_divider.saturating_add(1) == 0 {
            return Err(BuilderError::InvalidDivider {
                ref_clk_mhz: self.ref_clk_mhz,
                divider: self.pclk_divider,
            });
        }
        if self.dpi.h_active == 0 || self.dpi.v_active == 0 {
            return Err(BuilderError::InvalidDpiTiming {
                h_active: self.dpi.h_active,
                v_active: self.dpi.v_active,
            });
        }
        if self.virtual_channel > 3 {
            return Err(BuilderError::InvalidVirtualChannel {
                channel: self.virtual_channel,
            });
        }
        Ok(PanelVideoMode {
            lanes: self.lanes,
            format: self.format,
            mode_class: self.mode_class,
            virtual_channel: self.virtual_channel,
            dpi: self.dpi,
            ref_clk_mhz: self.ref_clk_mhz,
            pclk_divider: self.pclk_divider,
        })
    }
}
