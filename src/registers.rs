//! Controller register map and field packing
//!
//! All registers are 32 bits wide at word-aligned offsets from the
//! controller's MMIO window. Several pack four independently-scoped
//! byte-wide counts at bit offsets 0/8/16/24; the packing helpers here
//! keep that logic unit-testable away from any MMIO access.

// Control and status

/// Device ready / enable register
pub const DEVICE_READY: u32 = 0x00;
/// Interrupt status register (write-1-to-clear)
pub const IRQ_STATUS: u32 = 0x04;
/// Interrupt enable register
pub const IRQ_ENABLE: u32 = 0x08;
/// Function program register: lane count, pixel format, virtual channel
pub const FUNC_PRG: u32 = 0x0C;

// Protocol timeouts

/// High-speed transmit timeout
pub const HS_TX_TIMEOUT: u32 = 0x10;
/// Low-power receive timeout
pub const LP_RX_TIMEOUT: u32 = 0x14;
/// Bus turn-around timeout
pub const TURN_AROUND_TIMEOUT: u32 = 0x18;
/// Device reset timer
pub const DEVICE_RESET: u32 = 0x1C;

// DPI timing

/// DPI resolution: width in bits 0..16, height in bits 16..32
pub const DPI_RESOLUTION: u32 = 0x20;
/// Horizontal sync count, byte-clock ticks
pub const HSYNC_COUNT: u32 = 0x28;
/// Horizontal back porch count, byte-clock ticks
pub const HORIZ_BACK_PORCH_COUNT: u32 = 0x2C;
/// Horizontal front porch count, byte-clock ticks
pub const HORIZ_FRONT_PORCH_COUNT: u32 = 0x30;
/// Horizontal active area count, byte-clock ticks
pub const HORIZ_ACTIVE_AREA_COUNT: u32 = 0x34;
/// Vertical sync width, lines
pub const VSYNC_COUNT: u32 = 0x38;
/// Vertical back porch, lines
pub const VERT_BACK_PORCH_COUNT: u32 = 0x3C;
/// Vertical front porch, lines
pub const VERT_FRONT_PORCH_COUNT: u32 = 0x40;

// Link control

/// Data lane HS/LP switch count
pub const HIGH_LOW_SWITCH_COUNT: u32 = 0x44;
/// DPI control: peripheral on/off commands
pub const DPI_CONTROL: u32 = 0x48;
/// PLL lock counter
pub const PLL_LOCK_COUNT: u32 = 0x4C;
/// Initialization (master init timer) count
pub const INIT_COUNT: u32 = 0x50;
/// Maximum return packet size
pub const MAX_RETURN_PACKET: u32 = 0x54;
/// Video mode format select
pub const VIDEO_MODE_FORMAT: u32 = 0x58;
/// Clock lane EOT / BTA control
pub const CLK_EOT: u32 = 0x5C;
/// Signal polarity control
pub const POLARITY: u32 = 0x60;
/// Clock lane HS<->LP switch-over counters
pub const CLK_LANE_SWT: u32 = 0x64;
/// Low-power byte clock divider
pub const LP_BYTECLK: u32 = 0x68;
/// Data lane D-PHY prepare/zero/trail/exit counts
pub const DPHY_PARAM: u32 = 0x6C;
/// Clock lane D-PHY prepare/zero/trail/exit counts
pub const CLK_LANE_TIMING_PARAM: u32 = 0x70;
/// Display front-end reset / enable
pub const RST_ENABLE_DFE: u32 = 0x74;

// PLL trim and recovery

/// PLL trim register 0
pub const TRIM0: u32 = 0x78;
/// PLL trim register 1: divider ratio split field plus fixed trim bits
pub const TRIM1: u32 = 0x7C;
/// PLL trim register 2
pub const TRIM2: u32 = 0x80;
/// PLL trim register 3
pub const TRIM3: u32 = 0x84;
/// Automatic error recovery control
pub const AUTO_ERR_REC: u32 = 0x88;
/// Direct DPI difference control
pub const DIR_DPI_DIFF: u32 = 0x8C;
/// Data lane polarity swap
pub const DATA_LANE_POLARITY_SWAP: u32 = 0x90;

// DEVICE_READY bits

/// Enable the controller
pub const DEVICE_ENABLE: u32 = 1 << 0;

// DPI_CONTROL bits

/// Shut down the attached peripheral
pub const TURN_OFF_PERIPHERAL: u32 = 1 << 0;
/// Turn on the attached peripheral
pub const TURN_ON_PERIPHERAL: u32 = 1 << 1;

// RST_ENABLE_DFE bits

/// Reset and enable the display front-end data path
pub const DFE_RST_ENABLE: u32 = 1 << 0;

// FUNC_PRG fields

/// Data lane count field shift (bits 0..3)
pub const FUNC_PRG_LANES_SHIFT: u32 = 0;
/// Virtual channel field shift (bits 3..5)
pub const FUNC_PRG_CHANNEL_SHIFT: u32 = 3;
/// Pixel format field shift (bits 7..10)
pub const FUNC_PRG_FORMAT_SHIFT: u32 = 7;
/// RGB565 format field value
pub const FMT_RGB565: u32 = 0x1;
/// RGB666 format field value
pub const FMT_RGB666: u32 = 0x2;
/// RGB888 format field value
pub const FMT_RGB888: u32 = 0x4;

// VIDEO_MODE_FORMAT values

/// Non-burst mode with sync pulses
pub const NON_BURST_WITH_SYNC_PULSES: u32 = 0x1;
/// Burst mode
pub const BURST_MODE: u32 = 0x3;

// CLK_EOT bits

/// Disable bus turn-around requests during video mode
pub const DISABLE_VIDEO_BTA: u32 = 1 << 2;

// AUTO_ERR_REC bits

/// Clear ECC multi-bit error state automatically
pub const ECC_MUL_ERR_CLR: u32 = 1 << 1;

// TRIM1 layout: divider ratio bits 6..0 split as [0]<<6 | [6..1],
// plus fixed analog trim bits.

/// Fixed analog trim bits always set in TRIM1
pub const TRIM1_FIXED_BITS: u32 = (1 << 11)
    | (1 << 12)
    | (1 << 13)
    | (1 << 16)
    | (1 << 18)
    | (1 << 20)
    | (1 << 21);

// Fixed protocol timeout values (controller defaults)

/// HS TX timeout programmed at bring-up
pub const HS_TX_TIMEOUT_VALUE: u32 = 0xFF_FFFF;
/// LP RX timeout programmed at bring-up
pub const LP_RX_TIMEOUT_VALUE: u32 = 0xFF_FFFF;
/// Turn-around timeout programmed at bring-up
pub const TURN_AROUND_TIMEOUT_VALUE: u32 = 0x1F;
/// Device reset timer programmed at bring-up
pub const DEVICE_RESET_VALUE: u32 = 0xFF;
/// Master init counter programmed at bring-up
pub const INIT_COUNT_VALUE: u32 = 0x7D0;

/// Pack four byte-wide sub-fields at bit offsets 0/8/16/24
pub fn pack_bytes(fields: [u8; 4]) -> u32 {
    u32::from(fields[0])
        | (u32::from(fields[1]) << 8)
        | (u32::from(fields[2]) << 16)
        | (u32::from(fields[3]) << 24)
}

/// Pack two 16-bit fields at bit offsets 0/16
pub fn pack_halves(low: u16, high: u16) -> u32 {
    u32::from(low) | (u32::from(high) << 16)
}

/// Pack the TRIM1 divider ratio split field with the fixed trim bits
///
/// The ratio's low bit lands in bit 6, the remaining bits in 5..0.
pub fn pack_trim1(div_ratio: u32) -> u32 {
    (div_ratio >> 1) | ((div_ratio & 0x01) << 6) | TRIM1_FIXED_BITS
}

/// Ordered (name, offset) table of every named register
///
/// Backs the textual register snapshot; the order matches the
/// controller documentation.
pub const REGISTER_NAMES: &[(&str, u32)] = &[
    ("DEVICE_READY", DEVICE_READY),
    ("IRQ_STATUS", IRQ_STATUS),
    ("IRQ_ENABLE", IRQ_ENABLE),
    ("FUNC_PRG", FUNC_PRG),
    ("HS_TX_TIMEOUT", HS_TX_TIMEOUT),
    ("LP_RX_TIMEOUT", LP_RX_TIMEOUT),
    ("TURN_AROUND_TIMEOUT", TURN_AROUND_TIMEOUT),
    ("DEVICE_RESET", DEVICE_RESET),
    ("DPI_RESOLUTION", DPI_RESOLUTION),
    ("HSYNC_COUNT", HSYNC_COUNT),
    ("HORIZ_BACK_PORCH_COUNT", HORIZ_BACK_PORCH_COUNT),
    ("HORIZ_FRONT_PORCH_COUNT", HORIZ_FRONT_PORCH_COUNT),
    ("HORIZ_ACTIVE_AREA_COUNT", HORIZ_ACTIVE_AREA_COUNT),
    ("VSYNC_COUNT", VSYNC_COUNT),
    ("VERT_BACK_PORCH_COUNT", VERT_BACK_PORCH_COUNT),
    ("VERT_FRONT_PORCH_COUNT", VERT_FRONT_PORCH_COUNT),
    ("HIGH_LOW_SWITCH_COUNT", HIGH_LOW_SWITCH_COUNT),
    ("DPI_CONTROL", DPI_CONTROL),
    ("PLL_LOCK_COUNT", PLL_LOCK_COUNT),
    ("INIT_COUNT", INIT_COUNT),
    ("MAX_RETURN_PACKET", MAX_RETURN_PACKET),
    ("VIDEO_MODE_FORMAT", VIDEO_MODE_FORMAT),
    ("CLK_EOT", CLK_EOT),
    ("POLARITY", POLARITY),
    ("CLK_LANE_SWT", CLK_LANE_SWT),
    ("LP_BYTECLK", LP_BYTECLK),
    ("DPHY_PARAM", DPHY_PARAM),
    ("CLK_LANE_TIMING_PARAM", CLK_LANE_TIMING_PARAM),
    ("RST_ENABLE_DFE", RST_ENABLE_DFE),
    ("TRIM0", TRIM0),
    ("TRIM1", TRIM1),
    ("TRIM2", TRIM2),
    ("TRIM3", TRIM3),
    ("AUTO_ERR_REC", AUTO_ERR_REC),
    ("DIR_DPI_DIFF", DIR_DPI_DIFF),
    ("DATA_LANE_POLARITY_SWAP", DATA_LANE_POLARITY_SWAP),
];
