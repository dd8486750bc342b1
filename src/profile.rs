//! Preset register banks for the supported tones.
//!
//! Each row holds the complete R0-R12 image for one output tone or phase
//! state. Only R0-R2 (INT, FRAC1, FRAC2/MOD2) differ between rows; R3-R12
//! carry the static reference, charge pump and output configuration and are
//! loaded once by [`Synthesizer::initialize`](crate::Synthesizer::initialize).

/// Number of registers in the ADF5355 map (R0-R12).
pub const REGISTER_COUNT: usize = 13;

/// Number of preset rows in [`PROFILES`].
pub const PROFILE_COUNT: usize = 8;

/// R0 DB21: VCO auto-calibration on R0 write.
pub const AUTOCAL: u32 = 1 << 21;

/// R4 DB4: counter reset.
pub const COUNTER_RESET: u32 = 1 << 4;

/// Mask of the 4-bit control field (DB3:DB0) selecting the target register.
pub const ADDRESS_MASK: u32 = 0xF;

/// Full register image for one tone, indexed by register number.
pub type FrequencyProfile = [u32; REGISTER_COUNT];

/// Register address encoded in the control bits of `word`.
#[inline]
pub const fn register_address(word: u32) -> u8 {
    (word & ADDRESS_MASK) as u8
}

/// Named rows of the built-in [`PROFILES`] table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    /// PI4 tone 0
    Pi4Tone0,
    /// PI4 tone 1, also the reference row used by initialization
    Pi4Tone1,
    /// PI4 tone 2
    Pi4Tone2,
    /// PI4 tone 3
    Pi4Tone3,
    /// CW FSK (mark-shifted) tone
    CwFsk,
    /// CW carrier
    CwCarrier,
    /// CW FSK tone of the alternate band plan
    AltCwFsk,
    /// CW carrier of the alternate band plan
    AltCwCarrier,
}

impl Profile {
    /// All profiles in table order.
    pub const ALL: [Profile; PROFILE_COUNT] = [
        Profile::Pi4Tone0,
        Profile::Pi4Tone1,
        Profile::Pi4Tone2,
        Profile::Pi4Tone3,
        Profile::CwFsk,
        Profile::CwCarrier,
        Profile::AltCwFsk,
        Profile::AltCwCarrier,
    ];

    /// Row index of this profile in a [`ProfileTable`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Profile {
    type Error = usize;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Profile::ALL.get(index).copied().ok_or(index)
    }
}

/// Immutable bank of register images, one row per tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTable {
    rows: [FrequencyProfile; PROFILE_COUNT],
}

impl ProfileTable {
    /// Build a table from raw register words.
    ///
    /// Rows are expected to share R3-R12; see
    /// [`shares_static_registers`](Self::shares_static_registers).
    pub const fn new(rows: [FrequencyProfile; PROFILE_COUNT]) -> Self {
        Self { rows }
    }

    /// Register image for row `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&FrequencyProfile> {
        self.rows.get(index)
    }

    /// Register image for a named profile.
    pub fn profile(&self, profile: Profile) -> &FrequencyProfile {
        &self.rows[profile.index()]
    }

    /// Number of rows.
    pub const fn len(&self) -> usize {
        PROFILE_COUNT
    }

    /// Always `false`; tables have a fixed row count.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all rows in index order.
    pub fn iter(&self) -> impl Iterator<Item = &FrequencyProfile> {
        self.rows.iter()
    }

    /// Returns `true` if R3-R12 are identical in every row.
    ///
    /// Click-free switching only rewrites R0-R2, so a table that violates
    /// this would leave the static registers of the reference row in place.
    pub fn shares_static_registers(&self) -> bool {
        let reference = &self.rows[0][3..];
        self.rows.iter().all(|row| &row[3..] == reference)
    }
}

/// Built-in tone table: 63.8976 MHz reference, ~50 MHz output.
///
/// Rows 0-3 are the PI4 tones, 4 and 5 the CW FSK and carrier tones.
/// Rows 6 and 7 hold the FSK and carrier tones of a second band plan.
#[rustfmt::skip]
pub static PROFILES: ProfileTable = ProfileTable::new([
    //  R0        R1          R2          R3          R4          R5        R6          R7          R8          R9          R10       R11       R12
    [0x0020_0320, 0x0150_6901, 0x6907_FFF2, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x0151_5EC1, 0x91FF_FFF2, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x0152_5481, 0x3E51_5552, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x0153_4A41, 0xE3E7_FFF2, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x014E_7D81, 0x07B5_5552, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x0150_6901, 0x6907_FFF2, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x08A5_BE51, 0xBE5B_FFF2, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
    [0x0020_0320, 0x08A7_6271, 0x6277_FFF2, 0x4000_0003, 0x3600_BD84, 0x0080_0025, 0x35CC_C076, 0x1200_00E7, 0x102D_0428, 0x1B1A_FCC9, 0x00C0_283A, 0x0061_300B, 0x0001_041C],
]);
