#![cfg_attr(not(feature = "std"), no_std)]

//! Key-click-free tone switching for the Analog Devices ADF5355 wideband PLL/VCO.
//!
//! This crate programs the ADF5355 from a fixed bank of preset register images
//! ([`ProfileTable`]) and switches between them without re-triggering VCO
//! auto-calibration, so keyed CW and PI4 beacons stay free of clicks.
//!
//! # Features
//!
//! - **Automatic LE framing** - [`RegisterWriter`] pulses Load Enable around every word
//! - **One-shot initialization** - [`Synthesizer::initialize`] loads R12 → R0 with datasheet timing
//! - **Click-free switching** - [`Synthesizer::set_frequency`] rewrites only R2, R1, R0 with auto-cal off
//! - **Selectable strategy** - [`SwitchMode::FullRecalibration`] keeps the datasheet sequence available
//! - **Checked inputs** - out-of-range profiles and pre-init switches are reported, not written
//! - **No_std support** - Works in embedded environments (with optional `std` feature)
//! - **Flexible interface** - Bring your own bus via [`RegisterInterface`], or wrap an
//!   `embedded-hal` SPI bus with [`SpiInterface`]
//!
//! # Hardware Notes
//!
//! ## LE (Load Enable) Pin
//!
//! Data is clocked into a 32-bit shift register MSB first. On the rising edge of LE
//! the word is latched into the register selected by its four control bits
//! (DB3:DB0). The driver holds LE low while shifting, raises it, waits
//! [`LE_HOLD_US`] and drops it again.
//!
//! ## Auto-calibration (R0 DB21)
//!
//! Every R0 write with DB21 set starts a VCO band calibration, which disturbs
//! the output for a few hundred microseconds. [`Synthesizer::initialize`]
//! calibrates once; [`SwitchMode::ClickFree`] then clears DB21 on every switch
//! and retunes within the calibrated band.
//!
//! ## SPI
//!
//! Mode 0, MSB first, see [`SPI_MODE`] and [`SPI_FREQUENCY_HZ`]. CE is assumed
//! to be tied high.
//!
//! # Usage Patterns
//!
//! ## Pattern 1: Raw register writes
//!
//! Use [`RegisterWriter`] to push arbitrary words:
//!
//! ```no_run
//! use adf5355::{RegisterInterface, RegisterWriter};
//! # use core::convert::Infallible;
//! # struct Bus;
//! # impl RegisterInterface for Bus {
//! #     type Error = Infallible;
//! #     type AddressType = u8;
//! #     fn write_register(&mut self, _: u8, _: u32, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn read_register(&mut self, _: u8, _: u32, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct LePin;
//! # impl embedded_hal::digital::ErrorType for LePin { type Error = Infallible; }
//! # impl embedded_hal::digital::OutputPin for LePin {
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//!
//! let mut writer = RegisterWriter::new(Bus, LePin);
//! let mut delay = Delay;
//!
//! // R4 with counter reset
//! writer.write_register(0x3600_BD94, &mut delay).unwrap();
//! ```
//!
//! ## Pattern 2: Tone switching (Recommended)
//!
//! ```no_run
//! use adf5355::{Profile, SpiInterface, Synthesizer};
//! # use core::convert::Infallible;
//! # struct Spi;
//! # impl embedded_hal::spi::ErrorType for Spi { type Error = Infallible; }
//! # impl embedded_hal::spi::SpiBus for Spi {
//! #     fn read(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn write(&mut self, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer(&mut self, _: &mut [u8], _: &[u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct LePin;
//! # impl embedded_hal::digital::ErrorType for LePin { type Error = Infallible; }
//! # impl embedded_hal::digital::OutputPin for LePin {
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//!
//! let mut synth = Synthesizer::new(SpiInterface::new(Spi), LePin);
//! let mut delay = Delay;
//!
//! synth.initialize(&mut delay).unwrap();
//!
//! for profile in [Profile::Pi4Tone0, Profile::Pi4Tone2, Profile::CwCarrier] {
//!     synth.set_profile(profile, &mut delay).unwrap();
//! }
//! ```
//!
//! **See `demos/basic_usage.rs` for a complete working example.**
//!
//! # Register Map
//!
//! The ADF5355 has thirteen 32-bit registers (R0-R12). The driver treats them
//! as opaque words except for:
//!
//! - **R0 DB21** ([`AUTOCAL`]): VCO auto-calibration on R0 write
//! - **R4 DB4** ([`COUNTER_RESET`]): R and N counter reset
//!
//! R0-R2 carry INT, FRAC1 and FRAC2/MOD2 and differ per tone. R3-R12 are
//! shared by every row of [`PROFILES`].

use core::fmt;

pub use device_driver::RegisterInterface;

mod interface;
mod profile;
mod synth;
mod writer;

pub use interface::{InterfaceError, SpiInterface, SPI_FREQUENCY_HZ, SPI_MODE};
pub use profile::{
    register_address, FrequencyProfile, Profile, ProfileTable, ADDRESS_MASK, AUTOCAL,
    COUNTER_RESET, PROFILES, PROFILE_COUNT, REGISTER_COUNT,
};
pub use synth::{
    State, SwitchMode, Synthesizer, CALIBRATION_SETTLE_US, LATCH_SETTLE_US, REFERENCE_PROFILE,
};
pub use writer::{RegisterWriter, LE_HOLD_US};

/// Error type for driver operations
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiError, PinError> {
    /// Error from the register interface
    Spi(SpiError),

    /// Error from the LE pin
    LePin(PinError),

    /// Profile index is not a row of the table
    InvalidProfile(usize),

    /// A tone switch was requested before [`Synthesizer::initialize`] completed
    NotInitialized,
}

impl<SpiError, PinError> fmt::Display for Error<SpiError, PinError>
where
    SpiError: fmt::Debug,
    PinError: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Spi(e) => write!(f, "register interface error: {:?}", e),
            Error::LePin(e) => write!(f, "LE pin error: {:?}", e),
            Error::InvalidProfile(index) => {
                write!(f, "profile {} out of range (0..{})", index, PROFILE_COUNT)
            }
            Error::NotInitialized => f.write_str("synthesizer not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl<SpiError, PinError> std::error::Error for Error<SpiError, PinError>
where
    SpiError: fmt::Debug,
    PinError: fmt::Debug,
{
}
