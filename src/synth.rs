//! Initialization and tone switching.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::profile::{Profile, ProfileTable, AUTOCAL, COUNTER_RESET, PROFILES};
use crate::writer::RegisterWriter;
use crate::{Error, RegisterInterface};

/// Wait between the last static register write and the R0 trigger, and
/// after a click-free R0 write, in microseconds.
pub const CALIBRATION_SETTLE_US: u32 = 161;

/// Settle time after a calibrating R0 write, in microseconds.
pub const LATCH_SETTLE_US: u32 = 1;

/// Row whose registers are loaded by [`Synthesizer::initialize`].
pub const REFERENCE_PROFILE: Profile = Profile::Pi4Tone1;

/// Register sequence used when changing tone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchMode {
    /// Rewrite R2, R1 and R0 only, with R0 auto-calibration (DB21) cleared.
    ///
    /// The VCO keeps the band selected during [`Synthesizer::initialize`],
    /// so every tone in the table must lie within the lock range of that
    /// band. No calibration transient reaches the output.
    #[default]
    ClickFree,
    /// Datasheet frequency update: R10, R4 (counter reset), R2, R1, R0,
    /// R4, then R0 again with auto-calibration enabled.
    ///
    /// Recalibrates the VCO on every switch, which produces an audible
    /// click on keyed transmissions.
    FullRecalibration,
}

/// Driver lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No complete register load has been performed
    Uninitialized,
    /// All registers loaded, no tone selected since
    Initialized,
    /// Switched to the profile at this row index
    Tuned(usize),
}

/// ADF5355 tone-switching driver.
///
/// Owns the register interface and the LE pin, and programs rows of a
/// [`ProfileTable`] into the part.
///
/// # Example
///
/// ```no_run
/// # use adf5355::{Profile, RegisterInterface, Synthesizer};
/// # use core::convert::Infallible;
/// # struct Bus;
/// # impl RegisterInterface for Bus {
/// #     type Error = Infallible;
/// #     type AddressType = u8;
/// #     fn write_register(&mut self, _: u8, _: u32, _: &[u8]) -> Result<(), Infallible> { Ok(()) }
/// #     fn read_register(&mut self, _: u8, _: u32, _: &mut [u8]) -> Result<(), Infallible> { Ok(()) }
/// # }
/// # struct LePin;
/// # impl embedded_hal::digital::ErrorType for LePin { type Error = Infallible; }
/// # impl embedded_hal::digital::OutputPin for LePin {
/// #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
/// # }
/// # struct Delay;
/// # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
/// let mut synth = Synthesizer::new(Bus, LePin);
/// let mut delay = Delay;
///
/// synth.initialize(&mut delay).unwrap();
/// synth.set_profile(Profile::CwCarrier, &mut delay).unwrap();
/// synth.set_frequency(4, &mut delay).unwrap();
/// ```
pub struct Synthesizer<I, LE> {
    writer: RegisterWriter<I, LE>,
    table: &'static ProfileTable,
    mode: SwitchMode,
    state: State,
}

impl<I, LE> Synthesizer<I, LE>
where
    I: RegisterInterface<AddressType = u8>,
    LE: OutputPin,
{
    /// Create a driver for the built-in [`PROFILES`] table.
    pub fn new(interface: I, le_pin: LE) -> Self {
        Self::with_table(interface, le_pin, &PROFILES)
    }

    /// Create a driver for a custom table.
    ///
    /// [`SwitchMode::ClickFree`] never rewrites R3-R12, so rows of `table`
    /// should satisfy [`ProfileTable::shares_static_registers`].
    pub fn with_table(interface: I, le_pin: LE, table: &'static ProfileTable) -> Self {
        if !table.shares_static_registers() {
            log::warn!("profile table rows differ in R3-R12");
        }

        Self {
            writer: RegisterWriter::new(interface, le_pin),
            table,
            mode: SwitchMode::default(),
            state: State::Uninitialized,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Profile selected by the last successful switch, if it is a named one.
    pub fn profile(&self) -> Option<Profile> {
        match self.state {
            State::Tuned(index) => Profile::try_from(index).ok(),
            _ => None,
        }
    }

    /// The table this driver programs from.
    pub fn table(&self) -> &'static ProfileTable {
        self.table
    }

    /// Register sequence used by later switches.
    pub fn switch_mode(&self) -> SwitchMode {
        self.mode
    }

    /// Select the register sequence used by later switches.
    pub fn set_switch_mode(&mut self, mode: SwitchMode) {
        self.mode = mode;
    }

    /// Load every register from [`REFERENCE_PROFILE`].
    ///
    /// Writes R12 down to R1, waits [`CALIBRATION_SETTLE_US`], then writes
    /// R0, which double-buffers the update and starts VCO calibration, and
    /// waits [`LATCH_SETTLE_US`]. This is the only place R3-R12 are written
    /// in [`SwitchMode::ClickFree`] operation.
    ///
    /// Calling it again repeats the full load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spi`] or [`Error::LePin`] on bus or pin failure; the
    /// driver is then left in [`State::Uninitialized`].
    pub fn initialize<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error, LE::Error>>
    where
        D: DelayNs,
    {
        self.state = State::Uninitialized;
        let row = self.table.profile(REFERENCE_PROFILE);
        log::debug!("initializing from profile {}", REFERENCE_PROFILE.index());

        self.writer.idle_high()?;

        for word in row[1..].iter().rev() {
            self.writer.write_register(*word, delay)?;
        }
        delay.delay_us(CALIBRATION_SETTLE_US);

        self.writer.write_register(row[0], delay)?;
        delay.delay_us(LATCH_SETTLE_US);

        self.state = State::Initialized;
        Ok(())
    }

    /// Switch to the tone at row `index`.
    ///
    /// In [`SwitchMode::ClickFree`] this writes R2, R1 and R0 with DB21
    /// forced low, then blocks for [`CALIBRATION_SETTLE_US`].
    ///
    /// # Errors
    ///
    /// - [`Error::NotInitialized`] if [`initialize`](Self::initialize) has
    ///   not completed
    /// - [`Error::InvalidProfile`] if `index` is not a row of the table
    /// - [`Error::Spi`] or [`Error::LePin`] on bus or pin failure
    ///
    /// Nothing is written when the first two are returned.
    pub fn set_frequency<D>(
        &mut self,
        index: usize,
        delay: &mut D,
    ) -> Result<(), Error<I::Error, LE::Error>>
    where
        D: DelayNs,
    {
        if self.state == State::Uninitialized {
            log::warn!("switch to profile {} before initialization", index);
            return Err(Error::NotInitialized);
        }

        let table = self.table;
        let Some(row) = table.get(index) else {
            log::warn!("profile {} out of range", index);
            return Err(Error::InvalidProfile(index));
        };

        log::debug!("switching to profile {} ({:?})", index, self.mode);
        self.state = State::Initialized;

        match self.mode {
            SwitchMode::ClickFree => {
                self.writer.write_register(row[2], delay)?;
                self.writer.write_register(row[1], delay)?;
                self.writer.write_register(row[0] & !AUTOCAL, delay)?;
                delay.delay_us(CALIBRATION_SETTLE_US);
            }
            SwitchMode::FullRecalibration => {
                self.writer.write_register(row[10], delay)?;
                self.writer.write_register(row[4] | COUNTER_RESET, delay)?;
                self.writer.write_register(row[2], delay)?;
                self.writer.write_register(row[1], delay)?;
                self.writer.write_register(row[0] & !AUTOCAL, delay)?;
                self.writer.write_register(row[4], delay)?;
                delay.delay_us(CALIBRATION_SETTLE_US);
                self.writer.write_register(row[0], delay)?;
                delay.delay_us(LATCH_SETTLE_US);
            }
        }

        self.state = State::Tuned(index);
        Ok(())
    }

    /// Switch to a named profile. See [`set_frequency`](Self::set_frequency).
    pub fn set_profile<D>(
        &mut self,
        profile: Profile,
        delay: &mut D,
    ) -> Result<(), Error<I::Error, LE::Error>>
    where
        D: DelayNs,
    {
        self.set_frequency(profile.index(), delay)
    }

    /// Consume the driver and return the register interface and LE pin.
    pub fn release(self) -> (I, LE) {
        self.writer.release()
    }
}
