//! Basic usage example - tone switching with automatic LE framing
//!
//! This example demonstrates the `Synthesizer` driver which:
//! - Owns the LE (Load Enable) pin and frames every word (LE low → 4 bytes → LE high → 3µs → LE low)
//! - Loads all thirteen registers once with `initialize()`
//! - Switches tones by rewriting R2, R1, R0 with auto-calibration cleared
//! - Can fall back to the datasheet sequence that recalibrates on every switch
//!
//! Run with: `cargo run --example basic_usage`

use adf5355::{Profile, SpiInterface, SwitchMode, Synthesizer};
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, SpiBus};

/// Mock SPI bus for demonstration
///
/// In a real application, this would be your platform's SPI peripheral
/// configured for `adf5355::SPI_MODE` at `adf5355::SPI_FREQUENCY_HZ`.
struct MockSpi;

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl SpiBus for MockSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        let word = u32::from_be_bytes([words[0], words[1], words[2], words[3]]);
        println!(
            "  → SPI write to R{:<2}: {:02X} {:02X} {:02X} {:02X}",
            word & 0xF,
            words[0],
            words[1],
            words[2],
            words[3]
        );
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Mock LE pin for demonstration
///
/// In a real application, use your platform's GPIO implementation
struct MockLePin {
    pulses: u32,
}

impl digital::ErrorType for MockLePin {
    type Error = Infallible;
}

impl OutputPin for MockLePin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pulses += 1;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Mock delay that only accumulates the requested time
struct MockDelay {
    total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

fn main() {
    println!("=== ADF5355 Tone Switching Example ===\n");

    let mut synth = Synthesizer::new(SpiInterface::new(MockSpi), MockLePin { pulses: 0 });
    let mut delay = MockDelay { total_ns: 0 };

    // Switching before the full load is refused
    match synth.set_profile(Profile::CwCarrier, &mut delay) {
        Err(e) => println!("Early switch rejected: {}\n", e),
        Ok(()) => unreachable!(),
    }

    println!("1. Initializing (R12 → R0):");
    synth.initialize(&mut delay).unwrap();
    println!("   {:?}, {} µs elapsed\n", synth.state(), delay.total_ns / 1000);

    println!("2. Click-free PI4 sequence:");
    for profile in [
        Profile::Pi4Tone0,
        Profile::Pi4Tone1,
        Profile::Pi4Tone2,
        Profile::Pi4Tone3,
    ] {
        println!(" {:?}", profile);
        synth.set_profile(profile, &mut delay).unwrap();
    }
    println!();

    println!("3. CW keying with full recalibration (clicks on air):");
    synth.set_switch_mode(SwitchMode::FullRecalibration);
    for profile in [Profile::CwFsk, Profile::CwCarrier] {
        println!(" {:?}", profile);
        synth.set_profile(profile, &mut delay).unwrap();
    }
    println!();

    match synth.set_frequency(8, &mut delay) {
        Err(e) => println!("Out-of-range switch rejected: {}", e),
        Ok(()) => unreachable!(),
    }

    let (_interface, le_pin) = synth.release();
    println!(
        "\n{} LE pulses, {} µs total delay",
        le_pin.pulses,
        delay.total_ns / 1000
    );
}
