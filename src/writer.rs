//! Latch-enable framed register writes.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::profile::register_address;
use crate::{Error, RegisterInterface};

/// Minimum LE high time after the last clock edge, in microseconds.
pub const LE_HOLD_US: u32 = 3;

/// Shifts 32-bit words into the ADF5355 and latches them with an LE pulse.
///
/// Owns the register interface and the LE (Load Enable) pin. Every word is
/// framed as: LE low, 4 bytes MSB first, LE high, [`LE_HOLD_US`] hold, LE low.
pub struct RegisterWriter<I, LE> {
    interface: I,
    le_pin: LE,
}

impl<I, LE> RegisterWriter<I, LE>
where
    I: RegisterInterface<AddressType = u8>,
    LE: OutputPin,
{
    /// Create a writer from a register interface and LE pin.
    pub fn new(interface: I, le_pin: LE) -> Self {
        Self { interface, le_pin }
    }

    /// Write one register word and latch it.
    ///
    /// The target register is selected by the control bits already present
    /// in `word`; the address handed to the interface is derived from them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Spi`] if the transfer fails and [`Error::LePin`] if
    /// the LE pin cannot be driven.
    pub fn write_register<D>(
        &mut self,
        word: u32,
        delay: &mut D,
    ) -> Result<(), Error<I::Error, LE::Error>>
    where
        D: DelayNs,
    {
        log::trace!("R{} <- {:#010x}", register_address(word), word);

        self.le_pin.set_low().map_err(Error::LePin)?;

        self.interface
            .write_register(register_address(word), 32, &word.to_be_bytes())
            .map_err(Error::Spi)?;

        self.le_pin.set_high().map_err(Error::LePin)?;
        delay.delay_us(LE_HOLD_US);
        self.le_pin.set_low().map_err(Error::LePin)?;

        Ok(())
    }

    /// Drive LE high without shifting data.
    pub(crate) fn idle_high(&mut self) -> Result<(), Error<I::Error, LE::Error>> {
        self.le_pin.set_high().map_err(Error::LePin)
    }

    /// Consume the writer and return the register interface and LE pin.
    pub fn release(self) -> (I, LE) {
        (self.interface, self.le_pin)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::convert::Infallible;
    use std::vec::Vec;

    use super::*;

    #[derive(Debug, PartialEq)]
    enum Step {
        Low,
        High,
        Shift(u8, [u8; 4]),
        WaitUs(u32),
    }

    #[derive(Default)]
    struct Bus(Vec<(u8, [u8; 4])>);

    impl RegisterInterface for Bus {
        type Error = Infallible;
        type AddressType = u8;

        fn write_register(
            &mut self,
            address: u8,
            size_bits: u32,
            data: &[u8],
        ) -> Result<(), Infallible> {
            assert_eq!(size_bits, 32);
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(data);
            self.0.push((address, bytes));
            Ok(())
        }

        fn read_register(&mut self, _: u8, _: u32, _: &mut [u8]) -> Result<(), Infallible> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct Pin(Vec<bool>);

    impl embedded_hal::digital::ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.push(true);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Delay(Vec<u32>);

    impl DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.push(ns.div_ceil(1000));
        }

        fn delay_us(&mut self, us: u32) {
            self.0.push(us);
        }
    }

    #[test]
    fn test_word_is_shifted_msb_first() {
        let mut writer = RegisterWriter::new(Bus::default(), Pin::default());
        let mut delay = Delay::default();

        writer.write_register(0x0020_0320, &mut delay).unwrap();
        writer.write_register(0x6907_FFF2, &mut delay).unwrap();

        let (bus, pin) = writer.release();
        assert_eq!(
            bus.0,
            [(0, [0x00, 0x20, 0x03, 0x20]), (2, [0x69, 0x07, 0xFF, 0xF2])]
        );
        assert_eq!(pin.0, [false, true, false, false, true, false]);
        assert_eq!(delay.0, [LE_HOLD_US, LE_HOLD_US]);
    }

    #[test]
    fn test_frame_order() {
        // Interleave pin, bus and delay into one trace via a shared cell.
        use core::cell::RefCell;

        struct TracedBus<'a>(&'a RefCell<Vec<Step>>);
        struct TracedPin<'a>(&'a RefCell<Vec<Step>>);
        struct TracedDelay<'a>(&'a RefCell<Vec<Step>>);

        impl RegisterInterface for TracedBus<'_> {
            type Error = Infallible;
            type AddressType = u8;

            fn write_register(&mut self, a: u8, _: u32, d: &[u8]) -> Result<(), Infallible> {
                self.0.borrow_mut().push(Step::Shift(a, [d[0], d[1], d[2], d[3]]));
                Ok(())
            }

            fn read_register(&mut self, _: u8, _: u32, _: &mut [u8]) -> Result<(), Infallible> {
                Ok(())
            }
        }

        impl embedded_hal::digital::ErrorType for TracedPin<'_> {
            type Error = Infallible;
        }

        impl OutputPin for TracedPin<'_> {
            fn set_low(&mut self) -> Result<(), Infallible> {
                self.0.borrow_mut().push(Step::Low);
                Ok(())
            }

            fn set_high(&mut self) -> Result<(), Infallible> {
                self.0.borrow_mut().push(Step::High);
                Ok(())
            }
        }

        impl DelayNs for TracedDelay<'_> {
            fn delay_ns(&mut self, ns: u32) {
                self.0.borrow_mut().push(Step::WaitUs(ns.div_ceil(1000)));
            }
        }

        let trace = RefCell::new(Vec::new());
        let mut writer = RegisterWriter::new(TracedBus(&trace), TracedPin(&trace));
        writer
            .write_register(0x0001_041C, &mut TracedDelay(&trace))
            .unwrap();

        assert_eq!(
            trace.into_inner(),
            [
                Step::Low,
                Step::Shift(12, [0x00, 0x01, 0x04, 0x1C]),
                Step::High,
                Step::WaitUs(3),
                Step::Low,
            ]
        );
    }
}
