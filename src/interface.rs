//! [`RegisterInterface`] adapter for `embedded-hal` SPI buses.

use core::fmt;

use embedded_hal::spi::{Mode, SpiBus, MODE_0};

use crate::RegisterInterface;

/// SPI mode required by the ADF5355: CPOL = 0, CPHA = 0, data MSB first.
pub const SPI_MODE: Mode = MODE_0;

/// Bus clock used by the reference hardware, in Hz. The part accepts up to 50 MHz.
pub const SPI_FREQUENCY_HZ: u32 = 100_000;

/// Errors from [`SpiInterface`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterfaceError<E> {
    /// The underlying SPI bus failed
    Bus(E),
    /// The ADF5355 register map has no readback path
    WriteOnly,
}

impl<E: fmt::Debug> fmt::Display for InterfaceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceError::Bus(e) => write!(f, "SPI bus error: {:?}", e),
            InterfaceError::WriteOnly => f.write_str("register readback not supported"),
        }
    }
}

/// Shifts register words out over an [`SpiBus`].
///
/// The bus must be configured with [`SPI_MODE`] and MSB-first bit order.
/// Chip select is not used; framing is done by the LE pin owned by
/// [`RegisterWriter`](crate::RegisterWriter).
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI>
where
    SPI: SpiBus<u8>,
{
    /// Wrap an SPI bus.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Return the wrapped bus.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> RegisterInterface for SpiInterface<SPI>
where
    SPI: SpiBus<u8>,
{
    type Error = InterfaceError<SPI::Error>;
    type AddressType = u8;

    fn write_register(
        &mut self,
        _address: Self::AddressType,
        size_bits: u32,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        debug_assert_eq!(size_bits, 32, "ADF5355 uses 32-bit registers");
        self.spi.write(data).map_err(InterfaceError::Bus)?;
        // LE must not rise before the last bit is out
        self.spi.flush().map_err(InterfaceError::Bus)
    }

    fn read_register(
        &mut self,
        _address: Self::AddressType,
        _size_bits: u32,
        _data: &mut [u8],
    ) -> Result<(), Self::Error> {
        Err(InterfaceError::WriteOnly)
    }
}
