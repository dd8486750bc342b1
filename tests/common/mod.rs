//! Recording mocks for the bus, LE pin and delay provider.
//!
//! All three share one trace so tests can check the interleaving of LE
//! edges, shifted words and waits.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use adf5355::{RegisterInterface, Synthesizer};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    LeHigh,
    LeLow,
    Write { address: u8, bytes: [u8; 4] },
    DelayUs(u32),
}

pub type Trace = Rc<RefCell<Vec<Event>>>;

pub struct MockInterface {
    trace: Trace,
}

impl RegisterInterface for MockInterface {
    type Error = Infallible;
    type AddressType = u8;

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        assert_eq!(size_bits, 32, "ADF5355 uses 32-bit registers");
        let bytes: [u8; 4] = data.try_into().expect("4-byte register word");
        self.trace.borrow_mut().push(Event::Write { address, bytes });
        Ok(())
    }

    fn read_register(
        &mut self,
        _address: Self::AddressType,
        _size_bits: u32,
        _data: &mut [u8],
    ) -> Result<(), Self::Error> {
        panic!("ADF5355 registers are write-only");
    }
}

pub struct MockLePin {
    trace: Trace,
}

impl ErrorType for MockLePin {
    type Error = Infallible;
}

impl OutputPin for MockLePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::LeLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push(Event::LeHigh);
        Ok(())
    }
}

pub struct MockDelay {
    trace: Trace,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.borrow_mut().push(Event::DelayUs(ns.div_ceil(1000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.borrow_mut().push(Event::DelayUs(us));
    }
}

pub type MockSynth = Synthesizer<MockInterface, MockLePin>;

/// Build a synthesizer over the built-in table plus its delay and trace.
pub fn setup() -> (MockSynth, MockDelay, Trace) {
    let trace: Trace = Rc::new(RefCell::new(Vec::new()));
    let synth = Synthesizer::new(
        MockInterface { trace: trace.clone() },
        MockLePin { trace: trace.clone() },
    );
    let delay = MockDelay { trace: trace.clone() };
    (synth, delay, trace)
}

/// Take and clear everything recorded so far.
pub fn drain(trace: &Trace) -> Vec<Event> {
    trace.borrow_mut().drain(..).collect()
}

/// Register words shifted out, in order.
pub fn words(events: &[Event]) -> Vec<u32> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Write { bytes, .. } => Some(u32::from_be_bytes(*bytes)),
            _ => None,
        })
        .collect()
}

/// Delays that are not part of an LE frame, in order.
pub fn settle_delays(events: &[Event]) -> Vec<u32> {
    let mut out = Vec::new();
    for (i, e) in events.iter().enumerate() {
        if let Event::DelayUs(us) = e {
            let in_frame = i > 0 && events[i - 1] == Event::LeHigh;
            if !in_frame {
                out.push(*us);
            }
        }
    }
    out
}

/// Assert every write is framed LE low, write, LE high, 3 us, LE low.
pub fn assert_framed(events: &[Event]) {
    for (i, e) in events.iter().enumerate() {
        if let Event::Write { address, bytes } = e {
            assert_eq!(
                (bytes[3] & 0xF),
                *address,
                "address must match control bits"
            );
            assert_eq!(events[i - 1], Event::LeLow, "LE low before write {}", i);
            assert_eq!(
                &events[i + 1..i + 4],
                &[Event::LeHigh, Event::DelayUs(3), Event::LeLow],
                "LE pulse after write {}",
                i
            );
        }
    }
}
