//! Button reporter
//!
//! Owns one input pin and its debounce state, and turns debounced edges
//! into notifications written to a [`Sink`].

use panelink_protocol::{ComponentName, EncodeError, Notification};

use super::debounce::{ButtonState, Edge};
use crate::traits::{Clock, InputPin, Sink};

/// Errors that can occur while reporting an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError<E> {
    /// Notification did not fit the line buffer
    Encode(EncodeError),
    /// Sink rejected the line
    Sink(E),
}

/// Build the notification for an edge on the named component
pub fn notification_for(edge: Edge, name: &ComponentName) -> Notification {
    Notification::new(edge.into(), name.clone())
}

/// Debounced, edge-triggered reporter for a single button
pub struct ButtonReporter<P> {
    pin: P,
    state: ButtonState,
    debounce_ms: u32,
    name: ComponentName,
}

impl<P: InputPin> ButtonReporter<P> {
    /// Create a reporter for a released button
    pub fn new(pin: P, name: ComponentName, debounce_ms: u32) -> Self {
        Self {
            pin,
            state: ButtonState::new(),
            debounce_ms,
            name,
        }
    }

    /// Sample the pin and run the debouncer
    ///
    /// `now_ms` must be non-decreasing across calls.
    pub fn poll(&mut self, now_ms: u32) -> Option<Edge> {
        let raw = self.pin.is_high();
        self.state.update(raw, now_ms, self.debounce_ms)
    }

    /// Write the notification for `edge` to the sink
    ///
    /// Returns the notification that was written.
    pub fn report<S: Sink>(
        &self,
        edge: Edge,
        sink: &mut S,
    ) -> Result<Notification, ReportError<S::Error>> {
        let notification = notification_for(edge, &self.name);
        let line = notification.encode().map_err(ReportError::Encode)?;
        sink.write_line(&line).map_err(ReportError::Sink)?;
        Ok(notification)
    }

    /// Poll with the current clock time and report any edge
    pub fn poll_and_report<C: Clock, S: Sink>(
        &mut self,
        clock: &C,
        sink: &mut S,
    ) -> Result<Option<Edge>, ReportError<S::Error>> {
        match self.poll(clock.now_ms()) {
            Some(edge) => {
                self.report(edge, sink)?;
                Ok(Some(edge))
            }
            None => Ok(None),
        }
    }

    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    pub fn is_pressed(&self) -> bool {
        self.state.is_pressed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use std::rc::Rc;

    /// Pin whose level is set from the test
    #[derive(Clone, Default)]
    struct FakePin(Rc<Cell<bool>>);

    impl FakePin {
        fn set(&self, level: bool) {
            self.0.set(level);
        }
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> bool {
            self.0.get()
        }
    }

    struct FakeClock(Cell<u32>);

    impl Clock for FakeClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    #[derive(Default)]
    struct VecSink {
        lines: Vec<String>,
    }

    impl Sink for VecSink {
        type Error = ();

        fn write_line(&mut self, line: &str) -> Result<(), ()> {
            self.lines.push(line.to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    impl Sink for BrokenSink {
        type Error = &'static str;

        fn write_line(&mut self, _line: &str) -> Result<(), Self::Error> {
            Err("disconnected")
        }
    }

    fn reporter(name: &str) -> (ButtonReporter<FakePin>, FakePin) {
        let pin = FakePin::default();
        let reporter = ButtonReporter::new(pin.clone(), ComponentName::new(name).unwrap(), 20);
        (reporter, pin)
    }

    #[test]
    fn test_press_reported_as_button_down() {
        let (mut reporter, pin) = reporter("arduino_2");
        let mut sink = VecSink::default();

        pin.set(true);
        assert_eq!(reporter.poll(100), None);
        let edge = reporter.poll(121).unwrap();
        assert_eq!(edge, Edge::Pressed);

        reporter.report(edge, &mut sink).unwrap();
        assert_eq!(
            sink.lines,
            [r#"{"action": "button_down", "name": "arduino_2"}"#]
        );
    }

    #[test]
    fn test_poll_and_report_full_cycle() {
        let (mut reporter, pin) = reporter("arduino_1");
        let clock = FakeClock(Cell::new(0));
        let mut sink = VecSink::default();

        let mut run = |until: u32| {
            while clock.0.get() < until {
                reporter.poll_and_report(&clock, &mut sink).unwrap();
                clock.0.set(clock.0.get() + 1);
            }
        };

        run(50);
        pin.set(true);
        run(200);
        pin.set(false);
        run(400);

        assert_eq!(
            sink.lines,
            [
                r#"{"action": "button_down", "name": "arduino_1"}"#,
                r#"{"action": "button_up", "name": "arduino_1"}"#,
            ]
        );
    }

    #[test]
    fn test_held_button_single_notification() {
        let (mut reporter, pin) = reporter("arduino_1");
        let clock = FakeClock(Cell::new(0));
        let mut sink = VecSink::default();

        pin.set(true);
        for t in 0..1000 {
            clock.0.set(t);
            reporter.poll_and_report(&clock, &mut sink).unwrap();
        }
        assert_eq!(sink.lines.len(), 1);
        assert!(reporter.is_pressed());
    }

    #[test]
    fn test_sink_error_is_returned() {
        let (mut reporter, pin) = reporter("arduino_1");
        let clock = FakeClock(Cell::new(0));

        pin.set(true);
        assert_eq!(reporter.poll_and_report(&clock, &mut BrokenSink), Ok(None));
        clock.0.set(20);
        assert_eq!(
            reporter.poll_and_report(&clock, &mut BrokenSink),
            Err(ReportError::Sink("disconnected"))
        );

        // The edge is consumed even though the write failed
        clock.0.set(40);
        assert_eq!(reporter.poll_and_report(&clock, &mut BrokenSink), Ok(None));
        assert!(reporter.is_pressed());
    }

    #[test]
    fn test_notification_for() {
        let name = ComponentName::new("arduino_2").unwrap();
        let n = notification_for(Edge::Released, &name);
        assert_eq!(
            n.encode().unwrap().as_str(),
            r#"{"action": "button_up", "name": "arduino_2"}"#
        );
    }
}
