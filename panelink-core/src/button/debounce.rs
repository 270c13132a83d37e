//! Button debounce and edge detection
//!
//! A mechanical switch bounces for a few milliseconds when it changes
//! position. The debouncer only accepts a new level once the raw input has
//! held it, without any further change, for the whole debounce window.
//! Every accepted change produces exactly one [`Edge`].

use panelink_protocol::Action;

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u32 = 20;

/// A transition between two stable button levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released -> pressed
    Pressed,
    /// Pressed -> released
    Released,
}

impl Edge {
    /// Edge produced by settling on `level` (true = pressed)
    pub fn from_level(level: bool) -> Self {
        if level {
            Edge::Pressed
        } else {
            Edge::Released
        }
    }

    /// Opposite edge
    pub fn opposite(self) -> Self {
        match self {
            Edge::Pressed => Edge::Released,
            Edge::Released => Edge::Pressed,
        }
    }
}

impl From<Edge> for Action {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Pressed => Action::ButtonDown,
            Edge::Released => Action::ButtonUp,
        }
    }
}

/// Debounce state for a single button
///
/// All timestamps are milliseconds from a [`Clock`](crate::traits::Clock)
/// and are compared with wrapping subtraction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Level seen on the most recent sample
    raw_level: bool,
    /// Accepted level (true = pressed)
    debounced_level: bool,
    /// Time the raw level last changed
    last_change_ms: u32,
    /// Last edge handed out, None before the first one
    last_reported_edge: Option<Edge>,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonState {
    /// Create a released button
    pub const fn new() -> Self {
        Self {
            raw_level: false,
            debounced_level: false,
            last_change_ms: 0,
            last_reported_edge: None,
        }
    }

    /// Feed one raw sample
    ///
    /// Returns the edge if the debounced level changed on this sample.
    /// `now_ms` must not go backwards between calls.
    pub fn update(&mut self, raw: bool, now_ms: u32, window_ms: u32) -> Option<Edge> {
        if raw != self.raw_level {
            // Any raw change restarts the window
            self.raw_level = raw;
            self.last_change_ms = now_ms;
        }

        if self.raw_level == self.debounced_level {
            return None;
        }

        if now_ms.wrapping_sub(self.last_change_ms) < window_ms {
            return None;
        }

        self.debounced_level = self.raw_level;
        self.last_change_ms = now_ms;

        let edge = Edge::from_level(self.debounced_level);
        debug_assert_eq!(
            edge,
            self.last_reported_edge.map_or(Edge::Pressed, Edge::opposite)
        );
        self.last_reported_edge = Some(edge);
        Some(edge)
    }

    /// Current debounced level (true = pressed)
    pub fn is_pressed(&self) -> bool {
        self.debounced_level
    }

    /// Level seen on the last sample, before filtering
    pub fn raw_level(&self) -> bool {
        self.raw_level
    }

    /// Time of the last raw change or accepted edge
    pub fn last_change_ms(&self) -> u32 {
        self.last_change_ms
    }

    /// Most recent edge returned by [`update`](Self::update)
    pub fn last_reported_edge(&self) -> Option<Edge> {
        self.last_reported_edge
    }
}
