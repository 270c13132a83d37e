//! Component (node) names

use core::fmt;

use heapless::String;

/// Maximum component name length in bytes
pub const MAX_NAME_LEN: usize = 16;

/// Errors from validating a component name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NameError {
    /// Name is empty
    Empty,
    /// Name exceeds [`MAX_NAME_LEN`]
    TooLong,
    /// Name contains a byte outside `[A-Za-z0-9_-]`
    InvalidChar,
}

/// Short ASCII identifier of a panel node, e.g. `arduino_1`
///
/// Only letters, digits, `_` and `-` are accepted, which keeps the name safe
/// to splice into a JSON string without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String<MAX_NAME_LEN>);

impl ComponentName {
    /// Validate and store a name
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(NameError::TooLong);
        }
        if !name.bytes().all(is_name_byte) {
            return Err(NameError::InvalidChar);
        }

        let mut s = String::new();
        s.push_str(name).map_err(|_| NameError::TooLong)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ComponentName {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str())
    }
}
