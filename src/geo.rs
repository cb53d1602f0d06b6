//! Device position for profile completion.
//!
//! The catalog backend expects a `"lat,lng"` string with the signup
//! profile. A terminal has no positioning hardware, so the position comes
//! from configuration; the provider is a trait so tests (or a future
//! platform backend) can supply their own.

use std::fmt;

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    /// Formats as `"lat,lng"`, the wire format of the profile request.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Source of the current device position.
pub trait LocationProvider {
    /// Returns the current position, or None when unavailable.
    fn current(&self) -> Option<Coordinates>;
}

/// Position taken from the config file. With none configured, profile
/// completion refuses to submit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLocation {
    coordinates: Option<Coordinates>,
}

impl ConfigLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

impl LocationProvider for ConfigLocation {
    fn current(&self) -> Option<Coordinates> {
        self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let coords = Coordinates {
            latitude: 34.0331,
            longitude: -5.0003,
        };
        assert_eq!(coords.to_string(), "34.0331,-5.0003");
    }

    #[test]
    fn test_config_location_passthrough() {
        let provider = ConfigLocation::new(Some(Coordinates {
            latitude: 1.0,
            longitude: 2.0,
        }));
        assert_eq!(provider.current().unwrap().to_string(), "1,2");

        assert!(ConfigLocation::default().current().is_none());
    }
}
