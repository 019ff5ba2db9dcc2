//! Trace header samples and coordinate scalar decoding

use crate::config::ScalarConvention;
use crate::error::{GeometryError, Result};
use crate::types::{AnnotatedPoint, WorldPoint};
use log::warn;
use serde::{Deserialize, Serialize};

/// Signed SEG-Y coordinate scalar (trace header bytes 71-72)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoordinateScalar(pub i16);

impl CoordinateScalar {
    /// Decode a recorded integer coordinate.
    ///
    /// A negative scalar divides by its absolute value, a positive one
    /// multiplies, and zero leaves the value unscaled.
    pub fn decode(&self, raw: i32, convention: ScalarConvention) -> Result<f64> {
        let scalar = self.0 as f64;
        match self.0 {
            s if s < 0 => Ok(raw as f64 / scalar.abs()),
            0 => Ok(raw as f64),
            s => match convention {
                ScalarConvention::Segy => Ok(raw as f64 * scalar),
                ScalarConvention::DivideOnly => Err(GeometryError::UnsupportedScaleFactor(s)),
            },
        }
    }
}

/// The header fields of one trace needed to place it on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSample {
    pub inline: i32,
    pub crossline: i32,
    pub cdp_x: i32,
    pub cdp_y: i32,
    pub coordinate_scalar: CoordinateScalar,
}

impl HeaderSample {
    pub fn new(inline: i32, crossline: i32, cdp_x: i32, cdp_y: i32, coordinate_scalar: i16) -> Self {
        Self {
            inline,
            crossline,
            cdp_x,
            cdp_y,
            coordinate_scalar: CoordinateScalar(coordinate_scalar),
        }
    }

    pub fn annotated(&self) -> AnnotatedPoint {
        AnnotatedPoint::new(self.inline as i64, self.crossline as i64)
    }

    /// Decoded world position of the trace
    pub fn world(&self, convention: ScalarConvention) -> Result<WorldPoint> {
        if self.coordinate_scalar.0 > 0 {
            warn!(
                "trace ({}, {}) uses a multiplying coordinate scalar {}",
                self.inline, self.crossline, self.coordinate_scalar.0
            );
        }
        Ok(WorldPoint::new(
            self.coordinate_scalar.decode(self.cdp_x, convention)?,
            self.coordinate_scalar.decode(self.cdp_y, convention)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_negative_scalar_divides() {
        let scalar = CoordinateScalar(-10);
        assert_eq!(scalar.decode(20, ScalarConvention::Segy).unwrap(), 2.0);
        assert_eq!(scalar.decode(-35, ScalarConvention::DivideOnly).unwrap(), -3.5);
    }

    #[test]
    fn test_positive_scalar_multiplies() {
        let scalar = CoordinateScalar(100);
        assert_eq!(scalar.decode(3, ScalarConvention::Segy).unwrap(), 300.0);

        let err = scalar.decode(3, ScalarConvention::DivideOnly).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedScaleFactor);
    }

    #[test]
    fn test_zero_scalar_is_identity() {
        assert_eq!(
            CoordinateScalar(0).decode(42, ScalarConvention::DivideOnly).unwrap(),
            42.0
        );
    }

    #[test]
    fn test_extreme_scalar() {
        let scalar = CoordinateScalar(i16::MIN);
        assert_eq!(scalar.decode(32768, ScalarConvention::Segy).unwrap(), 1.0);
    }

    #[test]
    fn test_header_world() {
        let header = HeaderSample::new(1, 10, 80, 40, -10);
        assert_eq!(
            header.world(ScalarConvention::Segy).unwrap(),
            WorldPoint::new(8.0, 4.0)
        );
        assert_eq!(header.annotated(), AnnotatedPoint::new(1, 10));
    }
}
