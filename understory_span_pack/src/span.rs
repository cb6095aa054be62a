// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item footprints measured in cells.

use crate::PackError;

/// An item's footprint in whole grid cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanSize {
    /// Cells covered along the x axis.
    pub width: u32,
    /// Cells covered along the y axis.
    pub height: u32,
}

impl SpanSize {
    /// A single cell.
    pub const ONE: Self = Self::new(1, 1);

    /// Create a span of `width × height` cells.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A `side × side` span.
    #[inline]
    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Checks that both sides lie in `1..=spans`.
    pub const fn validate(self, spans: u32) -> Result<Self, PackError> {
        if self.width == 0 || self.height == 0 || self.width > spans || self.height > spans {
            Err(PackError::InvalidSpanSize {
                width: self.width,
                height: self.height,
                spans,
            })
        } else {
            Ok(self)
        }
    }
}

impl Default for SpanSize {
    fn default() -> Self {
        Self::ONE
    }
}

#[cfg(test)]
mod tests {
    use super::SpanSize;
    use crate::PackError;

    #[test]
    fn validate_bounds() {
        assert_eq!(SpanSize::ONE.validate(1), Ok(SpanSize::ONE));
        assert_eq!(SpanSize::new(4, 3).validate(4), Ok(SpanSize::new(4, 3)));
        assert_eq!(
            SpanSize::new(2, 1).validate(1),
            Err(PackError::InvalidSpanSize {
                width: 2,
                height: 1,
                spans: 1
            })
        );
        assert!(SpanSize::new(0, 1).validate(4).is_err());
        assert!(SpanSize::new(1, 0).validate(4).is_err());
        assert!(SpanSize::new(1, 5).validate(4).is_err());
    }
}
