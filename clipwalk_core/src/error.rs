// Copyright 2026 the Clipwalk Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry diagnostics.

use core::fmt;

/// Malformed geometry supplied by layout or by a caller.
///
/// The traversal never fails on these; it treats the node as zero-area and
/// reports the problem through [`TraceSink::on_invalid_geometry`].
///
/// [`TraceSink::on_invalid_geometry`]: crate::trace::TraceSink::on_invalid_geometry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidGeometry {
    /// The node's bounds contain NaN or an infinity.
    NonFiniteBounds,
    /// The node's bounds have a negative width or height.
    NegativeSize,
    /// The node's render transform contains NaN or an infinity.
    NonFiniteTransform,
}

impl fmt::Display for InvalidGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteBounds => write!(f, "node bounds are not finite"),
            Self::NegativeSize => write!(f, "node bounds have a negative size"),
            Self::NonFiniteTransform => write!(f, "node render transform is not finite"),
        }
    }
}

impl core::error::Error for InvalidGeometry {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            InvalidGeometry::NegativeSize.to_string(),
            "node bounds have a negative size"
        );
        assert_eq!(
            InvalidGeometry::NonFiniteTransform.to_string(),
            "node render transform is not finite"
        );
    }
}
