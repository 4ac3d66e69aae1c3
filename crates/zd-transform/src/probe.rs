// SPDX-License-Identifier: AGPL-3.0-or-later
// Part of the zd workspace — Licensed under AGPL-3.0-or-later.

//! The six canonical probe elements.
//!
//! Each probe is the sum of two standard basis vectors, `e_a + e_b` with
//! `a + b = 15`, embedded in the 32-dimensional coefficient space.  These
//! index pairs are the known zero-divisor patterns that make the kernel
//! locus meaningful; everything downstream treats the probe as an opaque
//! coefficient vector.

use serde::{Deserialize, Serialize};
use zd_algebra::Element;

use crate::error::TransformError;

/// Embedding dimension shared by every canonical probe.
pub const EMBEDDING_DIM: usize = 32;

/// One of the six fixed zero-divisor probes, selected by id in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalProbe {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
}

impl CanonicalProbe {
    pub const ALL: [CanonicalProbe; 6] = [
        CanonicalProbe::P1,
        CanonicalProbe::P2,
        CanonicalProbe::P3,
        CanonicalProbe::P4,
        CanonicalProbe::P5,
        CanonicalProbe::P6,
    ];

    /// Integer identifier in `1..=6`.
    pub fn id(self) -> u8 {
        match self {
            CanonicalProbe::P1 => 1,
            CanonicalProbe::P2 => 2,
            CanonicalProbe::P3 => 3,
            CanonicalProbe::P4 => 4,
            CanonicalProbe::P5 => 5,
            CanonicalProbe::P6 => 6,
        }
    }

    /// Basis indices of the two unit coefficients.
    pub fn index_pair(self) -> (usize, usize) {
        match self {
            CanonicalProbe::P1 => (1, 14),
            CanonicalProbe::P2 => (2, 13),
            CanonicalProbe::P3 => (3, 12),
            CanonicalProbe::P4 => (4, 11),
            CanonicalProbe::P5 => (5, 10),
            CanonicalProbe::P6 => (6, 9),
        }
    }

    /// Materialize the probe as a 32-dimensional element.
    pub fn element(self) -> Element {
        let (a, b) = self.index_pair();
        Element::basis_pair(EMBEDDING_DIM, a, b)
            .expect("canonical probe indices fit the 32-dimensional embedding")
    }
}

impl TryFrom<u8> for CanonicalProbe {
    type Error = TransformError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(CanonicalProbe::P1),
            2 => Ok(CanonicalProbe::P2),
            3 => Ok(CanonicalProbe::P3),
            4 => Ok(CanonicalProbe::P4),
            5 => Ok(CanonicalProbe::P5),
            6 => Ok(CanonicalProbe::P6),
            id => Err(TransformError::InvalidProbeId { id }),
        }
    }
}
