// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use crate::science::materials::SieveReading;

/// Stand-in for the origin on a logarithmic size axis (mm)
pub const ORIGIN_SIZE: f64 = 0.001;

pub struct ReferenceCurveEngine;

impl ReferenceCurveEngine {
    /// Dreux-Gorisse reference curve: O(≈0, 0), A(D/2, 50 + K), B(D, 100).
    ///
    /// Simplified variant: no fineness, dosage or compaction corrections on K.
    pub fn ideal_curve(dmax: f64, k: f64) -> Vec<SieveReading> {
        vec![
            SieveReading::new(ORIGIN_SIZE, 0.0),
            SieveReading::new(dmax / 2.0, 50.0 + k),
            SieveReading::new(dmax, 100.0),
        ]
    }
}
