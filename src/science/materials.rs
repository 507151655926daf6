// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Dreux-Gorisse Mix Design Core
// Aggregate and mix parameter definitions (JSON parity with the form layer)

use serde::{Deserialize, Serialize};
use std::fmt;

/// One calibration point of a particle-size distribution
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SieveReading {
    pub size: f64,    // mm
    pub passing: f64, // cumulative % passing
}

impl SieveReading {
    pub fn new(size: f64, passing: f64) -> Self {
        Self { size, passing }
    }
}

/// Stable identity of an aggregate, independent of its display name
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(pub String);

impl AggregateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AggregateId {
    fn from(s: &str) -> Self {
        AggregateId(s.to_string())
    }
}

impl From<String> for AggregateId {
    fn from(s: String) -> Self {
        AggregateId(s)
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw granular material contributing to the blend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub id: AggregateId,
    pub name: String,
    #[serde(default = "default_real_density")]
    pub real_density: f64, // kg/m³
    #[serde(default = "default_bulk_density")]
    pub bulk_density: f64, // kg/m³
    #[serde(default)]
    pub moisture: f64, // %
    /// Water absorption (%). Accepted but not applied by the formulation.
    #[serde(default)]
    pub absorption: f64,
    #[serde(default)]
    pub proportion: f64, // % of skeleton volume
    #[serde(default)]
    pub sieves: Vec<SieveReading>,
    /// Display colour, opaque to the calculations
    #[serde(default)]
    pub color: String,
}

fn default_real_density() -> f64 {
    2650.0
}

fn default_bulk_density() -> f64 {
    1500.0
}

impl Aggregate {
    pub fn new(id: impl Into<AggregateId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            real_density: default_real_density(),
            bulk_density: default_bulk_density(),
            moisture: 0.0,
            absorption: 0.0,
            proportion: 0.0,
            sieves: Vec::new(),
            color: String::new(),
        }
    }

    /// Builder-style helper for fixtures and samples
    pub fn with_sieves(mut self, readings: &[(f64, f64)]) -> Self {
        for &(size, passing) in readings {
            self.upsert_sieve(size, passing);
        }
        self
    }

    /// Passing at exactly `size`; no interpolation between neighbours
    pub fn passing_at(&self, size: f64) -> Option<f64> {
        self.sieves
            .iter()
            .find(|s| s.size == size)
            .map(|s| s.passing)
    }

    /// Replace the reading at `size`, or insert it keeping the sizes ascending
    pub fn upsert_sieve(&mut self, size: f64, passing: f64) {
        if let Some(existing) = self.sieves.iter_mut().find(|s| s.size == size) {
            existing.passing = passing;
            return;
        }
        let at = self.sieves.partition_point(|s| s.size < size);
        self.sieves.insert(at, SieveReading::new(size, passing));
    }
}

/// Consistency classes (NF EN 206), driest to most fluid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlumpClass {
    S1,
    S2,
    S3,
    S4,
    S5,
}

impl SlumpClass {
    pub const ALL: [SlumpClass; 5] = [
        SlumpClass::S1,
        SlumpClass::S2,
        SlumpClass::S3,
        SlumpClass::S4,
        SlumpClass::S5,
    ];

    /// Offset K applied to the reference curve at D/2.
    ///
    /// One point per class step: S1 = -2, S3 = 0, S5 = +2.
    pub fn k_offset(self) -> f64 {
        match self {
            SlumpClass::S1 => -2.0,
            SlumpClass::S2 => -1.0,
            SlumpClass::S3 => 0.0,
            SlumpClass::S4 => 1.0,
            SlumpClass::S5 => 2.0,
        }
    }

    /// Slump range in mm (lower, upper); S5 is open-ended
    pub fn slump_range_mm(self) -> (f64, Option<f64>) {
        match self {
            SlumpClass::S1 => (10.0, Some(40.0)),
            SlumpClass::S2 => (50.0, Some(90.0)),
            SlumpClass::S3 => (100.0, Some(150.0)),
            SlumpClass::S4 => (160.0, Some(210.0)),
            SlumpClass::S5 => (220.0, None),
        }
    }
}

impl fmt::Display for SlumpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slump_range_mm() {
            (lo, Some(hi)) => write!(f, "{:?} ({}-{} mm)", self, lo, hi),
            (lo, None) => write!(f, "{:?} (>= {} mm)", self, lo),
        }
    }
}

/// Compaction energy on site. Reserved: not consumed by the formulation yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibrationLevel {
    #[serde(alias = "Faible")]
    Low,
    #[serde(alias = "Normale")]
    Normal,
    #[serde(alias = "Forte")]
    High,
}

/// Target mix design inputs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulationParams {
    pub cement_type: String,
    pub cement_density: f64, // kg/m³
    pub cement_dosage: f64,  // kg/m³ of concrete
    pub water_cement_ratio: f64,
    pub air_content: f64, // % of volume
    pub slump_target: SlumpClass,
    pub vibration_level: VibrationLevel,
}

impl Default for FormulationParams {
    fn default() -> Self {
        Self {
            cement_type: "CEM II 42.5".to_string(),
            cement_density: 3100.0,
            cement_dosage: 350.0,
            water_cement_ratio: 0.5,
            air_content: 2.0,
            slump_target: SlumpClass::S3,
            vibration_level: VibrationLevel::Normal,
        }
    }
}
