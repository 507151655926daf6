// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Volumetric Formulas for Concrete Batching
//!
//! Pure scalar functions for the absolute-volume balance of one cubic meter.
//! Densities are kg/m³, volumes are litres, proportions and moisture are %.
//!
//! References:
//! - Dreux & Festa (1998): Nouveau guide du béton, absolute volume method
//! - NF EN 1097-6: Aggregate density and water content

use wasm_bindgen::prelude::*;

/// Litres in one cubic meter of concrete
pub const LITRES_PER_M3: f64 = 1000.0;

// ============================================================================
// PASTE & AIR VOLUMES
// ============================================================================

/// Absolute volume of cement
///
/// V_c = C / ρ_c * 1000
///
/// # Arguments
/// * `dosage` - Cement dosage (kg/m³)
/// * `density` - Cement absolute density (kg/m³, typically 3000-3200)
///
/// # Returns
/// Cement volume in L/m³, or 0 when the density is not positive
#[wasm_bindgen]
pub fn cement_volume(dosage: f64, density: f64) -> f64 {
    if density <= 0.0 {
        return 0.0;
    }
    dosage / density * LITRES_PER_M3
}

/// Theoretical mixing water (1 kg = 1 L)
///
/// E = C * (W/C)
#[wasm_bindgen]
pub fn water_volume(dosage: f64, water_cement_ratio: f64) -> f64 {
    dosage * water_cement_ratio
}

/// Entrapped/entrained air: 1 % of a cubic meter is 10 L
#[wasm_bindgen]
pub fn air_volume(air_content: f64) -> f64 {
    air_content * 10.0
}

/// Volume left for the granular skeleton
///
/// May go negative when the paste and air already exceed 1000 L.
#[wasm_bindgen]
pub fn skeleton_volume(cement: f64, water: f64, air: f64) -> f64 {
    LITRES_PER_M3 - cement - water - air
}

// ============================================================================
// AGGREGATE MASSES
// ============================================================================

/// Dry mass of an aggregate volume
///
/// M = V (L) * ρ_r (kg/m³) / 1000
#[wasm_bindgen]
pub fn dry_weight(volume: f64, real_density: f64) -> f64 {
    volume * real_density / LITRES_PER_M3
}

/// Water carried by a moist aggregate (kg, equal to litres)
#[wasm_bindgen]
pub fn moisture_water(dry_weight: f64, moisture: f64) -> f64 {
    dry_weight * moisture / 100.0
}

/// Wet mass to weigh at the plant for a given dry mass
#[wasm_bindgen]
pub fn wet_weight(dry_weight: f64, moisture: f64) -> f64 {
    dry_weight + moisture_water(dry_weight, moisture)
}

/// Reverse moisture correction: dry mass contained in a wet weighing
///
/// M_dry = M_wet / (1 + w/100)
#[wasm_bindgen]
pub fn dry_weight_from_wet(wet_weight: f64, moisture: f64) -> f64 {
    let factor = 1.0 + moisture / 100.0;
    if factor <= 0.0 {
        return wet_weight;
    }
    wet_weight / factor
}

// ============================================================================
// TESTS
// ============================================================================
