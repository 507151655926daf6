// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Dreux-Gorisse Mix Design Core
// FormulationEngine: absolute-volume balance of one cubic meter
//
// Volumes in litres, masses in kg, both per m³ of fresh concrete.

use crate::formulas::{
    air_volume, cement_volume, dry_weight, moisture_water, skeleton_volume, water_volume,
    wet_weight,
};
use crate::science::materials::{Aggregate, AggregateId, FormulationParams};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateVolume {
    pub id: AggregateId,
    pub name: String,
    pub volume: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateWeight {
    pub id: AggregateId,
    pub name: String,
    pub dry_weight: f64,
    /// Wet mass to weigh, moisture included
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixVolumes {
    pub cement: f64,
    pub water: f64,
    pub air: f64,
    /// Volume left for the aggregates; negative when paste + air exceed 1000 L
    pub skeleton: f64,
    pub aggregates: Vec<AggregateVolume>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixWeights {
    pub cement: f64,
    pub water_total: f64,
    /// Water to add at the mixer; negative when aggregates carry too much moisture
    pub water_effective: f64,
    pub aggregate_water: f64,
    pub aggregates: Vec<AggregateWeight>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormulationResult {
    pub volumes: MixVolumes,
    pub weights: MixWeights,
}

impl FormulationResult {
    /// Sum of every volume in the balance; 1000 L for any mix with a non-zero blend
    pub fn total_volume(&self) -> f64 {
        self.volumes.cement
            + self.volumes.water
            + self.volumes.air
            + self.volumes.aggregates.iter().map(|a| a.volume).sum::<f64>()
    }

    /// Mass batched per m³: cement, added water and wet aggregates
    pub fn batch_mass(&self) -> f64 {
        self.weights.cement
            + self.weights.water_effective
            + self.weights.aggregates.iter().map(|a| a.weight).sum::<f64>()
    }
}

pub struct FormulationEngine;

impl FormulationEngine {
    /// Compute the volumetric and weight composition of one cubic meter.
    ///
    /// Only `moisture` corrects the water; `absorption` is carried but not applied.
    pub fn formulate(aggregates: &[Aggregate], params: &FormulationParams) -> FormulationResult {
        // 1. Paste and air
        let v_cement = cement_volume(params.cement_dosage, params.cement_density);
        let v_water = water_volume(params.cement_dosage, params.water_cement_ratio);
        let v_air = air_volume(params.air_content);
        let v_skeleton = skeleton_volume(v_cement, v_water, v_air);

        // 2. Skeleton split. A zero sum falls back to 100 so every share is 0.
        let declared: f64 = aggregates.iter().map(|a| a.proportion).sum();
        let total_proportion = if declared == 0.0 { 100.0 } else { declared };

        let mut volumes = Vec::with_capacity(aggregates.len());
        let mut weights = Vec::with_capacity(aggregates.len());
        let mut aggregate_water = 0.0;

        for agg in aggregates {
            let volume = v_skeleton * (agg.proportion / total_proportion);
            let dry = dry_weight(volume, agg.real_density);
            aggregate_water += moisture_water(dry, agg.moisture);

            volumes.push(AggregateVolume {
                id: agg.id.clone(),
                name: agg.name.clone(),
                volume,
            });
            weights.push(AggregateWeight {
                id: agg.id.clone(),
                name: agg.name.clone(),
                dry_weight: dry,
                weight: wet_weight(dry, agg.moisture),
            });
        }

        // 3. Moisture correction
        let water_effective = v_water - aggregate_water;

        FormulationResult {
            volumes: MixVolumes {
                cement: v_cement,
                water: v_water,
                air: v_air,
                skeleton: v_skeleton,
                aggregates: volumes,
            },
            weights: MixWeights {
                cement: params.cement_dosage,
                water_total: v_water,
                water_effective,
                aggregate_water,
                aggregates: weights,
            },
        }
    }
}
