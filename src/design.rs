// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Dreux-Gorisse Mix Design Core
// MixDesign: editable input snapshot owned by the presentation layer
//
// Every edit goes through a typed operation; the engines only ever see the
// resulting value.

use crate::error::{DesignError, Result};
use crate::science::grading::GradingEngine;
use crate::science::materials::{Aggregate, AggregateId, FormulationParams};
use serde::{Deserialize, Serialize};

/// Display colours handed out to new aggregates, in order
pub const AGGREGATE_PALETTE: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

/// One colour per aggregate
pub const MAX_AGGREGATES: usize = AGGREGATE_PALETTE.len();

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixDesign {
    #[serde(default)]
    pub aggregates: Vec<Aggregate>,
    #[serde(default)]
    pub params: FormulationParams,
}

impl Default for MixDesign {
    /// Reference design: a 0/4 sand and a 4/20 gravel at 40/60
    fn default() -> Self {
        let mut sand = Aggregate::new("1", "Sable 0/4").with_sieves(&[
            (0.063, 2.0),
            (0.125, 5.0),
            (0.25, 15.0),
            (0.5, 35.0),
            (1.0, 60.0),
            (2.0, 85.0),
            (4.0, 100.0),
        ]);
        sand.real_density = 2650.0;
        sand.bulk_density = 1500.0;
        sand.moisture = 3.0;
        sand.absorption = 1.0;
        sand.proportion = 40.0;
        sand.color = AGGREGATE_PALETTE[0].to_string();

        let mut gravel = Aggregate::new("2", "Gravillon 4/20").with_sieves(&[
            (4.0, 5.0),
            (8.0, 30.0),
            (10.0, 50.0),
            (16.0, 90.0),
            (20.0, 100.0),
        ]);
        gravel.real_density = 2700.0;
        gravel.bulk_density = 1450.0;
        gravel.moisture = 1.0;
        gravel.absorption = 0.5;
        gravel.proportion = 60.0;
        gravel.color = AGGREGATE_PALETTE[1].to_string();

        Self {
            aggregates: vec![sand, gravel],
            params: FormulationParams::default(),
        }
    }
}

impl MixDesign {
    pub fn new(params: FormulationParams) -> Self {
        Self {
            aggregates: Vec::new(),
            params,
        }
    }

    pub fn aggregate(&self, id: &AggregateId) -> Option<&Aggregate> {
        self.aggregates.iter().find(|a| &a.id == id)
    }

    pub fn total_proportion(&self) -> f64 {
        GradingEngine::total_proportion(&self.aggregates)
    }

    pub fn is_proportion_balanced(&self, tolerance: f64) -> bool {
        (self.total_proportion() - 100.0).abs() <= tolerance
    }

    /// Append a blank aggregate with the next palette colour
    pub fn add_aggregate(&mut self) -> Result<&Aggregate> {
        if self.aggregates.len() >= MAX_AGGREGATES {
            return Err(DesignError::TooManyAggregates {
                max: MAX_AGGREGATES,
            });
        }
        let mut agg = Aggregate::new(self.fresh_id(), "New aggregate");
        agg.color = AGGREGATE_PALETTE[self.aggregates.len()].to_string();
        self.aggregates.push(agg);
        Ok(&self.aggregates[self.aggregates.len() - 1])
    }

    pub fn remove_aggregate(&mut self, id: &AggregateId) -> Result<Aggregate> {
        let index = self
            .aggregates
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| DesignError::UnknownAggregate(id.to_string()))?;
        Ok(self.aggregates.remove(index))
    }

    pub fn rename(&mut self, id: &AggregateId, name: impl Into<String>) -> Result<()> {
        self.aggregate_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_real_density(&mut self, id: &AggregateId, density: f64) -> Result<()> {
        self.aggregate_mut(id)?.real_density = density;
        Ok(())
    }

    pub fn set_bulk_density(&mut self, id: &AggregateId, density: f64) -> Result<()> {
        self.aggregate_mut(id)?.bulk_density = density;
        Ok(())
    }

    pub fn set_moisture(&mut self, id: &AggregateId, moisture: f64) -> Result<()> {
        self.aggregate_mut(id)?.moisture = moisture;
        Ok(())
    }

    pub fn set_absorption(&mut self, id: &AggregateId, absorption: f64) -> Result<()> {
        self.aggregate_mut(id)?.absorption = absorption;
        Ok(())
    }

    pub fn set_proportion(&mut self, id: &AggregateId, proportion: f64) -> Result<()> {
        self.aggregate_mut(id)?.proportion = proportion;
        Ok(())
    }

    pub fn upsert_sieve(&mut self, id: &AggregateId, size: f64, passing: f64) -> Result<()> {
        self.aggregate_mut(id)?.upsert_sieve(size, passing);
        Ok(())
    }

    pub fn set_params(&mut self, params: FormulationParams) {
        self.params = params;
    }

    fn aggregate_mut(&mut self, id: &AggregateId) -> Result<&mut Aggregate> {
        self.aggregates
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| DesignError::UnknownAggregate(id.to_string()))
    }

    // Ids are never reused while the aggregate they name is still present
    fn fresh_id(&self) -> AggregateId {
        let mut n = self.aggregates.len() + 1;
        loop {
            let candidate = AggregateId(n.to_string());
            if self.aggregate(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_design_is_balanced() {
        let design = MixDesign::default();
        assert_eq!(design.aggregates.len(), 2);
        assert_eq!(design.total_proportion(), 100.0);
        assert!(design.is_proportion_balanced(0.01));
    }

    #[test]
    fn test_add_aggregate_assigns_palette_and_unique_id() {
        let mut design = MixDesign::default();
        let added = design.add_aggregate().unwrap().clone();

        assert_eq!(added.color, AGGREGATE_PALETTE[2]);
        assert_eq!(added.proportion, 0.0);
        assert!(added.sieves.is_empty());
        assert_eq!(
            design.aggregates.iter().filter(|a| a.id == added.id).count(),
            1
        );
    }

    #[test]
    fn test_fresh_id_skips_ids_in_use() {
        let mut design = MixDesign::default();
        design.remove_aggregate(&AggregateId::from("1")).unwrap();
        // One aggregate left with id "2": the next id must not collide with it
        let added = design.add_aggregate().unwrap().clone();
        assert_ne!(added.id, AggregateId::from("2"));
    }

    #[test]
    fn test_add_aggregate_caps_at_palette_size() {
        let mut design = MixDesign::default();
        for _ in design.aggregates.len()..MAX_AGGREGATES {
            design.add_aggregate().unwrap();
        }
        let err = design.add_aggregate().unwrap_err();
        assert!(matches!(err, DesignError::TooManyAggregates { max: 5 }));
        assert_eq!(design.aggregates.len(), MAX_AGGREGATES);
    }

    #[test]
    fn test_remove_unknown_aggregate_fails() {
        let mut design = MixDesign::default();
        let err = design.remove_aggregate(&AggregateId::from("nope")).unwrap_err();
        assert!(matches!(err, DesignError::UnknownAggregate(ref id) if id == "nope"));
        assert_eq!(design.aggregates.len(), 2);
    }

    #[test]
    fn test_typed_setters_update_only_target() {
        let mut design = MixDesign::default();
        let sand = AggregateId::from("1");

        design.rename(&sand, "Sable roulé").unwrap();
        design.set_real_density(&sand, 2600.0).unwrap();
        design.set_bulk_density(&sand, 1550.0).unwrap();
        design.set_moisture(&sand, 4.5).unwrap();
        design.set_absorption(&sand, 1.2).unwrap();
        design.set_proportion(&sand, 35.0).unwrap();

        let updated = design.aggregate(&sand).unwrap();
        assert_eq!(updated.name, "Sable roulé");
        assert_eq!(updated.real_density, 2600.0);
        assert_eq!(updated.bulk_density, 1550.0);
        assert_eq!(updated.moisture, 4.5);
        assert_eq!(updated.absorption, 1.2);
        assert_eq!(updated.proportion, 35.0);

        let gravel = design.aggregate(&AggregateId::from("2")).unwrap();
        assert_eq!(gravel.proportion, 60.0);
        assert!(!design.is_proportion_balanced(0.01));
    }

    #[test]
    fn test_upsert_sieve_through_design() {
        let mut design = MixDesign::default();
        let gravel = AggregateId::from("2");

        design.upsert_sieve(&gravel, 12.5, 70.0).unwrap();
        design.upsert_sieve(&gravel, 20.0, 98.0).unwrap();

        let agg = design.aggregate(&gravel).unwrap();
        assert_eq!(agg.passing_at(12.5), Some(70.0));
        assert_eq!(agg.passing_at(20.0), Some(98.0));
        assert!(agg.sieves.windows(2).all(|w| w[0].size < w[1].size));

        assert!(design.upsert_sieve(&AggregateId::from("9"), 1.0, 1.0).is_err());
    }

    #[test]
    fn test_design_json_round_trip() {
        let design = MixDesign::default();
        let json = serde_json::to_string(&design).unwrap();
        let back: MixDesign = serde_json::from_str(&json).unwrap();
        assert_eq!(design, back);
    }
}
