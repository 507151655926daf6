// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Dreux-Gorisse Mix Design Core
// DreuxKernel: Unified Rust/WASM Mix Design Orchestrator
//

// ============================================================================
// DreuxKernel
// ============================================================================
// Runs the whole pipeline (Dmax -> curves -> formulation) on one MixDesign.
// The form layer calls ONLY this module and re-runs it on every edit.
// ============================================================================

use crate::design::MixDesign;
use crate::error::Result;
use crate::science::formulation::{FormulationEngine, FormulationResult};
use crate::science::grading::GradingEngine;
use crate::science::materials::{Aggregate, FormulationParams, SieveReading, SlumpClass};
use crate::science::reference::ReferenceCurveEngine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DreuxConfig {
    /// Passing (%) a sieve must reach to count towards Dmax
    pub dmax_passing_threshold: f64,
    /// Dmax (mm) when no sieve reaches the threshold
    pub fallback_dmax: f64,
    /// Expected sum of aggregate proportions (%)
    pub proportion_target: f64,
    pub proportion_tolerance: f64,
    pub emit_events: bool,
}

impl Default for DreuxConfig {
    fn default() -> Self {
        Self {
            dmax_passing_threshold: 95.0,
            fallback_dmax: 20.0,
            proportion_target: 100.0,
            proportion_tolerance: 0.01,
            emit_events: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub topic: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationEvent {
    fn new(topic: &str, severity: Severity, message: String) -> Self {
        Self {
            topic: topic.to_string(),
            message,
            severity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignReport {
    pub dmax: f64,
    pub k_offset: f64,
    pub combined_curve: Vec<SieveReading>,
    pub ideal_curve: Vec<SieveReading>,
    pub formulation: FormulationResult,
    pub total_proportion: f64,
    pub batch_mass: f64,
    /// Aggregates that carry no sieve readings, by name
    pub ungraded: Vec<String>,
    pub compute_time_ms: f64,
}

#[derive(Serialize, Deserialize)]
pub struct DesignResponse {
    pub result: DesignReport,
    pub events: Vec<ValidationEvent>,
}

#[wasm_bindgen]
pub struct DreuxKernel;

#[wasm_bindgen]
impl DreuxKernel {
    /// Main entry point: compute the full design from the form's JSON.
    ///
    /// # Arguments
    /// * `aggregates_json` - JSON array of aggregates (camelCase fields)
    /// * `params_json` - JSON object of formulation parameters
    ///
    /// # Returns
    /// `{"result": DesignReport, "events": [...]}`, or `{"error": "..."}` when
    /// either input fails to parse
    ///
    /// # Example
    /// ```json
    /// aggregates_json: [{"id": "1", "name": "Sable 0/4", "realDensity": 2650, "proportion": 40, "sieves": [{"size": 4, "passing": 100}]}]
    /// params_json: {"cementType": "CEM II 42.5", "cementDensity": 3100, "cementDosage": 350, "waterCementRatio": 0.5, "airContent": 2, "slumpTarget": "S3", "vibrationLevel": "normal"}
    /// ```
    #[wasm_bindgen]
    pub fn compute_design(aggregates_json: &str, params_json: &str) -> String {
        match Self::respond(aggregates_json, params_json) {
            Ok(response) => serde_json::to_string(&response).unwrap_or_default(),
            Err(e) => serde_json::to_string(&serde_json::json!({
                "error": format!("Failed to read design: {}", e)
            }))
            .unwrap_or_default(),
        }
    }

    /// Same as `compute_design`, returned as a JS object instead of a string
    #[wasm_bindgen]
    pub fn compute_design_js(
        aggregates_json: &str,
        params_json: &str,
    ) -> std::result::Result<JsValue, JsValue> {
        let response = Self::respond(aggregates_json, params_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to read design: {}", e)))?;
        Ok(serde_wasm_bindgen::to_value(&response)?)
    }

    /// Reference-curve offset K for a slump class given as "S1".."S5"
    #[wasm_bindgen]
    pub fn k_offset_for(slump_json: &str) -> f64 {
        serde_json::from_str::<SlumpClass>(slump_json)
            .or_else(|_| serde_json::from_value(serde_json::Value::String(slump_json.to_string())))
            .map(|s| s.k_offset())
            .unwrap_or(0.0)
    }
}

/// Pure Rust Implementation (Non-WASM-Bindgen)
impl DreuxKernel {
    /// Decode the two form payloads, compute and validate with the default config
    pub fn respond(aggregates_json: &str, params_json: &str) -> Result<DesignResponse> {
        let aggregates: Vec<Aggregate> = serde_json::from_str(aggregates_json)?;
        let params: FormulationParams = serde_json::from_str(params_json)?;
        let design = MixDesign { aggregates, params };
        Ok(Self::run(&design, &DreuxConfig::default()))
    }

    /// Compute and, when enabled, attach the validation events
    pub fn run(design: &MixDesign, config: &DreuxConfig) -> DesignResponse {
        let result = Self::compute(design, config);
        let events = if config.emit_events {
            Self::validate(&result, config)
        } else {
            Vec::new()
        };
        DesignResponse { result, events }
    }

    /// [CORE] Pure pipeline. Never fails; degenerate inputs give zero/empty output.
    pub fn compute(design: &MixDesign, config: &DreuxConfig) -> DesignReport {
        let start = instant::Instant::now();
        let aggregates = &design.aggregates;

        // 1. Dmax from the measured gradings
        let dmax = GradingEngine::max_aggregate_size(
            aggregates,
            config.dmax_passing_threshold,
            config.fallback_dmax,
        );

        // 2. Curves
        let k_offset = design.params.slump_target.k_offset();
        let combined_curve = GradingEngine::combine_curve(aggregates);
        let ideal_curve = ReferenceCurveEngine::ideal_curve(dmax, k_offset);

        // 3. Cubic meter balance
        let formulation = FormulationEngine::formulate(aggregates, &design.params);
        let batch_mass = formulation.batch_mass();

        let ungraded = aggregates
            .iter()
            .filter(|a| a.sieves.is_empty())
            .map(|a| a.name.clone())
            .collect();

        debug!(
            aggregates = aggregates.len(),
            dmax,
            k_offset,
            skeleton = formulation.volumes.skeleton,
            "computed mix design"
        );

        DesignReport {
            dmax,
            k_offset,
            combined_curve,
            ideal_curve,
            formulation,
            total_proportion: GradingEngine::total_proportion(aggregates),
            batch_mass,
            ungraded,
            compute_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Out-of-range conditions surfaced as events, never as errors
    pub fn validate(report: &DesignReport, config: &DreuxConfig) -> Vec<ValidationEvent> {
        let mut events = Vec::new();
        let volumes = &report.formulation.volumes;
        let weights = &report.formulation.weights;

        if volumes.aggregates.is_empty() {
            events.push(ValidationEvent::new(
                "DESIGN.AGGREGATES",
                Severity::Info,
                "No aggregates: not yet a valid mix".to_string(),
            ));
        } else if report.total_proportion == 0.0 {
            events.push(ValidationEvent::new(
                "DESIGN.PROPORTIONS",
                Severity::Info,
                "All proportions are zero: not yet a valid mix".to_string(),
            ));
        } else if (report.total_proportion - config.proportion_target).abs()
            > config.proportion_tolerance
        {
            events.push(ValidationEvent::new(
                "DESIGN.PROPORTIONS",
                Severity::Warning,
                format!(
                    "Proportions sum to {:.1} % instead of {:.0} % (rescaled)",
                    report.total_proportion, config.proportion_target
                ),
            ));
        }

        for name in &report.ungraded {
            events.push(ValidationEvent::new(
                "GRADING.SIEVES",
                Severity::Info,
                format!("{} has no sieve readings", name),
            ));
        }

        if volumes.skeleton < 0.0 {
            events.push(ValidationEvent::new(
                "FORMULATION.VOLUME",
                Severity::Critical,
                format!(
                    "Paste and air exceed 1 m³: skeleton volume {:.1} L",
                    volumes.skeleton
                ),
            ));
        }

        if weights.water_effective < 0.0 {
            events.push(ValidationEvent::new(
                "FORMULATION.WATER",
                Severity::Warning,
                format!(
                    "Aggregates carry {:.1} L more water than the mix needs",
                    -weights.water_effective
                ),
            ));
        }

        for event in events.iter().filter(|e| e.severity != Severity::Info) {
            warn!(topic = %event.topic, "{}", event.message);
        }

        events
    }
}
