// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto

//! Mix Design Scenario Tests
//!
//! End-to-end checks through the JSON boundary, as the form layer drives it.

use crate::dreux_kernel::DreuxKernel;
use crate::formulas::dry_weight_from_wet;
use crate::science::grading::GradingEngine;
use crate::science::materials::Aggregate;
use serde_json::{json, Value};

fn params() -> Value {
    json!({
        "cementType": "CEM II 42.5",
        "cementDensity": 3100,
        "cementDosage": 350,
        "waterCementRatio": 0.5,
        "airContent": 2,
        "slumpTarget": "S3",
        "vibrationLevel": "Normale"
    })
}

fn compute(aggregates: &Value, params: &Value) -> Value {
    let out = DreuxKernel::compute_design(&aggregates.to_string(), &params.to_string());
    serde_json::from_str(&out).unwrap()
}

fn f(v: &Value) -> f64 {
    v.as_f64().unwrap()
}

#[test]
fn test_single_aggregate_reference_scenario() {
    let aggregates = json!([{
        "id": "1",
        "name": "Sable",
        "realDensity": 2650,
        "bulkDensity": 1500,
        "moisture": 0,
        "absorption": 0,
        "proportion": 100,
        "sieves": [{ "size": 4, "passing": 100 }],
        "color": "#3b82f6"
    }]);

    let response = compute(&aggregates, &params());
    let res = &response["result"]["formulation"];

    assert!((f(&res["volumes"]["cement"]) - 112.9).abs() < 0.05);
    assert_eq!(f(&res["volumes"]["water"]), 175.0);
    assert_eq!(f(&res["volumes"]["air"]), 20.0);
    assert!((f(&res["volumes"]["skeleton"]) - 692.1).abs() < 0.05);
    assert!((f(&res["weights"]["aggregates"][0]["dryWeight"]) - 1834.0).abs() < 0.5);
    assert_eq!(f(&res["weights"]["waterEffective"]), 175.0);
    assert_eq!(response["events"], json!([]));
}

#[test]
fn test_zero_proportion_scenario() {
    let aggregates = json!([
        { "id": "a", "name": "A", "proportion": 0,
          "sieves": [{ "size": 1, "passing": 40 }, { "size": 4, "passing": 100 }] },
        { "id": "b", "name": "B", "proportion": 0,
          "sieves": [{ "size": 4, "passing": 5 }, { "size": 20, "passing": 100 }] }
    ]);

    let response = compute(&aggregates, &params());
    let result = &response["result"];

    let curve = result["combinedCurve"].as_array().unwrap();
    assert_eq!(curve.len(), 3);
    assert!(curve.iter().all(|p| f(&p["passing"]) == 0.0));

    let volumes = result["formulation"]["volumes"]["aggregates"].as_array().unwrap();
    assert!(volumes.iter().all(|v| f(&v["volume"]) == 0.0));

    assert_eq!(response["events"][0]["topic"], "DESIGN.PROPORTIONS");
    assert_eq!(response["events"][0]["severity"], "INFO");
}

#[test]
fn test_combined_curve_bounded_when_proportions_sum_to_100() {
    let blends = [
        json!([
            { "id": "1", "name": "S", "proportion": 35,
              "sieves": [{ "size": 0.5, "passing": 30 }, { "size": 2, "passing": 80 }, { "size": 4, "passing": 100 }] },
            { "id": "2", "name": "G1", "proportion": 25,
              "sieves": [{ "size": 4, "passing": 10 }, { "size": 10, "passing": 95 }] },
            { "id": "3", "name": "G2", "proportion": 40,
              "sieves": [{ "size": 10, "passing": 20 }, { "size": 20, "passing": 100 }] }
        ]),
        json!([
            { "id": "1", "name": "Fines", "proportion": 100,
              "sieves": [{ "size": 0.063, "passing": 0 }, { "size": 0.125, "passing": 100 }] }
        ]),
    ];

    for blend in blends {
        let aggregates: Vec<Aggregate> = serde_json::from_value(blend).unwrap();
        for point in GradingEngine::combine_curve(&aggregates) {
            assert!(
                (0.0..=100.0).contains(&point.passing),
                "Out of range at {} mm: {}",
                point.size,
                point.passing
            );
        }
    }
}

#[test]
fn test_ideal_curve_scenario() {
    let aggregates = json!([
        { "id": "1", "name": "G", "proportion": 100,
          "sieves": [{ "size": 10, "passing": 60 }, { "size": 20, "passing": 97 }] }
    ]);

    let response = compute(&aggregates, &params());
    assert_eq!(response["result"]["dmax"], json!(20.0));
    assert_eq!(
        response["result"]["idealCurve"],
        json!([
            { "size": 0.001, "passing": 0.0 },
            { "size": 10.0, "passing": 50.0 },
            { "size": 20.0, "passing": 100.0 }
        ])
    );
}

#[test]
fn test_wet_weights_round_trip_to_dry() {
    let aggregates = json!([
        { "id": "1", "name": "Sable 0/4", "realDensity": 2650, "moisture": 3, "proportion": 40 },
        { "id": "2", "name": "Gravillon 4/20", "realDensity": 2700, "moisture": 1, "proportion": 60 }
    ]);

    let response = compute(&aggregates, &params());
    let weights = response["result"]["formulation"]["weights"]["aggregates"]
        .as_array()
        .unwrap();

    for (w, moisture) in weights.iter().zip([3.0, 1.0]) {
        let dry = dry_weight_from_wet(f(&w["weight"]), moisture);
        assert!((dry - f(&w["dryWeight"])).abs() < 1e-9);
    }
}

#[test]
fn test_volume_conservation_across_inputs() {
    for (dosage, wc, air) in [(250.0, 0.65, 1.0), (350.0, 0.5, 2.0), (450.0, 0.4, 6.0)] {
        let p = json!({
            "cementType": "CEM I 52.5",
            "cementDensity": 3150,
            "cementDosage": dosage,
            "waterCementRatio": wc,
            "airContent": air,
            "slumpTarget": "S4",
            "vibrationLevel": "high"
        });
        let aggregates = json!([
            { "id": "1", "name": "S", "realDensity": 2600, "moisture": 4, "proportion": 45 },
            { "id": "2", "name": "G", "realDensity": 2700, "moisture": 0.5, "proportion": 55 }
        ]);

        let response = compute(&aggregates, &p);
        let v = &response["result"]["formulation"]["volumes"];
        let total = f(&v["cement"])
            + f(&v["water"])
            + f(&v["air"])
            + v["aggregates"]
                .as_array()
                .unwrap()
                .iter()
                .map(|a| f(&a["volume"]))
                .sum::<f64>();
        assert!((total - 1000.0).abs() < 1e-6, "Total volume {}", total);
    }
}

#[test]
fn test_empty_design_degrades_gracefully() {
    let response = compute(&json!([]), &params());
    let result = &response["result"];

    assert_eq!(result["combinedCurve"], json!([]));
    assert_eq!(result["dmax"], json!(20.0));
    assert_eq!(result["formulation"]["weights"]["waterEffective"], json!(175.0));
    assert_eq!(response["events"][0]["topic"], "DESIGN.AGGREGATES");
}

#[test]
fn test_malformed_json_returns_error_object() {
    let out = DreuxKernel::compute_design("[{", &params().to_string());
    let response: Value = serde_json::from_str(&out).unwrap();
    assert!(response["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to read design"));
}
