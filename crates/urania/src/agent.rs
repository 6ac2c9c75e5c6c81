//! Compact summaries handed to a conversational agent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aspects::AspectKind;
use crate::chart::{NatalChart, TransitResult};
use crate::payload::round_sign_degree;
use crate::western::signs::ZodiacSign;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPlacement {
    pub sign: ZodiacSign,
    /// Degree within sign, one decimal
    pub degree: f64,
    pub house: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAspect {
    #[serde(rename = "type")]
    pub kind: AspectKind,
    /// Orb, one decimal
    pub orb: f64,
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Body name -> placement.
pub fn chart_summary(chart: &NatalChart) -> BTreeMap<String, AgentPlacement> {
    chart
        .body_positions
        .iter()
        .map(|(body, position)| {
            (
                body.name().to_string(),
                AgentPlacement {
                    sign: position.sign,
                    degree: round_sign_degree(position.degree, 1),
                    house: position.house,
                },
            )
        })
        .collect()
}

/// `"{transiting}_{kind}_{natal}"` -> aspect, e.g. `"saturn_square_sun"`.
pub fn transit_summary(transits: &TransitResult) -> BTreeMap<String, AgentAspect> {
    transits
        .aspects
        .iter()
        .map(|aspect| {
            (
                format!("{}_{}_{}", aspect.transiting_body, aspect.kind, aspect.natal_body),
                AgentAspect {
                    kind: aspect.kind,
                    orb: one_decimal(aspect.orb),
                },
            )
        })
        .collect()
}
