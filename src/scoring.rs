use serde::Serialize;

use crate::types::{Decision, DisplayModel};

/// Colour family used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone { Affirmative, Negative, Warning, Informative, Muted }

pub fn decision_tone(d: &Decision) -> Tone {
    match d {
        Decision::True => Tone::Affirmative,
        Decision::False => Tone::Negative,
        Decision::Misleading => Tone::Warning,
        Decision::Unverifiable => Tone::Informative,
        _ => Tone::Muted,
    }
}

// Thresholds are on the raw fake score; both bounds are strict `>`.
const HIGH: f64 = 70.0;
const MID: f64 = 40.0;

pub fn score_tone(score: Option<f64>) -> Tone {
    match score {
        None => Tone::Muted,
        Some(s) if s > HIGH => Tone::Affirmative,
        Some(s) if s > MID => Tone::Warning,
        Some(_) => Tone::Negative,
    }
}

/// Score shown to the reader: `100 - score`, or `--%` when there is none.
pub fn displayed_percentage(score: Option<f64>) -> String {
    match score {
        Some(s) => format!("{}%", format_number(100.0 - s)),
        None => "--%".to_string(),
    }
}

// Matches JavaScript's number-to-string: exponent form outside [1e-6, 1e21).
fn format_number(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    let abs = x.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{x:e}");
        match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        }
    } else {
        format!("{x}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TrafficLights { pub low: bool, pub mid: bool, pub high: bool }

impl TrafficLights {
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            None => Self::default(),
            Some(s) => Self { low: s <= MID, mid: s > MID && s <= HIGH, high: s > HIGH },
        }
    }
}

/// The model plus every derived value, as served to a renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    #[serde(flatten)]
    pub model: DisplayModel,
    pub decision_tone: Tone,
    pub score_tone: Tone,
    pub displayed_percentage: String,
    pub lights: TrafficLights,
    pub needs_attention: bool,
}

impl From<DisplayModel> for ResultsView {
    fn from(model: DisplayModel) -> Self {
        Self {
            decision_tone: decision_tone(&model.decision),
            score_tone: score_tone(model.score),
            displayed_percentage: displayed_percentage(model.score),
            lights: TrafficLights::from_score(model.score),
            needs_attention: model.needs_attention(),
            model,
        }
    }
}
