//! Turns an untrusted stored analysis into a [`DisplayModel`].
//!
//! Every field is read on its own with its own default, so one malformed
//! field never hides the others. Nothing here returns an error: failures
//! end up in `parse_error_message` / `api_error_message`.

use serde_json::Value;
use tracing::debug;

use crate::types::*;

pub const INVALID_FORMAT: &str = "Stored analysis has an invalid format.";

/// Normalize the raw text of the storage slot. `None` means nothing is
/// stored yet and yields the default (loading) model without an error.
pub fn normalize(raw: Option<&str>) -> DisplayModel {
    normalize_bytes(raw.map(str::as_bytes))
}

/// Like [`normalize`], for slot contents that may not be valid UTF-8.
/// Invalid UTF-8 is reported the same way as any other undecodable input.
pub fn normalize_bytes(raw: Option<&[u8]>) -> DisplayModel {
    let Some(bytes) = raw else { return DisplayModel::default() };
    match serde_json::from_slice::<Value>(bytes) {
        Ok(v) => normalize_value(&v),
        Err(e) => {
            debug!(error = %e, "stored analysis is not valid JSON");
            DisplayModel {
                parse_error_message: Some(format!("Failed to parse stored analysis: {e}")),
                ..Default::default()
            }
        }
    }
}

/// Normalize an already decoded payload.
pub fn normalize_value(value: &Value) -> DisplayModel {
    if !value.is_object() {
        debug!(kind = kind_of(value), "stored analysis is not an object");
        return DisplayModel { parse_error_message: Some(INVALID_FORMAT.to_string()), ..Default::default() };
    }
    // one level only: a `results` envelope inside `results` is not unwrapped again
    let payload = match value.get("results") {
        Some(inner) if is_truthy(inner) => {
            debug!("unwrapping results envelope");
            inner
        }
        _ => value,
    };
    extract(payload)
}

fn extract(p: &Value) -> DisplayModel {
    let verdict = p.get("final_verdict");
    let explanation = p.get("explanation");

    DisplayModel {
        loaded: true,
        summary: text_at(p.get("summary")),
        decision: decision_at(verdict.and_then(|v| v.get("decision"))),
        score: verdict.and_then(|v| v.get("fake_score")).and_then(Value::as_f64),
        reasoning: text_at(verdict.and_then(|v| v.get("reasoning"))),
        explanation_text: text_at(explanation.and_then(|e| e.get("explanation"))),
        explanatory_tag: text_at(explanation.and_then(|e| e.get("explanatory_tag"))),
        corrected_news: text_at(explanation.and_then(|e| e.get("corrected_news"))),
        claim_breakdown: claims_at(explanation.and_then(|e| e.get("claim_breakdown"))),
        techniques: techniques_at(explanation.and_then(|e| e.get("misinformation_techniques"))),
        web_results: web_results_at(p.get("web_results")),
        api_error_message: api_error(p),
        parse_error_message: None,
    }
}

fn text_at(v: Option<&Value>) -> String {
    v.and_then(Value::as_str).unwrap_or_default().to_string()
}

// Only strings are taken as labels; anything else counts as missing.
fn decision_at(v: Option<&Value>) -> Decision {
    v.and_then(Value::as_str).map(Decision::from_label).unwrap_or_default()
}

fn techniques_at(v: Option<&Value>) -> Vec<String> {
    match v {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn claims_at(v: Option<&Value>) -> Vec<ClaimBreakdownEntry> {
    let Some(Value::Array(items)) = v else { return Vec::new() };
    items
        .iter()
        .filter(|c| c.is_object())
        .map(|c| ClaimBreakdownEntry {
            sub_claim: text_at(c.get("sub_claim")),
            status: ClaimStatus::from_label(c.get("status").and_then(Value::as_str).unwrap_or_default()),
            evidence: text_at(c.get("evidence")),
            source_url: c.get("source_url").and_then(Value::as_str).filter(|u| !u.is_empty()).map(str::to_string),
            reason_for_decision: text_at(c.get("reason_for_decision")),
        })
        .collect()
}

fn web_results_at(v: Option<&Value>) -> Vec<WebResult> {
    let Some(Value::Array(items)) = v else { return Vec::new() };
    items
        .iter()
        .filter(|w| w.is_object())
        .map(|w| WebResult { title: text_at(w.get("title")), url: text_at(w.get("url")) })
        .collect()
}

/// `error` wins when truthy; otherwise `detail`, but only when it is a string.
fn api_error(p: &Value) -> String {
    match p.get("error") {
        Some(e) if is_truthy(e) => match e {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        _ => text_at(p.get("detail")),
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_all_defaults(m: &DisplayModel) {
        assert_eq!(m.decision, Decision::Unknown);
        assert_eq!(m.score, None);
        assert!(m.summary.is_empty() && m.reasoning.is_empty());
        assert!(m.explanation_text.is_empty() && m.explanatory_tag.is_empty() && m.corrected_news.is_empty());
        assert!(m.claim_breakdown.is_empty() && m.techniques.is_empty() && m.web_results.is_empty());
        assert!(m.api_error_message.is_empty());
        assert!(!m.loaded);
    }

    #[test]
    fn absent_slot_is_loading_without_error() {
        let m = normalize(None);
        assert_all_defaults(&m);
        assert_eq!(m.parse_error_message, None);
    }

    #[test]
    fn empty_and_invalid_text_set_parse_error() {
        for raw in ["", "{not json", "[[[", "{\"a\":"] {
            let m = normalize(Some(raw));
            assert_all_defaults(&m);
            let msg = m.parse_error_message.expect("parse error expected");
            assert!(msg.starts_with("Failed to parse stored analysis: "), "{msg}");
            assert!(msg.len() > "Failed to parse stored analysis: ".len());
        }
    }

    #[test]
    fn non_object_values_are_invalid_format() {
        for raw in ["42", "\"text\"", "null", "true", "[1,2,3]"] {
            let m = normalize(Some(raw));
            assert_all_defaults(&m);
            assert_eq!(m.parse_error_message.as_deref(), Some(INVALID_FORMAT));
        }
    }

    #[test]
    fn deeply_nested_input_does_not_panic() {
        let deep = "[".repeat(5000);
        assert!(normalize(Some(deep.as_str())).parse_error_message.is_some());
        let garbage = json!({
            "final_verdict": [1, 2, {"decision": "True"}],
            "explanation": "oops",
            "web_results": {"title": "x"},
            "summary": {"nested": {"deeper": [null]}}
        });
        let m = normalize_value(&garbage);
        assert!(m.loaded);
        assert_eq!(m.decision, Decision::Unknown);
        assert!(m.summary.is_empty() && m.web_results.is_empty());
        assert_eq!(m.parse_error_message, None);
    }

    #[test]
    fn envelope_unwrap_is_transparent() {
        let wrapped = normalize_value(&json!({"results": {"final_verdict": {"decision": "True"}}}));
        let bare = normalize_value(&json!({"final_verdict": {"decision": "True"}}));
        assert_eq!(wrapped.decision, Decision::True);
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn envelope_unwrap_is_one_level() {
        let m = normalize_value(&json!({"results": {"results": {"final_verdict": {"decision": "False"}}}}));
        assert_eq!(m.decision, Decision::Unknown);
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        for raw in [&b"{\"summary\":\"\xff\"}"[..], &[0x7b, 0xff, 0x7d][..], &[0xfe][..]] {
            let m = normalize_bytes(Some(raw));
            assert_all_defaults(&m);
            let msg = m.parse_error_message.expect("parse error expected");
            assert!(msg.starts_with("Failed to parse stored analysis: "), "{msg}");
        }
        assert_eq!(normalize_bytes(None), normalize(None));
        let bytes = normalize_bytes(Some(&br#"{"final_verdict":{"decision":"True"}}"#[..]));
        assert_eq!(bytes.decision, Decision::True);
    }

    #[test]
    fn truthy_non_object_results_is_still_unwrapped() {
        let m = normalize_value(&json!({"results": 5, "final_verdict": {"decision": "True"}}));
        assert_eq!(m.decision, Decision::Unknown);
        assert!(m.loaded);
        assert_eq!(m.parse_error_message, None);
    }

    #[test]
    fn falsy_results_field_is_ignored() {
        let m = normalize_value(&json!({"results": null, "final_verdict": {"decision": "False"}}));
        assert_eq!(m.decision, Decision::False);
        let m = normalize_value(&json!({"results": "", "summary": "s"}));
        assert_eq!(m.summary, "s");
    }

    #[test]
    fn score_is_taken_only_from_numbers() {
        assert_eq!(normalize_value(&json!({"final_verdict": {"fake_score": "30"}})).score, None);
        assert_eq!(normalize_value(&json!({"final_verdict": {"fake_score": {"v": 30}}})).score, None);
        assert_eq!(normalize_value(&json!({"final_verdict": {"fake_score": 30}})).score, Some(30.0));
        assert_eq!(normalize_value(&json!({"final_verdict": {"fake_score": 12.5}})).score, Some(12.5));
    }

    #[test]
    fn techniques_require_a_sequence() {
        let m = normalize_value(&json!({"explanation": {"misinformation_techniques": "clickbait"}}));
        assert!(m.techniques.is_empty());
        let m = normalize_value(&json!({"explanation": {"misinformation_techniques": ["clickbait", "cherry-picking"]}}));
        assert_eq!(m.techniques, vec!["clickbait", "cherry-picking"]);
    }

    #[test]
    fn api_error_precedence() {
        assert_eq!(normalize_value(&json!({"error": "boom", "detail": "ignored"})).api_error_message, "boom");
        assert_eq!(normalize_value(&json!({"detail": "only this"})).api_error_message, "only this");
        assert_eq!(normalize_value(&json!({"detail": {"code": 500}})).api_error_message, "");
        assert_eq!(normalize_value(&json!({"error": "", "detail": "fallback"})).api_error_message, "fallback");
        assert_eq!(normalize_value(&json!({"error": 0, "detail": "d"})).api_error_message, "d");
        assert_eq!(normalize_value(&json!({"error": false, "detail": "d"})).api_error_message, "d");
        assert_eq!(normalize_value(&json!({"error": null, "detail": "d"})).api_error_message, "d");
        assert_eq!(normalize_value(&json!({"error": 503})).api_error_message, "503");
    }

    #[test]
    fn unrecognized_labels_pass_through() {
        let m = normalize_value(&json!({
            "final_verdict": {"decision": "Satire"},
            "explanation": {"claim_breakdown": [{"sub_claim": "c", "status": "Partly true"}]}
        }));
        assert_eq!(m.decision, Decision::Other("Satire".into()));
        assert_eq!(m.claim_breakdown[0].status, ClaimStatus::Other("Partly true".into()));
    }

    #[test]
    fn fields_default_independently() {
        let m = normalize_value(&json!({
            "summary": "Short summary",
            "final_verdict": {"decision": "Misleading", "fake_score": "high", "reasoning": 7},
            "explanation": {
                "claim_breakdown": [
                    {"sub_claim": "Water boils at 50C", "status": "Refuted", "evidence": "Physics", "source_url": "https://example.org", "reason_for_decision": "Wrong temperature"},
                    "not an entry",
                    {"sub_claim": "Sky is blue", "status": "Supported", "source_url": ""}
                ],
                "explanation": "Mostly wrong.",
                "corrected_news": ["not", "a", "string"],
                "explanatory_tag": "Science"
            },
            "web_results": [{"title": "T", "url": "https://u"}, 3]
        }));
        assert!(m.loaded);
        assert_eq!(m.summary, "Short summary");
        assert_eq!(m.decision, Decision::Misleading);
        assert_eq!(m.score, None);
        assert_eq!(m.reasoning, "");
        assert_eq!(m.explanation_text, "Mostly wrong.");
        assert_eq!(m.corrected_news, "");
        assert_eq!(m.explanatory_tag, "Science");
        assert_eq!(m.claim_breakdown.len(), 2);
        assert_eq!(m.claim_breakdown[0].status, ClaimStatus::Refuted);
        assert_eq!(m.claim_breakdown[0].source_url.as_deref(), Some("https://example.org"));
        assert_eq!(m.claim_breakdown[1].source_url, None);
        assert_eq!(m.claim_breakdown[1].evidence, "");
        assert_eq!(m.web_results, vec![WebResult { title: "T".into(), url: "https://u".into() }]);
    }

    #[test]
    fn non_string_decision_counts_as_missing() {
        assert_eq!(normalize_value(&json!({"final_verdict": {"decision": 1}})).decision, Decision::Unknown);
        assert_eq!(normalize_value(&json!({"final_verdict": "True"})).decision, Decision::Unknown);
    }
}
