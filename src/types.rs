use serde::{Serialize, Serializer};
use std::fmt;

/// Top-line verdict. Labels outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Decision {
    True,
    False,
    Misleading,
    Unverifiable,
    Error,
    #[default]
    Unknown,
    Other(String),
}

impl Decision {
    pub fn from_label(label: &str) -> Self {
        match label {
            "True" => Decision::True,
            "False" => Decision::False,
            "Misleading" => Decision::Misleading,
            "Unverifiable" => Decision::Unverifiable,
            "Error" => Decision::Error,
            "Unknown" => Decision::Unknown,
            other => Decision::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Decision::True => "True",
            Decision::False => "False",
            Decision::Misleading => "Misleading",
            Decision::Unverifiable => "Unverifiable",
            Decision::Error => "Error",
            Decision::Unknown => "Unknown",
            Decision::Other(s) => s,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Decision {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

/// Per sub-claim status. Unrecognised labels pass through like `Decision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimStatus { Supported, Refuted, Contradicted, Unverifiable, Other(String) }

impl ClaimStatus {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Supported" => ClaimStatus::Supported,
            "Refuted" => ClaimStatus::Refuted,
            "Contradicted" => ClaimStatus::Contradicted,
            "Unverifiable" => ClaimStatus::Unverifiable,
            other => ClaimStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Supported => "Supported",
            ClaimStatus::Refuted => "Refuted",
            ClaimStatus::Contradicted => "Contradicted",
            ClaimStatus::Unverifiable => "Unverifiable",
            ClaimStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimBreakdownEntry {
    pub sub_claim: String,
    pub status: ClaimStatus,
    pub evidence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub reason_for_decision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebResult { pub title: String, pub url: String }

/// Normalized, always fully populated view of one stored analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModel {
    /// True once a payload object was obtained (false while loading or after a parse failure).
    pub loaded: bool,
    pub summary: String,
    pub decision: Decision,
    /// Raw fake score; `None` when the source value was not a number.
    pub score: Option<f64>,
    pub reasoning: String,
    pub explanation_text: String,
    pub explanatory_tag: String,
    pub corrected_news: String,
    pub claim_breakdown: Vec<ClaimBreakdownEntry>,
    pub techniques: Vec<String>,
    pub web_results: Vec<WebResult>,
    pub api_error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error_message: Option<String>,
}

impl DisplayModel {
    /// Whether the "incomplete result" banner should be shown.
    pub fn needs_attention(&self) -> bool {
        self.parse_error_message.is_some()
            || !self.api_error_message.is_empty()
            || self.decision == Decision::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(Decision::from_label("Satire"), Decision::Other("Satire".into()));
        assert_eq!(Decision::from_label("Satire").as_str(), "Satire");
        assert_eq!(ClaimStatus::from_label("Partly").to_string(), "Partly");
        assert_eq!(Decision::from_label("Misleading"), Decision::Misleading);
    }

    #[test]
    fn model_serializes_camel_case() {
        let m = DisplayModel { score: Some(30.0), ..Default::default() };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["decision"], "Unknown");
        assert_eq!(v["score"], 30.0);
        assert_eq!(v["explanationText"], "");
        assert_eq!(v["apiErrorMessage"], "");
        assert!(v.get("parseErrorMessage").is_none());
    }

    #[test]
    fn default_model_needs_attention() {
        assert!(DisplayModel::default().needs_attention());
        let ok = DisplayModel { decision: Decision::True, ..Default::default() };
        assert!(!ok.needs_attention());
    }
}
