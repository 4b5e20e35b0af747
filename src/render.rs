//! Plain-text rendering of the results page.

use owo_colors::OwoColorize;
use std::fmt;

use crate::scoring::{decision_tone, displayed_percentage, score_tone, Tone, TrafficLights};
use crate::types::DisplayModel;

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color { return text.to_string(); }
    match tone {
        Tone::Affirmative => text.green().to_string(),
        Tone::Negative => text.red().to_string(),
        Tone::Warning => text.yellow().to_string(),
        Tone::Informative => text.blue().to_string(),
        Tone::Muted => text.bright_black().to_string(),
    }
}

fn lamp(lit: bool, tone: Tone, color: bool) -> String {
    if lit { paint("(*)", tone, color) } else { paint("( )", Tone::Muted, color) }
}

/// The results page for one model; formatting it writes the whole page.
pub struct ResultsPage<'a> {
    pub model: &'a DisplayModel,
    pub color: bool,
}

pub fn render_text(m: &DisplayModel, color: bool) -> String {
    ResultsPage { model: m, color }.to_string()
}

impl fmt::Display for ResultsPage<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, color) = (self.model, self.color);
        writeln!(out, "Analysis Results")?;
        if m.loaded {
            writeln!(out, "Here are the verified results of your analysis.")?;
        } else {
            writeln!(out, "Loading analysis...")?;
        }
        writeln!(out)?;

        if m.needs_attention() {
            writeln!(out, "{}", paint("[!] Incomplete Result", Tone::Negative, color))?;
            if let Some(p) = &m.parse_error_message { writeln!(out, "  {p}")?; }
            if !m.api_error_message.is_empty() { writeln!(out, "  API error: {}", m.api_error_message)?; }
            writeln!(out, "  Try re-running the analysis. If this persists, clear the stored analysis and retry.")?;
            writeln!(out)?;
        }

        if !m.summary.is_empty() {
            writeln!(out, "Summary")?;
            writeln!(out, "  {}", m.summary)?;
            writeln!(out)?;
        }

        writeln!(out, "Classification")?;
        writeln!(out, "  {}", paint(m.decision.as_str(), decision_tone(&m.decision), color))?;
        let reasoning = if m.reasoning.is_empty() { "No reasoning provided." } else { m.reasoning.as_str() };
        writeln!(out, "  {reasoning}")?;
        writeln!(out)?;

        writeln!(out, "Reasoning & Explanation")?;
        if m.claim_breakdown.is_empty() {
            writeln!(out, "  No detailed explanation available.")?;
        }
        for c in &m.claim_breakdown {
            writeln!(out, "  - {}", c.sub_claim)?;
            writeln!(out, "    Status: {}", c.status)?;
            if !c.evidence.is_empty() { writeln!(out, "    Evidence: {}", c.evidence)?; }
            if let Some(url) = &c.source_url { writeln!(out, "    Source: {url}")?; }
            if !c.reason_for_decision.is_empty() { writeln!(out, "    Why: {}", c.reason_for_decision)?; }
        }
        if !m.explanation_text.is_empty() { writeln!(out, "  {}", m.explanation_text)?; }
        if !m.explanatory_tag.is_empty() { writeln!(out, "  Tag: {}", m.explanatory_tag)?; }
        if !m.corrected_news.is_empty() { writeln!(out, "  Corrected: {}", m.corrected_news)?; }
        if !m.techniques.is_empty() {
            writeln!(out, "  Techniques Detected:")?;
            for t in &m.techniques { writeln!(out, "    - {t}")?; }
        }
        writeln!(out)?;

        writeln!(out, "Falsehood Score")?;
        writeln!(out, "  {}", paint(&displayed_percentage(m.score), score_tone(m.score), color))?;
        writeln!(out, "  Higher score means less truthful.")?;
        let lights = TrafficLights::from_score(m.score);
        writeln!(
            out,
            "  {} {} {}",
            lamp(lights.low, Tone::Negative, color),
            lamp(lights.mid, Tone::Warning, color),
            lamp(lights.high, Tone::Affirmative, color),
        )?;
        writeln!(out)?;

        if !m.web_results.is_empty() {
            writeln!(out, "Sources")?;
            for w in &m.web_results { writeln!(out, "  - {} <{}>", w.title, w.url)?; }
            writeln!(out)?;
        }

        writeln!(out, "Next Steps")?;
        writeln!(out, "  1. Look for credible sources with matching claims.")?;
        writeln!(out, "  2. Avoid emotional trigger words and missing citations.")?;
        writeln!(out, "  3. Do a reverse image/video search.")?;
        Ok(())
    }
}
