//! Prompt Construction
//!
//! Turns a [`ValidatedStrategy`] into the natural-language instruction sent
//! upstream. Every field produces exactly one `- Label: value` line; empty
//! fields get one of two placeholders so the model knows whether to infer a
//! value or simply work around its absence.

use std::fmt::Write as _;

use crate::form::{ValidatedStrategy, AGE_RANGE_OTHER};

/// Placeholder substituted for an empty field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// The user left it blank and the model should not invent it
    NotProvided,
    /// The user wants the model to propose a value
    AiToSuggest,
}

impl Placeholder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotProvided => "[Not Provided]",
            Self::AiToSuggest => "[User wants AI to determine/suggest]",
        }
    }
}

pub const PROMPT_PREAMBLE: &str = "Generate a comprehensive marketing strategy based on the following user inputs. If a field is marked as '[User wants AI to determine/suggest]' or '[Not Provided]', use your best judgment to fill in the gaps or make recommendations based on the provided context.\n\n";

pub const PROMPT_TRAILER: &str = "\nGenerate the strategy.";

/// Append-only prompt writer
#[derive(Debug)]
pub struct PromptBuilder {
    buf: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            buf: PROMPT_PREAMBLE.to_string(),
        }
    }

    /// Start a `**Title:**` section; sections after the first are separated by a blank line
    pub fn section(&mut self, title: &str) -> &mut Self {
        if !self.buf.ends_with("\n\n") {
            self.buf.push('\n');
        }
        let _ = writeln!(self.buf, "**{title}:**");
        self
    }

    pub fn line(&mut self, label: &str, value: Option<&str>, empty: Placeholder) -> &mut Self {
        let value = value.filter(|v| !v.is_empty()).unwrap_or(empty.as_str());
        let _ = writeln!(self.buf, "- {label}: {value}");
        self
    }

    pub fn list(&mut self, label: &str, values: &[String], empty: Placeholder) -> &mut Self {
        let joined = values.join(", ");
        self.line(label, Some(joined.as_str()), empty)
    }

    pub fn number(&mut self, label: &str, value: Option<f64>, empty: Placeholder) -> &mut Self {
        let rendered = value.map(|n| n.to_string());
        self.line(label, rendered.as_deref(), empty)
    }

    pub fn finish(mut self) -> String {
        self.buf.push_str(PROMPT_TRAILER);
        self.buf
    }
}

fn age_range_display(strategy: &ValidatedStrategy) -> Option<String> {
    match strategy.age_range.as_deref() {
        Some(AGE_RANGE_OTHER) => Some(match strategy.age_range_other.as_deref() {
            Some(other) => format!("Other ({other})"),
            None => "Other (Not Specified)".to_string(),
        }),
        other => other.map(str::to_string),
    }
}

/// Build the full strategy prompt
pub fn build_prompt(s: &ValidatedStrategy) -> String {
    use Placeholder::{AiToSuggest, NotProvided};

    let age_range = age_range_display(s);
    let mut p = PromptBuilder::new();

    p.section("Business Identity")
        .line("Brand / Company Name", s.brand_name.as_deref(), NotProvided)
        .line("Brief Description", s.business_description.as_deref(), NotProvided)
        .line("Website", s.website.as_deref(), NotProvided)
        .line("Industry / Niche", s.industry_niche.as_deref(), NotProvided);

    p.section("Target Audience")
        .number("Current Users/Customers", s.current_users, NotProvided)
        .line("Target Users / Growth Goal", s.target_users.as_deref(), AiToSuggest)
        .line("User Age Range", age_range.as_deref(), NotProvided)
        .line("Target Locations / Countries", s.locations.as_deref(), NotProvided)
        .list("Main Social Media Platforms", &s.social_platforms, NotProvided)
        .line("Languages Spoken", s.languages.as_deref(), NotProvided);

    p.section("Marketing Goals")
        .list("Primary Goals", &s.primary_goals, AiToSuggest)
        .line("Timeframe for Goals", s.goals_timeframe.as_deref(), AiToSuggest)
        .line("Expected ROI / Revenue Goal", s.goals_roi.as_deref(), AiToSuggest);

    p.section("Current Strategy & Resources")
        .line("Existing Strategy Status", s.strategy_status.as_deref(), NotProvided)
        .line(
            "Current Strategy Description",
            s.current_strategy_description.as_deref(),
            NotProvided,
        )
        .number("Marketing Budget (Monthly/Total)", s.marketing_budget, AiToSuggest)
        .line(
            "Marketing Source (In-house/Outsourced)",
            s.marketing_source.as_deref(),
            NotProvided,
        );

    p.section("Creative Ideas & Preferences")
        .line("Marketing Ideas to Explore", s.marketing_ideas.as_deref(), AiToSuggest)
        .line("Brand Voice or Tone", s.brand_voice.as_deref(), NotProvided)
        .line("Preferred Content Types", s.content_types.as_deref(), NotProvided)
        .line("Competitors", s.competitors.as_deref(), NotProvided);

    p.finish()
}
