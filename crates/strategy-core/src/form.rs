//! Strategy Form
//!
//! Raw values collected from the lead-generation form, and the validation
//! that turns them into a [`ValidatedStrategy`] the prompt builder accepts.
//!
//! Validation order matters for focus handling: numeric fields are checked
//! first, in page order, then conditionally required fields.

use serde::{Deserialize, Serialize};

/// `strategy-status` value that makes the description field mandatory
pub const STRATEGY_STATUS_EXISTING: &str = "yes";

/// `age-range` value that reveals the free-text age field
pub const AGE_RANGE_OTHER: &str = "other";

/// Every control on the strategy form, in page order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    BrandName,
    BusinessDescription,
    Website,
    IndustryNiche,
    CurrentUsers,
    TargetUsers,
    AgeRange,
    AgeRangeOther,
    Locations,
    SocialPlatforms,
    Languages,
    PrimaryGoals,
    GoalsTimeframe,
    GoalsRoi,
    StrategyStatus,
    CurrentStrategyDescription,
    MarketingBudget,
    MarketingSource,
    MarketingIdeas,
    BrandVoice,
    ContentTypes,
    Competitors,
}

impl FieldId {
    /// DOM id (or input `name` for checkbox/radio groups)
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::BrandName => "brand-name",
            Self::BusinessDescription => "business-description",
            Self::Website => "website",
            Self::IndustryNiche => "industry-niche",
            Self::CurrentUsers => "current-users",
            Self::TargetUsers => "target-users",
            Self::AgeRange => "age-range",
            Self::AgeRangeOther => "age-range-other",
            Self::Locations => "locations",
            Self::SocialPlatforms => "social",
            Self::Languages => "languages",
            Self::PrimaryGoals => "goals",
            Self::GoalsTimeframe => "goals-timeframe",
            Self::GoalsRoi => "goals-roi",
            Self::StrategyStatus => "strategy-status",
            Self::CurrentStrategyDescription => "current-strategy-description",
            Self::MarketingBudget => "marketing-budget",
            Self::MarketingSource => "marketing_source",
            Self::MarketingIdeas => "marketing-ideas",
            Self::BrandVoice => "brand-voice",
            Self::ContentTypes => "content-types",
            Self::Competitors => "competitors",
        }
    }

    /// Short name used in validation messages
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BrandName => "Brand Name",
            Self::BusinessDescription => "Business Description",
            Self::Website => "Website",
            Self::IndustryNiche => "Industry / Niche",
            Self::CurrentUsers => "Current Users",
            Self::TargetUsers => "Target Users",
            Self::AgeRange => "Age Range",
            Self::AgeRangeOther => "Other Age Range",
            Self::Locations => "Locations",
            Self::SocialPlatforms => "Social Platforms",
            Self::Languages => "Languages",
            Self::PrimaryGoals => "Primary Goals",
            Self::GoalsTimeframe => "Goals Timeframe",
            Self::GoalsRoi => "Expected ROI",
            Self::StrategyStatus => "Strategy Status",
            Self::CurrentStrategyDescription => "Current Strategy Description",
            Self::MarketingBudget => "Marketing Budget",
            Self::MarketingSource => "Marketing Source",
            Self::MarketingIdeas => "Marketing Ideas",
            Self::BrandVoice => "Brand Voice",
            Self::ContentTypes => "Content Types",
            Self::Competitors => "Competitors",
        }
    }
}

/// A single failed check
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

/// All failed checks of one submission attempt, in page order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: FieldId, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field that should receive focus
    pub fn first_field(&self) -> Option<FieldId> {
        self.0.first().map(|e| e.field)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn fields(&self) -> Vec<FieldId> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw form state as typed by the user
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyForm {
    pub brand_name: String,
    pub business_description: String,
    pub website: String,
    pub industry_niche: String,
    pub current_users: String,
    pub target_users: String,
    pub age_range: String,
    pub age_range_other: String,
    pub locations: String,
    pub social_platforms: Vec<String>,
    pub languages: String,
    pub primary_goals: Vec<String>,
    pub goals_timeframe: String,
    pub goals_roi: String,
    pub strategy_status: String,
    pub current_strategy_description: String,
    pub marketing_budget: String,
    pub marketing_source: Option<String>,
    pub marketing_ideas: String,
    pub brand_voice: String,
    pub content_types: String,
    pub competitors: String,
}

impl StrategyForm {
    /// Update the age-range select; leaving `other` clears the free-text field
    pub fn set_age_range(&mut self, value: impl Into<String>) {
        self.age_range = value.into();
        if !self.age_range_other_visible() {
            self.age_range_other.clear();
        }
    }

    pub fn age_range_other_visible(&self) -> bool {
        self.age_range == AGE_RANGE_OTHER
    }

    pub fn strategy_description_required(&self) -> bool {
        self.strategy_status.trim() == STRATEGY_STATUS_EXISTING
    }

    /// Current value of a single-valued text control
    pub fn text(&self, field: FieldId) -> Option<&str> {
        let value = match field {
            FieldId::BrandName => &self.brand_name,
            FieldId::BusinessDescription => &self.business_description,
            FieldId::Website => &self.website,
            FieldId::IndustryNiche => &self.industry_niche,
            FieldId::CurrentUsers => &self.current_users,
            FieldId::TargetUsers => &self.target_users,
            FieldId::AgeRange => &self.age_range,
            FieldId::AgeRangeOther => &self.age_range_other,
            FieldId::Locations => &self.locations,
            FieldId::Languages => &self.languages,
            FieldId::GoalsTimeframe => &self.goals_timeframe,
            FieldId::GoalsRoi => &self.goals_roi,
            FieldId::StrategyStatus => &self.strategy_status,
            FieldId::CurrentStrategyDescription => &self.current_strategy_description,
            FieldId::MarketingBudget => &self.marketing_budget,
            FieldId::MarketingIdeas => &self.marketing_ideas,
            FieldId::BrandVoice => &self.brand_voice,
            FieldId::ContentTypes => &self.content_types,
            FieldId::Competitors => &self.competitors,
            FieldId::SocialPlatforms | FieldId::PrimaryGoals | FieldId::MarketingSource => {
                return None;
            }
        };
        Some(value)
    }

    /// Write a text control. Group fields are ignored; see [`Self::set_choice`].
    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) {
        let slot = match field {
            FieldId::AgeRange => {
                self.set_age_range(value);
                return;
            }
            FieldId::BrandName => &mut self.brand_name,
            FieldId::BusinessDescription => &mut self.business_description,
            FieldId::Website => &mut self.website,
            FieldId::IndustryNiche => &mut self.industry_niche,
            FieldId::CurrentUsers => &mut self.current_users,
            FieldId::TargetUsers => &mut self.target_users,
            FieldId::AgeRangeOther => &mut self.age_range_other,
            FieldId::Locations => &mut self.locations,
            FieldId::Languages => &mut self.languages,
            FieldId::GoalsTimeframe => &mut self.goals_timeframe,
            FieldId::GoalsRoi => &mut self.goals_roi,
            FieldId::StrategyStatus => &mut self.strategy_status,
            FieldId::CurrentStrategyDescription => &mut self.current_strategy_description,
            FieldId::MarketingBudget => &mut self.marketing_budget,
            FieldId::MarketingIdeas => &mut self.marketing_ideas,
            FieldId::BrandVoice => &mut self.brand_voice,
            FieldId::ContentTypes => &mut self.content_types,
            FieldId::Competitors => &mut self.competitors,
            FieldId::SocialPlatforms | FieldId::PrimaryGoals | FieldId::MarketingSource => return,
        };
        *slot = value.into();
    }

    /// Check or uncheck one box of a checkbox group
    pub fn set_choice(&mut self, field: FieldId, value: &str, checked: bool) {
        match field {
            FieldId::SocialPlatforms => toggle_choice(&mut self.social_platforms, value, checked),
            FieldId::PrimaryGoals => toggle_choice(&mut self.primary_goals, value, checked),
            _ => {}
        }
    }

    pub fn is_chosen(&self, field: FieldId, value: &str) -> bool {
        match field {
            FieldId::SocialPlatforms => self.social_platforms.iter().any(|v| v == value),
            FieldId::PrimaryGoals => self.primary_goals.iter().any(|v| v == value),
            FieldId::MarketingSource => self.marketing_source.as_deref() == Some(value),
            _ => false,
        }
    }

    /// Validate the form and normalize every value
    pub fn validate(&self) -> Result<ValidatedStrategy, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let current_users = check_number(&self.current_users, FieldId::CurrentUsers, &mut errors);
        let marketing_budget =
            check_number(&self.marketing_budget, FieldId::MarketingBudget, &mut errors);

        let description = self.current_strategy_description.trim();
        if self.strategy_description_required() && description.is_empty() {
            errors.push(
                FieldId::CurrentStrategyDescription,
                "Please describe your current marketing strategy.",
            );
        }

        if !errors.is_empty() {
            tracing::debug!(invalid = errors.len(), "strategy form rejected");
            return Err(errors);
        }

        let age_range_other = if self.age_range_other_visible() {
            trimmed(&self.age_range_other)
        } else {
            None
        };

        Ok(ValidatedStrategy {
            brand_name: trimmed(&self.brand_name),
            business_description: trimmed(&self.business_description),
            website: trimmed(&self.website),
            industry_niche: trimmed(&self.industry_niche),
            current_users,
            target_users: trimmed(&self.target_users),
            age_range: trimmed(&self.age_range),
            age_range_other,
            locations: trimmed(&self.locations),
            social_platforms: self.social_platforms.clone(),
            languages: trimmed(&self.languages),
            primary_goals: self.primary_goals.clone(),
            goals_timeframe: trimmed(&self.goals_timeframe),
            goals_roi: trimmed(&self.goals_roi),
            strategy_status: trimmed(&self.strategy_status),
            current_strategy_description: trimmed(description),
            marketing_budget,
            marketing_source: self.marketing_source.as_deref().and_then(trimmed),
            marketing_ideas: trimmed(&self.marketing_ideas),
            brand_voice: trimmed(&self.brand_voice),
            content_types: trimmed(&self.content_types),
            competitors: trimmed(&self.competitors),
        })
    }
}

/// Form values after validation; empty inputs are `None`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatedStrategy {
    pub brand_name: Option<String>,
    pub business_description: Option<String>,
    pub website: Option<String>,
    pub industry_niche: Option<String>,
    pub current_users: Option<f64>,
    pub target_users: Option<String>,
    pub age_range: Option<String>,
    pub age_range_other: Option<String>,
    pub locations: Option<String>,
    pub social_platforms: Vec<String>,
    pub languages: Option<String>,
    pub primary_goals: Vec<String>,
    pub goals_timeframe: Option<String>,
    pub goals_roi: Option<String>,
    pub strategy_status: Option<String>,
    pub current_strategy_description: Option<String>,
    pub marketing_budget: Option<f64>,
    pub marketing_source: Option<String>,
    pub marketing_ideas: Option<String>,
    pub brand_voice: Option<String>,
    pub content_types: Option<String>,
    pub competitors: Option<String>,
}

/// Add or remove `value` from a checkbox group, keeping first-checked order
pub fn toggle_choice(list: &mut Vec<String>, value: &str, checked: bool) {
    let present = list.iter().any(|v| v == value);
    if checked && !present {
        list.push(value.to_string());
    } else if !checked {
        list.retain(|v| v != value);
    }
}

fn trimmed(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse an optional non-negative number. Empty input is allowed.
fn parse_non_negative(raw: &str) -> Result<Option<f64>, ()> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    match value.parse::<f64>() {
        // adding 0.0 turns -0 into 0
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n + 0.0)),
        _ => Err(()),
    }
}

fn check_number(raw: &str, field: FieldId, errors: &mut ValidationErrors) -> Option<f64> {
    parse_non_negative(raw).unwrap_or_else(|()| {
        errors.push(
            field,
            format!(
                "Invalid input for {}. Please enter a non-negative number.",
                field.display_name()
            ),
        );
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> StrategyForm {
        StrategyForm {
            brand_name: "Acme".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_numbers_are_allowed() {
        let validated = minimal().validate().unwrap();
        assert_eq!(validated.current_users, None);
        assert_eq!(validated.marketing_budget, None);
    }

    #[test]
    fn test_non_numeric_and_negative_inputs_block_submission() {
        for bad in ["abc", "-1", "12abc", "NaN", "inf", "-0.5"] {
            let form = StrategyForm {
                current_users: bad.into(),
                ..minimal()
            };
            let errors = form.validate().unwrap_err();
            assert!(errors.contains(FieldId::CurrentUsers), "{bad} should be rejected");
            assert_eq!(errors.first_field(), Some(FieldId::CurrentUsers));
        }
    }

    #[test]
    fn test_first_invalid_field_gets_focus() {
        let form = StrategyForm {
            current_users: "lots".into(),
            marketing_budget: "-50".into(),
            ..minimal()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields(), vec![FieldId::CurrentUsers, FieldId::MarketingBudget]);
        assert!(errors.to_string().contains("Invalid input for Marketing Budget"));
    }

    #[test]
    fn test_numbers_are_trimmed_and_parsed() {
        let form = StrategyForm {
            current_users: " 1200 ".into(),
            marketing_budget: "0".into(),
            ..minimal()
        };
        let validated = form.validate().unwrap();
        assert_eq!(validated.current_users, Some(1200.0));
        assert_eq!(validated.marketing_budget, Some(0.0));
    }

    #[test]
    fn test_existing_strategy_requires_description() {
        let form = StrategyForm {
            strategy_status: STRATEGY_STATUS_EXISTING.into(),
            current_strategy_description: "   ".into(),
            ..minimal()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields(), vec![FieldId::CurrentStrategyDescription]);

        let form = StrategyForm {
            current_strategy_description: "Weekly newsletter".into(),
            ..form
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_conditional_check_follows_numeric_checks() {
        let form = StrategyForm {
            marketing_budget: "x".into(),
            strategy_status: STRATEGY_STATUS_EXISTING.into(),
            ..minimal()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![FieldId::MarketingBudget, FieldId::CurrentStrategyDescription]
        );
    }

    #[test]
    fn test_other_statuses_do_not_require_description() {
        let form = StrategyForm {
            strategy_status: "no".into(),
            ..minimal()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_text_accessors_route_by_field() {
        let mut form = minimal();
        form.set_text(FieldId::GoalsRoi, "2x");
        assert_eq!(form.goals_roi, "2x");
        assert_eq!(form.text(FieldId::GoalsRoi), Some("2x"));
        assert_eq!(form.text(FieldId::SocialPlatforms), None);

        form.set_text(FieldId::AgeRange, AGE_RANGE_OTHER);
        form.set_text(FieldId::AgeRangeOther, "70+");
        form.set_text(FieldId::AgeRange, "18-24");
        assert!(form.age_range_other.is_empty());
    }

    #[test]
    fn test_checkbox_groups_toggle() {
        let mut form = minimal();
        form.set_choice(FieldId::PrimaryGoals, "sales", true);
        form.set_choice(FieldId::PrimaryGoals, "awareness", true);
        form.set_choice(FieldId::PrimaryGoals, "sales", true);
        assert_eq!(form.primary_goals, vec!["sales", "awareness"]);
        assert!(form.is_chosen(FieldId::PrimaryGoals, "awareness"));

        form.set_choice(FieldId::PrimaryGoals, "sales", false);
        assert_eq!(form.primary_goals, vec!["awareness"]);
        assert!(!form.is_chosen(FieldId::SocialPlatforms, "awareness"));
    }

    #[test]
    fn test_leaving_other_age_range_clears_text() {
        let mut form = minimal();
        form.set_age_range(AGE_RANGE_OTHER);
        assert!(form.age_range_other_visible());
        form.age_range_other = "55-70".into();

        form.set_age_range("25-34");
        assert!(!form.age_range_other_visible());
        assert!(form.age_range_other.is_empty());
    }

    #[test]
    fn test_hidden_age_range_other_is_dropped() {
        let form = StrategyForm {
            age_range: "18-24".into(),
            age_range_other: "stale".into(),
            ..minimal()
        };
        assert_eq!(form.validate().unwrap().age_range_other, None);
    }
}
