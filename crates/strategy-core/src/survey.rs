//! User Survey
//!
//! The survey itself is posted to an external form backend; this module only
//! decides whether the native submission may proceed.

use serde::{Deserialize, Serialize};

use crate::form::toggle_choice;

/// Referral choices that reveal a follow-up control
pub const REFERRAL_SOCIAL_MEDIA: &str = "social_media";
pub const REFERRAL_OTHER: &str = "other";

/// Summary alert shown when any required control is empty
pub const SURVEY_INCOMPLETE_MESSAGE: &str = "Please fill out all required survey fields.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurveyField {
    Referral,
    SocialPlatform,
    ReferralOther,
    WouldRecommend,
    Interests,
    Feedback,
}

impl SurveyField {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Referral => "referral",
            Self::SocialPlatform => "social_platform",
            Self::ReferralOther => "referral-other-specify",
            Self::WouldRecommend => "would_recommend",
            Self::Interests => "interests",
            Self::Feedback => "feedback",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Referral => "How did you hear about us?",
            Self::SocialPlatform => "Which platform?",
            Self::ReferralOther => "Please specify",
            Self::WouldRecommend => "Would you recommend us?",
            Self::Interests => "Which features interest you?",
            Self::Feedback => "Your feedback",
        }
    }

    /// Message shown under the control when it is left empty
    pub fn required_message(self) -> String {
        format!("{} is required.", self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyForm {
    pub referral: Option<String>,
    pub social_platforms: Vec<String>,
    pub referral_other: String,
    pub would_recommend: Option<String>,
    pub interests: Vec<String>,
    pub feedback: String,
}

impl SurveyForm {
    /// Select a referral radio, clearing follow-ups that become hidden
    pub fn set_referral(&mut self, value: impl Into<String>) {
        self.referral = Some(value.into());
        if !self.social_platforms_visible() {
            self.social_platforms.clear();
        }
        if !self.referral_other_visible() {
            self.referral_other.clear();
        }
    }

    /// Check or uncheck a box in one of the checkbox groups
    pub fn set_choice(&mut self, field: SurveyField, value: &str, checked: bool) {
        match field {
            SurveyField::SocialPlatform => toggle_choice(&mut self.social_platforms, value, checked),
            SurveyField::Interests => toggle_choice(&mut self.interests, value, checked),
            _ => {}
        }
    }

    pub fn social_platforms_visible(&self) -> bool {
        self.referral.as_deref() == Some(REFERRAL_SOCIAL_MEDIA)
    }

    pub fn referral_other_visible(&self) -> bool {
        self.referral.as_deref() == Some(REFERRAL_OTHER)
    }

    /// Required controls that are still empty, in page order
    pub fn missing_fields(&self) -> Vec<SurveyField> {
        let mut missing = Vec::new();

        // radio and checkbox groups first, then free text
        if self.referral.is_none() {
            missing.push(SurveyField::Referral);
        }
        if self.would_recommend.is_none() {
            missing.push(SurveyField::WouldRecommend);
        }
        if self.interests.is_empty() {
            missing.push(SurveyField::Interests);
        }
        if self.feedback.trim().is_empty() {
            missing.push(SurveyField::Feedback);
        }

        missing
    }

    pub fn validate(&self) -> Result<(), Vec<SurveyField>> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SurveyForm {
        SurveyForm {
            referral: Some("search".into()),
            would_recommend: Some("yes".into()),
            interests: vec!["strategy".into()],
            feedback: "Great tool".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_survey_passes() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_empty_survey_lists_every_required_field() {
        let missing = SurveyForm::default().validate().unwrap_err();
        assert_eq!(
            missing,
            vec![
                SurveyField::Referral,
                SurveyField::WouldRecommend,
                SurveyField::Interests,
                SurveyField::Feedback,
            ]
        );
        assert_eq!(
            SurveyField::Feedback.required_message(),
            "Your feedback is required."
        );
    }

    #[test]
    fn test_whitespace_feedback_is_missing() {
        let survey = SurveyForm {
            feedback: "  \n".into(),
            ..complete()
        };
        assert_eq!(survey.validate().unwrap_err(), vec![SurveyField::Feedback]);
    }

    #[test]
    fn test_referral_follow_ups_toggle_and_clear() {
        let mut survey = complete();
        survey.set_referral(REFERRAL_SOCIAL_MEDIA);
        assert!(survey.social_platforms_visible());
        survey.social_platforms.push("instagram".into());

        survey.set_referral(REFERRAL_OTHER);
        assert!(!survey.social_platforms_visible());
        assert!(survey.social_platforms.is_empty());
        assert!(survey.referral_other_visible());
        survey.referral_other = "a friend".into();

        survey.set_referral("search");
        assert!(survey.referral_other.is_empty());
    }

    #[test]
    fn test_interest_checkboxes_toggle() {
        let mut survey = complete();
        survey.set_choice(SurveyField::Interests, "strategy", false);
        assert_eq!(survey.validate().unwrap_err(), vec![SurveyField::Interests]);

        survey.set_choice(SurveyField::Interests, "analytics", true);
        assert!(survey.validate().is_ok());
    }
}
