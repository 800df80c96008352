//! Survey Modal
//!
//! Checked client-side, then submitted natively to the external form
//! backend configured at build time.

use std::time::Duration;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use strategy_core::survey::{REFERRAL_OTHER, REFERRAL_SOCIAL_MEDIA, SURVEY_INCOMPLETE_MESSAGE};
use strategy_core::{ModalController, ModalId, SurveyField, SurveyForm};

use crate::browser;
use crate::components::Modal;

/// Form backend URL, e.g. a Formspree endpoint. Empty keeps submissions local.
const FORM_ACTION: Option<&str> = option_env!("SURVEY_FORM_ACTION");

const REFERRALS: &[(&str, &str)] = &[
    ("search", "Search engine"),
    (REFERRAL_SOCIAL_MEDIA, "Social media"),
    ("friend", "Friend or colleague"),
    (REFERRAL_OTHER, "Other"),
];

const SURVEY_PLATFORMS: &[(&str, &str)] = &[
    ("instagram", "Instagram"),
    ("tiktok", "TikTok"),
    ("linkedin", "LinkedIn"),
    ("facebook", "Facebook"),
];

const RECOMMEND: &[(&str, &str)] = &[("yes", "Yes"), ("maybe", "Maybe"), ("no", "No")];

const INTERESTS: &[(&str, &str)] = &[
    ("strategy", "AI marketing strategies"),
    ("content", "Content ideas"),
    ("analytics", "Campaign analytics"),
    ("consulting", "1:1 consulting"),
];

fn form_action() -> &'static str {
    FORM_ACTION.unwrap_or_default()
}

#[component]
fn ErrorMessage(field: SurveyField, missing: RwSignal<Vec<SurveyField>>) -> impl IntoView {
    view! {
        <Show when=move || missing.with(|m| m.contains(&field))>
            <p class="error-message">{field.required_message()}</p>
        </Show>
    }
}

#[component]
pub fn SurveyModal() -> impl IntoView {
    let modals = expect_context::<RwSignal<ModalController>>();
    let survey = RwSignal::new(SurveyForm::default());
    let missing = RwSignal::new(Vec::<SurveyField>::new());

    let on_submit = move |ev: SubmitEvent| {
        let result = survey.with_untracked(SurveyForm::validate);
        if let Err(fields) = result {
            ev.prevent_default();
            if let Some(first) = fields.first() {
                browser::focus(first.name());
            }
            missing.set(fields);
            browser::alert(SURVEY_INCOMPLETE_MESSAGE);
            return;
        }

        missing.set(Vec::new());
        if form_action().is_empty() {
            ev.prevent_default();
            leptos::logging::log!("survey submitted: {:?}", survey.get_untracked());
        }
        browser::alert("Thank you for your feedback!");
        modals.update(|m| {
            m.close(ModalId::Survey);
        });

        // The browser reads the controls after this handler returns
        set_timeout(move || survey.set(SurveyForm::default()), Duration::ZERO);
    };

    let radio = move |field: SurveyField, value: &'static str, text: &'static str| {
        let checked = move || match field {
            SurveyField::Referral => survey.with(|s| s.referral.as_deref() == Some(value)),
            _ => survey.with(|s| s.would_recommend.as_deref() == Some(value)),
        };
        view! {
            <label class="choice">
                <input
                    type="radio"
                    name=field.name()
                    value=value
                    prop:checked=checked
                    on:change=move |_| {
                        survey.update(|s| match field {
                            SurveyField::Referral => s.set_referral(value),
                            _ => s.would_recommend = Some(value.into()),
                        });
                    }
                />
                {text}
            </label>
        }
    };

    let checkbox = move |field: SurveyField, value: &'static str, text: &'static str| {
        let checked = move || match field {
            SurveyField::SocialPlatform => survey.with(|s| s.social_platforms.iter().any(|v| v == value)),
            _ => survey.with(|s| s.interests.iter().any(|v| v == value)),
        };
        view! {
            <label class="choice">
                <input
                    type="checkbox"
                    name=field.name()
                    value=value
                    prop:checked=checked
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        survey.update(|s| s.set_choice(field, value, on));
                    }
                />
                {text}
            </label>
        }
    };

    view! {
        <Modal id=ModalId::Survey title="Quick Survey">
            <form
                id="user-survey-form"
                action=form_action()
                method="POST"
                target="_blank"
                novalidate=true
                on:submit=on_submit
            >
                <fieldset data-required="true">
                    <legend>{SurveyField::Referral.label()}</legend>
                    {REFERRALS
                        .iter()
                        .map(|&(value, text)| radio(SurveyField::Referral, value, text))
                        .collect_view()}
                    <ErrorMessage field=SurveyField::Referral missing=missing />
                </fieldset>

                <Show when=move || survey.with(SurveyForm::social_platforms_visible)>
                    <fieldset id="social-media-specify">
                        <legend>{SurveyField::SocialPlatform.label()}</legend>
                        {SURVEY_PLATFORMS
                            .iter()
                            .map(|&(value, text)| checkbox(SurveyField::SocialPlatform, value, text))
                            .collect_view()}
                    </fieldset>
                </Show>

                <Show when=move || survey.with(SurveyForm::referral_other_visible)>
                    <input
                        type="text"
                        id=SurveyField::ReferralOther.name()
                        name=SurveyField::ReferralOther.name()
                        placeholder=SurveyField::ReferralOther.label()
                        prop:value=move || survey.with(|s| s.referral_other.clone())
                        on:input=move |ev| survey.update(|s| s.referral_other = event_target_value(&ev))
                    />
                </Show>

                <fieldset data-required="true">
                    <legend>{SurveyField::WouldRecommend.label()}</legend>
                    {RECOMMEND
                        .iter()
                        .map(|&(value, text)| radio(SurveyField::WouldRecommend, value, text))
                        .collect_view()}
                    <ErrorMessage field=SurveyField::WouldRecommend missing=missing />
                </fieldset>

                <fieldset data-required="true">
                    <legend>{SurveyField::Interests.label()}</legend>
                    {INTERESTS
                        .iter()
                        .map(|&(value, text)| checkbox(SurveyField::Interests, value, text))
                        .collect_view()}
                    <ErrorMessage field=SurveyField::Interests missing=missing />
                </fieldset>

                <label for=SurveyField::Feedback.name()>{SurveyField::Feedback.label()}</label>
                <textarea
                    id=SurveyField::Feedback.name()
                    name=SurveyField::Feedback.name()
                    class:invalid=move || missing.with(|m| m.contains(&SurveyField::Feedback))
                    prop:value=move || survey.with(|s| s.feedback.clone())
                    on:input=move |ev| survey.update(|s| s.feedback = event_target_value(&ev))
                ></textarea>
                <ErrorMessage field=SurveyField::Feedback missing=missing />

                <button type="submit" class="btn btn-primary">"Send Feedback"</button>
            </form>
        </Modal>
    }
}
