//! Strategy Form
//!
//! Inputs write straight into a `StrategyForm` signal; validation, prompt
//! building and the request lifecycle are delegated to `strategy-core`.

use leptos::ev::MouseEvent;
use leptos::prelude::*;

use strategy_core::{build_prompt, FieldId, ModalController, StrategyForm, SubmissionState};

use crate::{api, browser};

const AGE_RANGES: &[(&str, &str)] = &[
    ("", "Select an age range"),
    ("18-24", "18-24"),
    ("25-34", "25-34"),
    ("35-44", "35-44"),
    ("45-54", "45-54"),
    ("55+", "55+"),
    ("other", "Other"),
];

const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("Facebook", "Facebook"),
    ("Instagram", "Instagram"),
    ("TikTok", "TikTok"),
    ("LinkedIn", "LinkedIn"),
    ("X (Twitter)", "X (Twitter)"),
    ("YouTube", "YouTube"),
];

const GOALS: &[(&str, &str)] = &[
    ("Brand Awareness", "Brand awareness"),
    ("Lead Generation", "Lead generation"),
    ("Sales / Conversions", "Sales / conversions"),
    ("Customer Retention", "Customer retention"),
    ("Community Building", "Community building"),
];

const STRATEGY_STATUSES: &[(&str, &str)] = &[
    ("", "Select one"),
    ("yes", "Yes, we have a strategy"),
    ("no", "No, starting from scratch"),
    ("unsure", "Not sure"),
];

const MARKETING_SOURCES: &[(&str, &str)] = &[
    ("In-house", "In-house"),
    ("Outsourced", "Outsourced"),
    ("Both", "Both"),
];

/// Shared by every field component of one form
#[derive(Clone, Copy)]
struct FormContext {
    form: RwSignal<StrategyForm>,
    invalid: RwSignal<Vec<FieldId>>,
}

impl FormContext {
    fn is_invalid(self, field: FieldId) -> bool {
        self.invalid.with(|fields| fields.contains(&field))
    }

    fn value(self, field: FieldId) -> String {
        self.form
            .with(|f| f.text(field).unwrap_or_default().to_string())
    }
}

#[component]
fn TextField(
    field: FieldId,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] numeric: bool,
) -> impl IntoView {
    let ctx = expect_context::<FormContext>();
    let id = field.dom_id();
    let inputmode = if numeric { "decimal" } else { "text" };

    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                id=id
                name=id
                type="text"
                class="input-field"
                class:invalid=move || ctx.is_invalid(field)
                inputmode=inputmode
                placeholder=placeholder
                prop:value=move || ctx.value(field)
                on:input=move |ev| ctx.form.update(|f| f.set_text(field, event_target_value(&ev)))
            />
        </div>
    }
}

#[component]
fn TextArea(
    field: FieldId,
    label: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: Option<Signal<bool>>,
) -> impl IntoView {
    let ctx = expect_context::<FormContext>();
    let id = field.dom_id();

    view! {
        <div class="form-group">
            <label for=id>
                {label}
                <Show when=move || required.is_some_and(|r| r.get())>
                    <span class="required">" *"</span>
                </Show>
            </label>
            <textarea
                id=id
                name=id
                class="input-field"
                class:invalid=move || ctx.is_invalid(field)
                placeholder=placeholder
                prop:value=move || ctx.value(field)
                on:input=move |ev| ctx.form.update(|f| f.set_text(field, event_target_value(&ev)))
            ></textarea>
        </div>
    }
}

#[component]
fn SelectField(field: FieldId, label: &'static str, options: &'static [(&'static str, &'static str)]) -> impl IntoView {
    let ctx = expect_context::<FormContext>();
    let id = field.dom_id();

    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <select
                id=id
                name=id
                class="input-field"
                prop:value=move || ctx.value(field)
                on:change=move |ev| ctx.form.update(|f| f.set_text(field, event_target_value(&ev)))
            >
                {options
                    .iter()
                    .map(|&(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn CheckboxGroup(field: FieldId, legend: &'static str, options: &'static [(&'static str, &'static str)]) -> impl IntoView {
    let ctx = expect_context::<FormContext>();

    view! {
        <fieldset class="checkbox-group">
            <legend>{legend}</legend>
            {options
                .iter()
                .map(|&(value, text)| {
                    view! {
                        <label class="choice">
                            <input
                                type="checkbox"
                                name=field.dom_id()
                                value=value
                                prop:checked=move || ctx.form.with(|f| f.is_chosen(field, value))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    ctx.form.update(|f| f.set_choice(field, value, checked));
                                }
                            />
                            {text}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

#[component]
fn MarketingSourceGroup() -> impl IntoView {
    let ctx = expect_context::<FormContext>();
    let field = FieldId::MarketingSource;

    view! {
        <fieldset class="radio-group">
            <legend>"Who handles your marketing?"</legend>
            {MARKETING_SOURCES
                .iter()
                .map(|&(value, text)| {
                    view! {
                        <label class="choice">
                            <input
                                type="radio"
                                name=field.dom_id()
                                value=value
                                prop:checked=move || ctx.form.with(|f| f.is_chosen(field, value))
                                on:change=move |_| ctx.form.update(|f| f.marketing_source = Some(value.into()))
                            />
                            {text}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

/// The lead-generation form and its "Generate My Strategy" button
#[component]
pub fn StrategyFormSection() -> impl IntoView {
    let modals = expect_context::<RwSignal<ModalController>>();
    let submission = expect_context::<RwSignal<SubmissionState>>();

    let ctx = FormContext {
        form: RwSignal::new(StrategyForm::default()),
        invalid: RwSignal::new(Vec::new()),
    };
    provide_context(ctx);

    let show_age_other = move || ctx.form.with(StrategyForm::age_range_other_visible);
    let description_required =
        Signal::derive(move || ctx.form.with(StrategyForm::strategy_description_required));

    let submit = move |_: MouseEvent| {
        if submission.with_untracked(SubmissionState::is_loading) {
            return;
        }

        let validated = match ctx.form.with_untracked(StrategyForm::validate) {
            Ok(validated) => {
                ctx.invalid.set(Vec::new());
                validated
            }
            Err(errors) => {
                ctx.invalid.set(errors.fields());
                browser::alert(&errors.to_string());
                if let Some(field) = errors.first_field() {
                    browser::focus(field.dom_id());
                }
                return;
            }
        };

        let prompt = build_prompt(&validated);
        if !submission.try_update(SubmissionState::begin).unwrap_or(false) {
            return;
        }
        leptos::logging::log!("requesting strategy ({} chars)", prompt.chars().count());

        leptos::task::spawn_local(async move {
            let outcome = api::generate_strategy(&prompt).await;
            if let Err(e) = &outcome {
                leptos::logging::error!("strategy generation failed: {e}");
                browser::alert(&format!("Error generating strategy: {e}"));
            }
            modals.update(|m| submission.update(|s| s.finish(m, outcome)));
        });
    };

    view! {
        <section id="strategy-form" class="strategy-form">
            <h2>"Tell us about your business"</h2>
            <p class="hint">"Every field is optional. Leave anything blank and the AI will fill the gap."</p>

            <h3>"Business Identity"</h3>
            <TextField field=FieldId::BrandName label="Brand / Company Name" placeholder="Acme Coffee" />
            <TextArea field=FieldId::BusinessDescription label="Brief Description" />
            <TextField field=FieldId::Website label="Website" placeholder="https://" />
            <TextField field=FieldId::IndustryNiche label="Industry / Niche" />

            <h3>"Target Audience"</h3>
            <TextField field=FieldId::CurrentUsers label="Current Users / Customers" numeric=true />
            <TextField field=FieldId::TargetUsers label="Target Users / Growth Goal" />
            <SelectField field=FieldId::AgeRange label="User Age Range" options=AGE_RANGES />
            <Show when=show_age_other>
                <TextField field=FieldId::AgeRangeOther label="Describe the age range" />
            </Show>
            <TextField field=FieldId::Locations label="Target Locations / Countries" />
            <CheckboxGroup field=FieldId::SocialPlatforms legend="Main Social Media Platforms" options=SOCIAL_PLATFORMS />
            <TextField field=FieldId::Languages label="Languages Spoken" />

            <h3>"Marketing Goals"</h3>
            <CheckboxGroup field=FieldId::PrimaryGoals legend="Primary Goals" options=GOALS />
            <TextField field=FieldId::GoalsTimeframe label="Timeframe for Goals" placeholder="e.g. 6 months" />
            <TextField field=FieldId::GoalsRoi label="Expected ROI / Revenue Goal" />

            <h3>"Current Strategy & Resources"</h3>
            <SelectField field=FieldId::StrategyStatus label="Do you have a marketing strategy today?" options=STRATEGY_STATUSES />
            <TextArea
                field=FieldId::CurrentStrategyDescription
                label="Current Strategy Description"
                required=description_required
            />
            <TextField field=FieldId::MarketingBudget label="Marketing Budget (Monthly/Total)" numeric=true />
            <MarketingSourceGroup />

            <h3>"Creative Ideas & Preferences"</h3>
            <TextArea field=FieldId::MarketingIdeas label="Marketing Ideas to Explore" />
            <TextField field=FieldId::BrandVoice label="Brand Voice or Tone" placeholder="Playful, expert, warm..." />
            <TextField field=FieldId::ContentTypes label="Preferred Content Types" />
            <TextField field=FieldId::Competitors label="Competitors" />

            <button
                id="submit-btn"
                type="button"
                class="btn btn-primary"
                disabled=move || submission.with(SubmissionState::is_loading)
                on:click=submit
            >
                {move || {
                    if submission.with(SubmissionState::is_loading) {
                        "Generating..."
                    } else {
                        "Generate My Strategy"
                    }
                }}
            </button>
            {move || {
                submission.with(|s| {
                    s.error().map(|e| {
                        let text = format!("Error generating strategy: {e}");
                        view! { <p class="error-message" role="alert">{text}</p> }
                    })
                })
            }}
        </section>
    }
}
