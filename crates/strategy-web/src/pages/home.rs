//! Home Page

use leptos::prelude::*;

use strategy_core::ModalId;

use crate::components::{LoadingIndicator, ModalTrigger};
use crate::form::StrategyFormSection;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"Your marketing strategy, drafted in minutes"</h1>
                <p class="tagline">
                    "Tell us about your business and get a tailored, AI-generated marketing plan."
                </p>
                <div class="cta">
                    <a href="#strategy-form" class="btn btn-primary">"Get Started"</a>
                    <ModalTrigger id=ModalId::Survey class="btn">"Share Feedback"</ModalTrigger>
                </div>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"🎯 Tailored"</h3>
                    <p>"Built from your audience, goals and budget, not a template."</p>
                </div>
                <div class="feature">
                    <h3>"🔒 Private"</h3>
                    <p>"Your answers go to our server and the AI provider only. Nothing is stored."</p>
                </div>
                <div class="feature">
                    <h3>"⚡ Fast"</h3>
                    <p>"Copy the result or download it as text to share with your team."</p>
                </div>
            </section>

            <StrategyFormSection />
            <LoadingIndicator />
        </div>
    }
}
