//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use strategy_core::view_state::DARK_MODE_CLASS;
use strategy_core::{ModalController, SubmissionState, Theme};

use crate::browser;
use crate::components::{
    ContactModal, Overlay, PrivacyModal, SiteFooter, SiteHeader, StrategyResultModal, TermsModal,
};
use crate::pages::HomePage;
use crate::survey::SurveyModal;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let modals = RwSignal::new(ModalController::new());
    let theme = RwSignal::new(Theme::from_dark(browser::body_has_class(DARK_MODE_CLASS)));
    let submission = RwSignal::new(SubmissionState::default());

    provide_context(modals);
    provide_context(theme);
    provide_context(submission);

    Effect::new(move |_| browser::set_body_class(DARK_MODE_CLASS, theme.get().is_dark()));

    // Any click that reaches the window closes the menu; the menu itself
    // stops propagation.
    let handle = window_event_listener(leptos::ev::click, move |_| {
        if modals.with_untracked(ModalController::menu_open) {
            modals.update(ModalController::close_menu);
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <Router>
            <SiteHeader />
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                </Routes>
            </main>
            <SiteFooter />

            // Rendered last so they sit above the page
            <Overlay />
            <SurveyModal />
            <PrivacyModal />
            <TermsModal />
            <ContactModal />
            <StrategyResultModal />
        </Router>
    }
}
