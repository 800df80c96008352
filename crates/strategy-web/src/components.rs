//! UI Components

use leptos::prelude::*;

use strategy_core::view_state::ToggleIcons;
use strategy_core::{ModalController, ModalId, SubmissionState, Theme};

use crate::browser;

fn modals() -> RwSignal<ModalController> {
    expect_context::<RwSignal<ModalController>>()
}

/// Link or button that opens a modal
#[component]
pub fn ModalTrigger(id: ModalId, #[prop(optional)] class: &'static str, children: Children) -> impl IntoView {
    let modals = modals();
    view! {
        <button
            type="button"
            class=class
            data-modal-trigger=id.as_str()
            on:click=move |ev| {
                ev.stop_propagation();
                modals.update(|m| {
                    m.open(id);
                });
            }
        >
            {children()}
        </button>
    }
}

/// Shared dimming layer. Modals close only from their own close button.
#[component]
pub fn Overlay() -> impl IntoView {
    let modals = modals();
    view! {
        <div
            id="modal-overlay"
            class="modal-overlay"
            class:is-visible=move || modals.with(ModalController::overlay_visible)
        ></div>
    }
}

/// Modal shell. Visibility comes from the shared `ModalController`.
#[component]
pub fn Modal(id: ModalId, title: &'static str, children: Children) -> impl IntoView {
    let modals = modals();
    let is_open = move || modals.with(|m| m.is_open(id));

    view! {
        <div
            id=id.as_str()
            class="modal"
            class:is-open=is_open
            data-modal=id.as_str()
            role="dialog"
            aria-modal="true"
            aria-hidden=move || (!is_open()).to_string()
        >
            <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                <button
                    type="button"
                    class="modal-close"
                    aria-label="Close"
                    on:click=move |_| {
                        modals.update(|m| {
                            m.close(id);
                        });
                    }
                >
                    "×"
                </button>
                <h2>{title}</h2>
                {children()}
            </div>
        </div>
    }
}

/// Moon/sun button. Every instance reads the same `Theme`, so they flip together.
#[component]
pub fn DarkModeToggle() -> impl IntoView {
    let theme = expect_context::<RwSignal<Theme>>();
    let icons = move || theme.get().icons();

    view! {
        <button
            type="button"
            class="dark-mode-toggle"
            aria-label="Toggle dark mode"
            on:click=move |_| theme.update(|t| *t = t.toggled())
        >
            <span class="moon-icon" style:display=move || ToggleIcons::display(icons().moon_visible)>
                "🌙"
            </span>
            <span class="sun-icon" style:display=move || ToggleIcons::display(icons().sun_visible)>
                "☀️"
            </span>
        </button>
    }
}

#[component]
pub fn SiteHeader() -> impl IntoView {
    let modals = modals();

    view! {
        <header class="site-header">
            <a href="/" class="logo">"StrategyForge"</a>
            <DarkModeToggle />
            <button
                type="button"
                class="menu-toggle"
                aria-label="Menu"
                aria-expanded=move || modals.with(ModalController::menu_open).to_string()
                on:click=move |ev| {
                    ev.stop_propagation();
                    modals.update(ModalController::toggle_menu);
                }
            >
                "☰"
            </button>
            <nav
                class="top-right-buttons"
                class:show=move || modals.with(ModalController::menu_open)
                on:click=|ev| ev.stop_propagation()
            >
                <a href="#strategy-form" class="nav-link">"Get Your Strategy"</a>
                <ModalTrigger id=ModalId::Survey class="nav-link">"Take the Survey"</ModalTrigger>
                <ModalTrigger id=ModalId::Contact class="nav-link">"Contact"</ModalTrigger>
                <DarkModeToggle />
            </nav>
        </header>
    }
}

#[component]
pub fn SiteFooter() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <ModalTrigger id=ModalId::Privacy class="link">"Privacy Policy"</ModalTrigger>
            <ModalTrigger id=ModalId::Terms class="link">"Terms of Service"</ModalTrigger>
            <ModalTrigger id=ModalId::Contact class="link">"Contact"</ModalTrigger>
        </footer>
    }
}

#[component]
pub fn LoadingIndicator() -> impl IntoView {
    let submission = expect_context::<RwSignal<SubmissionState>>();
    view! {
        <Show when=move || submission.with(SubmissionState::is_loading)>
            <div class="loading-indicator" role="status">
                <span class="spinner"></span>
                "Generating your strategy, this might take a moment..."
            </div>
        </Show>
    }
}

/// Result dialog with copy and download actions
#[component]
pub fn StrategyResultModal() -> impl IntoView {
    let submission = expect_context::<RwSignal<SubmissionState>>();
    let reply = move || submission.with(|s| s.reply().map(str::to_string)).unwrap_or_default();
    let (copied, set_copied) = signal(false);

    let copy = move |_: leptos::ev::MouseEvent| {
        let text = reply();
        leptos::task::spawn_local(async move {
            match browser::copy_to_clipboard(&text).await {
                Ok(()) => set_copied.set(true),
                Err(e) => {
                    leptos::logging::error!("clipboard write failed: {e}");
                    browser::alert("Could not copy to clipboard.");
                }
            }
        });
    };

    let download = move |_: leptos::ev::MouseEvent| {
        let name = browser::download_name(chrono::Local::now().date_naive());
        if let Err(e) = browser::download_text(&name, &reply()) {
            leptos::logging::error!("download failed: {e:?}");
            browser::alert("Could not download the strategy.");
        }
    };

    // Reset the "Copied" label whenever a new reply arrives
    Effect::new(move |_| {
        submission.track();
        set_copied.set(false);
    });

    view! {
        <Modal id=ModalId::StrategyResult title="Your Marketing Strategy">
            <pre class="strategy-output">{reply}</pre>
            <div class="modal-actions">
                <button type="button" class="btn" on:click=copy>
                    {move || if copied.get() { "Copied!" } else { "Copy to Clipboard" }}
                </button>
                <button type="button" class="btn btn-primary" on:click=download>
                    "Download as Text"
                </button>
            </div>
        </Modal>
    }
}

#[component]
pub fn PrivacyModal() -> impl IntoView {
    view! {
        <Modal id=ModalId::Privacy title="Privacy Policy">
            <p>
                "We only use the details you enter to generate your strategy. The form is sent to our "
                "server, forwarded to our AI provider, and not stored."
            </p>
            <p>"Survey answers are handled by our form provider and used to improve the product."</p>
        </Modal>
    }
}

#[component]
pub fn TermsModal() -> impl IntoView {
    view! {
        <Modal id=ModalId::Terms title="Terms of Service">
            <p>
                "Generated strategies are suggestions produced by an AI model. Review them before "
                "acting on them; we make no guarantee of results."
            </p>
        </Modal>
    }
}

#[component]
pub fn ContactModal() -> impl IntoView {
    view! {
        <Modal id=ModalId::Contact title="Contact Us">
            <p>"Questions or partnership ideas? Reach us at "
                <a href="mailto:hello@strategyforge.example">"hello@strategyforge.example"</a>
                "."
            </p>
        </Modal>
    }
}
