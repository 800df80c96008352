//! View State
//!
//! Finite-state models behind the landing page. The frontend keeps one of
//! each in a reactive signal and derives every rendered attribute (open
//! classes, overlay visibility, icon display, loading indicator) from them.

use serde::{Deserialize, Serialize};

/// Modals that can be shown over the page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalId {
    Survey,
    Privacy,
    Terms,
    Contact,
    StrategyResult,
}

impl ModalId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Survey => "survey-modal",
            Self::Privacy => "privacy-modal",
            Self::Terms => "terms-modal",
            Self::Contact => "contact-modal",
            Self::StrategyResult => "strategy-result-modal",
        }
    }
}

impl std::fmt::Display for ModalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner of modal and menu visibility.
///
/// At most one modal is open at a time and the shared overlay is visible
/// exactly when one is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalController {
    open: Option<ModalId>,
    menu_open: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `id`, replacing any other open modal and closing the menu.
    ///
    /// Returns `false` when `id` was already the open modal.
    pub fn open(&mut self, id: ModalId) -> bool {
        self.menu_open = false;
        if self.open == Some(id) {
            return false;
        }
        if let Some(previous) = self.open.replace(id) {
            tracing::debug!(%previous, next = %id, "switching modal");
        }
        true
    }

    /// Close `id` if it is the open modal
    pub fn close(&mut self, id: ModalId) -> bool {
        if self.open == Some(id) {
            self.open = None;
            true
        } else {
            false
        }
    }

    /// Close every modal and the menu
    pub fn close_all(&mut self) {
        self.open = None;
        self.menu_open = false;
    }

    /// Toggle the hamburger menu; opening it dismisses any modal first
    pub fn toggle_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
        } else {
            self.close_all();
            self.menu_open = true;
        }
    }

    /// Close the menu without touching modals (click outside)
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub const fn current(&self) -> Option<ModalId> {
        self.open
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open == Some(id)
    }

    pub const fn overlay_visible(&self) -> bool {
        self.open.is_some()
    }

    pub const fn menu_open(&self) -> bool {
        self.menu_open
    }
}

/// Class toggled on the document body in dark mode
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Icon visibility shared by every toggle control
    pub const fn icons(self) -> ToggleIcons {
        ToggleIcons {
            moon_visible: !self.is_dark(),
            sun_visible: self.is_dark(),
        }
    }
}

/// Which icon a dark-mode toggle shows: the moon offers dark, the sun offers light
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleIcons {
    pub moon_visible: bool,
    pub sun_visible: bool,
}

impl ToggleIcons {
    /// CSS `display` value for an icon
    pub const fn display(visible: bool) -> &'static str {
        if visible { "inline-flex" } else { "none" }
    }
}

/// Lifecycle of the "generate my strategy" request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    InFlight,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    /// Enter `InFlight`. Returns `false`, leaving the state untouched, if a
    /// request is already running.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = Self::InFlight;
        true
    }

    pub fn succeed(&mut self, reply: impl Into<String>) {
        *self = Self::Succeeded(reply.into());
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        *self = Self::Failed(error.into());
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Succeeded(reply) => Some(reply),
            _ => None,
        }
    }

    /// Message of the last failed request, shown under the submit button
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Settle the running request. A reply opens the result modal; an
    /// error only clears the loading state.
    pub fn finish(&mut self, modals: &mut ModalController, outcome: Result<String, String>) {
        match outcome {
            Ok(reply) => {
                self.succeed(reply);
                modals.open(ModalId::StrategyResult);
            }
            Err(error) => self.fail(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_second_modal_replaces_first() {
        let mut modals = ModalController::new();
        assert!(modals.open(ModalId::Privacy));
        assert!(modals.open(ModalId::Survey));

        assert_eq!(modals.current(), Some(ModalId::Survey));
        assert!(!modals.is_open(ModalId::Privacy));
        assert!(modals.overlay_visible());
    }

    #[test]
    fn test_closing_last_modal_hides_overlay() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Terms);
        assert!(modals.close(ModalId::Terms));
        assert_eq!(modals.current(), None);
        assert!(!modals.overlay_visible());
    }

    #[test]
    fn test_closing_other_modal_is_noop() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Contact);
        assert!(!modals.close(ModalId::Survey));
        assert!(modals.is_open(ModalId::Contact));
        assert!(modals.overlay_visible());
    }

    #[test]
    fn test_reopening_same_modal_is_idempotent() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Survey);
        assert!(!modals.open(ModalId::Survey));
        assert!(modals.is_open(ModalId::Survey));
        assert!(modals.overlay_visible());
    }

    #[test]
    fn test_menu_and_modals_are_exclusive() {
        let mut modals = ModalController::new();
        modals.open(ModalId::Privacy);
        modals.toggle_menu();
        assert!(modals.menu_open());
        assert!(!modals.overlay_visible());

        modals.open(ModalId::Terms);
        assert!(!modals.menu_open());
        assert!(modals.is_open(ModalId::Terms));

        modals.close_all();
        assert_eq!(modals, ModalController::new());
    }

    #[test]
    fn test_closing_menu_leaves_modal_alone() {
        let mut modals = ModalController::new();
        modals.toggle_menu();
        modals.close_menu();
        assert!(!modals.menu_open());

        modals.toggle_menu();
        modals.toggle_menu();
        assert!(!modals.menu_open());
    }

    #[test]
    fn test_theme_toggle_inverts_icons() {
        let light = Theme::Light;
        let dark = light.toggled();
        assert!(dark.is_dark());

        let before = light.icons();
        let after = dark.icons();
        assert_eq!(before.moon_visible, !after.moon_visible);
        assert_eq!(before.sun_visible, !after.sun_visible);
        assert_eq!(ToggleIcons::display(after.sun_visible), "inline-flex");
        assert_eq!(ToggleIcons::display(after.moon_visible), "none");
        assert_eq!(dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_submission_rejects_reentrant_begin() {
        let mut state = SubmissionState::default();
        assert!(state.begin());
        assert!(state.is_loading());
        assert!(!state.begin());

        state.succeed("plan");
        assert_eq!(state.reply(), Some("plan"));
        assert!(state.begin());

        state.fail("boom");
        assert!(!state.is_loading());
        assert_eq!(state.reply(), None);
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_finish_with_reply_opens_result_modal() {
        let mut state = SubmissionState::default();
        let mut modals = ModalController::new();
        assert!(state.begin());
        assert!(state.is_loading());

        state.finish(&mut modals, Ok("Post every day.".into()));

        assert!(!state.is_loading());
        assert_eq!(state.reply(), Some("Post every day."));
        assert_eq!(state.error(), None);
        assert_eq!(modals.current(), Some(ModalId::StrategyResult));
        assert!(modals.overlay_visible());
    }

    #[test]
    fn test_finish_with_error_clears_loading_only() {
        let mut state = SubmissionState::default();
        let mut modals = ModalController::new();
        assert!(state.begin());
        assert!(!state.begin());

        state.finish(&mut modals, Err("HTTP error 500".into()));

        assert!(!state.is_loading());
        assert_eq!(state.reply(), None);
        assert_eq!(state.error(), Some("HTTP error 500"));
        assert_eq!(modals, ModalController::new());
        assert!(state.begin());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_overlay_stays_until_modal_closes_itself() {
        let mut modals = ModalController::new();
        modals.open(ModalId::StrategyResult);

        // Clicks outside the menu only reach `close_menu`
        modals.close_menu();
        assert!(modals.overlay_visible());
        assert!(!modals.close(ModalId::Survey));
        assert!(modals.overlay_visible());

        assert!(modals.close(ModalId::StrategyResult));
        assert!(!modals.overlay_visible());
    }
}
