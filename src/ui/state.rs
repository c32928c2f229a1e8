/// Popup view state that does not depend on the DOM
use crate::chrome::{ActiveTab, CloseTarget};
use crate::classifier::Verdict;
use crate::error::CheckError;
use crate::settings::Settings;

pub const REPORT_THANKS: &str = "Thank you for the report. We'll review it shortly.";
pub const FEEDBACK_THANKS: &str = "Thank you for your feedback!";
pub const MAX_RATING: u8 = 5;

/// Colour of a status line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tone {
    Info,
    Safe,
    Danger,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CheckStatus {
    #[default]
    Idle,
    Checking,
    Finished(Verdict),
    Failed(CheckError),
}

impl CheckStatus {
    pub fn message(&self) -> Option<String> {
        match self {
            CheckStatus::Idle => None,
            CheckStatus::Checking => Some("Checking link...".to_string()),
            CheckStatus::Finished(verdict) if verdict.distracting => Some(format!(
                "Distracting (Response Time: {}ms) 🚨",
                verdict.elapsed_ms
            )),
            CheckStatus::Finished(verdict) => Some(format!(
                "Not Distracting (Response Time: {}ms) 👍",
                verdict.elapsed_ms
            )),
            CheckStatus::Failed(CheckError::EmptyUrl) => Some(CheckError::EmptyUrl.to_string()),
            CheckStatus::Failed(e) => Some(format!("Error: {}", e)),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            CheckStatus::Finished(verdict) if verdict.distracting => Tone::Danger,
            CheckStatus::Finished(_) => Tone::Safe,
            CheckStatus::Failed(CheckError::EmptyUrl) => Tone::Info,
            CheckStatus::Failed(_) => Tone::Error,
            _ => Tone::Info,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, CheckStatus::Checking)
    }

    pub fn is_distracting(&self) -> bool {
        matches!(self, CheckStatus::Finished(verdict) if verdict.distracting)
    }
}

/// "Report suspicious link" form. Nothing is sent anywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportForm {
    pub url: String,
    pub details: String,
    pub message: Option<String>,
}

impl ReportForm {
    /// Returns `false` and leaves the form untouched when the URL is empty
    pub fn submit(&mut self) -> bool {
        if self.url.trim().is_empty() {
            return false;
        }

        log::info!("Report received for {}", self.url);
        self.message = Some(REPORT_THANKS.to_string());
        self.url.clear();
        self.details.clear();
        true
    }
}

/// Star rating plus free text. Nothing is sent anywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeedbackForm {
    /// 0 means not rated yet
    pub rating: u8,
    pub text: String,
    pub message: Option<String>,
}

impl FeedbackForm {
    pub fn rate(&mut self, stars: u8) {
        self.rating = stars.clamp(1, MAX_RATING);
    }

    /// Returns `false` and leaves the form untouched when no rating was given
    pub fn submit(&mut self) -> bool {
        if self.rating == 0 {
            return false;
        }

        log::info!("Feedback received: {} stars", self.rating);
        self.message = Some(FEEDBACK_THANKS.to_string());
        self.rating = 0;
        self.text.clear();
        true
    }
}

/// Tab to overlay after a manual check: only the active tab, and only when
/// it is the page that was checked
pub fn overlay_target(tab: Option<&ActiveTab>, verdict: &Verdict) -> Option<i32> {
    tab.filter(|tab| tab.url.as_deref() == Some(verdict.url.as_str()))
        .map(|tab| tab.id)
}

pub fn close_target(tab: Option<&ActiveTab>) -> CloseTarget {
    match tab {
        Some(tab) => CloseTarget::Tab(tab.id),
        None => CloseTarget::PopupWindow,
    }
}

/// Settings as the popup sees them. Toggles are refused until the stored
/// values arrive so a defaulted flag is never written back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SavedSettings {
    #[default]
    Loading,
    Ready(Settings),
}

impl SavedSettings {
    pub fn current(&self) -> Settings {
        match self {
            SavedSettings::Loading => Settings::default(),
            SavedSettings::Ready(settings) => *settings,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SavedSettings::Ready(_))
    }

    pub fn toggled_dark_mode(&self) -> Option<Settings> {
        let SavedSettings::Ready(settings) = self else {
            return None;
        };
        Some(Settings {
            dark_mode: !settings.dark_mode,
            ..*settings
        })
    }

    pub fn toggled_protection(&self) -> Option<Settings> {
        let SavedSettings::Ready(settings) = self else {
            return None;
        };
        Some(Settings {
            protection_enabled: !settings.protection_enabled,
            ..*settings
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(distracting: bool, elapsed_ms: u32) -> CheckStatus {
        CheckStatus::Finished(Verdict {
            url: "http://example.com/ad".to_string(),
            distracting,
            elapsed_ms,
        })
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(CheckStatus::Idle.message(), None);
        assert_eq!(CheckStatus::Checking.message().unwrap(), "Checking link...");

        let flagged = finished(true, 120).message().unwrap();
        assert!(flagged.contains("Distracting"));
        assert!(flagged.contains("120ms"));

        assert_eq!(
            finished(false, 45).message().unwrap(),
            "Not Distracting (Response Time: 45ms) 👍"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CheckStatus::Failed(CheckError::EmptyUrl).message().unwrap(),
            "No URL provided."
        );
        assert_eq!(
            CheckStatus::Failed(CheckError::Network("Failed to fetch".to_string()))
                .message()
                .unwrap(),
            "Error: Failed to fetch"
        );
        assert_eq!(CheckStatus::Failed(CheckError::Status(500)).tone(), Tone::Error);
    }

    #[test]
    fn test_tones() {
        assert_eq!(finished(true, 1).tone(), Tone::Danger);
        assert_eq!(finished(false, 1).tone(), Tone::Safe);
        assert!(finished(true, 1).is_distracting());
        assert!(!finished(false, 1).is_distracting());
        assert!(CheckStatus::Checking.is_busy());
    }

    #[test]
    fn test_report_submit() {
        let mut form = ReportForm {
            url: "http://phish.example".to_string(),
            details: "asked for my password".to_string(),
            message: None,
        };

        assert!(form.submit());
        assert_eq!(form.message.as_deref(), Some(REPORT_THANKS));
        assert!(form.url.is_empty());
        assert!(form.details.is_empty());
    }

    #[test]
    fn test_report_without_url_is_noop() {
        let mut form = ReportForm {
            url: "  ".to_string(),
            details: "kept".to_string(),
            message: None,
        };
        let before = form.clone();

        assert!(!form.submit());
        assert_eq!(form, before);
    }

    #[test]
    fn test_feedback_submit() {
        let mut form = FeedbackForm::default();
        form.rate(4);
        form.text = "Nice".to_string();

        assert!(form.submit());
        assert_eq!(form.message.as_deref(), Some(FEEDBACK_THANKS));
        assert_eq!(form.rating, 0);
        assert!(form.text.is_empty());
    }

    #[test]
    fn test_feedback_without_rating_is_noop() {
        let mut form = FeedbackForm {
            text: "no stars".to_string(),
            ..Default::default()
        };
        let before = form.clone();

        assert!(!form.submit());
        assert_eq!(form, before);
    }

    #[test]
    fn test_rating_is_clamped() {
        let mut form = FeedbackForm::default();
        form.rate(9);
        assert_eq!(form.rating, 5);
        form.rate(0);
        assert_eq!(form.rating, 1);
    }

    fn tab(id: i32, url: Option<&str>) -> ActiveTab {
        ActiveTab {
            id,
            url: url.map(str::to_string),
        }
    }

    fn distracting(url: &str) -> Verdict {
        Verdict {
            url: url.to_string(),
            distracting: true,
            elapsed_ms: 80,
        }
    }

    #[test]
    fn test_overlay_only_on_checked_page() {
        let verdict = distracting("http://example.com/ad");

        let same = tab(3, Some("http://example.com/ad"));
        assert_eq!(overlay_target(Some(&same), &verdict), Some(3));

        let other = tab(3, Some("https://docs.rs"));
        assert_eq!(overlay_target(Some(&other), &verdict), None);

        let blank = tab(3, None);
        assert_eq!(overlay_target(Some(&blank), &verdict), None);

        assert_eq!(overlay_target(None, &verdict), None);
    }

    #[test]
    fn test_close_target() {
        assert_eq!(close_target(Some(&tab(5, Some("https://a.com")))), CloseTarget::Tab(5));
        assert_eq!(close_target(Some(&tab(5, None))), CloseTarget::Tab(5));
        assert_eq!(close_target(None), CloseTarget::PopupWindow);
    }

    #[test]
    fn test_toggles_refused_while_loading() {
        let loading = SavedSettings::default();

        assert!(!loading.is_ready());
        assert_eq!(loading.toggled_dark_mode(), None);
        assert_eq!(loading.toggled_protection(), None);
        assert_eq!(loading.current(), Settings::default());
    }

    #[test]
    fn test_toggles_flip_one_flag() {
        let saved = SavedSettings::Ready(Settings {
            dark_mode: true,
            protection_enabled: false,
        });

        assert_eq!(
            saved.toggled_protection(),
            Some(Settings {
                dark_mode: true,
                protection_enabled: true,
            })
        );
        assert_eq!(
            saved.toggled_dark_mode(),
            Some(Settings {
                dark_mode: false,
                protection_enabled: false,
            })
        );
    }
}
