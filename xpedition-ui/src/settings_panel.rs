use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use xpedition_core::{TravelBackend, UiConfig};
use xpedition_shared::{Masked, SettingsUpdate, Theme};

use crate::appearance::{apply_font_size, apply_theme};
use crate::dom::{Document, ElementKey};
use crate::error::UiError;

pub const SAVED_MESSAGE: &str = "Settings updated successfully";
pub const THEME_CHANGED_SUFFIX: &str = " - Please refresh other open pages to see all changes.";
pub const REJECTED_MESSAGE: &str = "Failed to update settings";
pub const TRANSPORT_MESSAGE: &str = "An error occurred while saving settings";
const SAVING_LABEL: &str = "Saving...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOutcome {
    /// Theme or font-size control missing; nothing was applied or sent.
    Skipped,
    Saved { theme_changed: bool },
    Rejected(String),
    Failed,
}

#[derive(Debug, Clone, Copy)]
enum Banner {
    Success,
    Danger,
}

/// Theme, font size, notification and language preferences form.
#[derive(Debug)]
pub struct SettingsPanel {
    form: ElementKey,
    theme: Option<ElementKey>,
    font_size: Option<ElementKey>,
    notifications: Option<ElementKey>,
    language: Option<ElementKey>,
    csrf_meta: Option<ElementKey>,
    submit_button: Option<ElementKey>,
    alert: Option<ElementKey>,
    message: Option<ElementKey>,
    hide_alert_at: Option<Instant>,
}

impl SettingsPanel {
    pub fn bind(doc: &Document, form: ElementKey) -> Self {
        let csrf_meta = doc.descendants(doc.root()).into_iter().find(|&k| {
            let el = doc.get(k);
            el.tag == "meta" && el.attr("name") == Some("csrf-token")
        });
        let submit_button = doc.descendants(form).into_iter().find(|&k| {
            let el = doc.get(k);
            el.tag == "button" && el.attr("type") == Some("submit")
        });

        Self {
            form,
            theme: doc.by_id("theme"),
            font_size: doc.by_id("font_size"),
            notifications: doc.by_id("notifications_enabled"),
            language: doc.by_id("language"),
            csrf_meta,
            submit_button,
            alert: doc.by_id("settings-alert"),
            message: doc.by_id("settings-message"),
            hide_alert_at: None,
        }
    }

    pub fn form(&self) -> ElementKey {
        self.form
    }

    /// Applies the chosen appearance immediately, then posts the preferences.
    /// The submit button is disabled while the request is in flight.
    pub async fn submit(
        &mut self,
        doc: &mut Document,
        backend: &dyn TravelBackend,
        config: &UiConfig,
        now: Instant,
    ) -> Result<SettingsOutcome, UiError> {
        let (Some(theme_select), Some(font_select)) = (self.theme, self.font_size) else {
            debug!("settings form lacks theme or font size control, ignoring submit");
            return Ok(SettingsOutcome::Skipped);
        };
        let meta = doc.require(self.csrf_meta, "csrf-token meta tag")?;
        let csrf_token = doc.get(meta).attr("content").unwrap_or_default().to_string();

        let theme = Theme::from_value(doc.value(theme_select));
        let font_size = doc.value(font_select).to_string();
        let notifications_enabled = self.notifications.is_some_and(|k| doc.get(k).checked);
        let language = match self.language {
            Some(k) => doc.value(k).to_string(),
            None => config.default_language.clone(),
        };

        let body = doc.body();
        let theme_changed = doc.get(body).data("theme") != Some(theme.as_str());
        doc.get_mut(body).dataset.insert("theme".to_string(), theme.as_str().to_string());

        apply_theme(doc, theme);
        apply_font_size(doc, &font_size);
        let root = doc.root();
        doc.get_mut(root).attributes.insert("lang".to_string(), language.clone());
        doc.storage_set(&config.theme_storage_key, theme.as_str());

        let original_label = self.submit_button.map(|b| {
            let button = doc.get_mut(b);
            button.disabled = true;
            std::mem::replace(&mut button.text, SAVING_LABEL.to_string())
        });

        let update = SettingsUpdate {
            csrf_token: Masked(csrf_token),
            theme,
            font_size,
            notifications_enabled,
            language,
        };

        let outcome = match backend.update_settings(&update).await {
            Ok(response) if response.success => {
                let mut message = response.message.unwrap_or_else(|| SAVED_MESSAGE.to_string());
                if theme_changed {
                    message.push_str(THEME_CHANGED_SUFFIX);
                }
                info!("Settings saved (theme={}, changed={})", theme.as_str(), theme_changed);
                self.show_banner(doc, Banner::Success, &message);
                self.hide_alert_at = Some(now + Duration::from_secs(config.settings_alert_seconds));
                SettingsOutcome::Saved { theme_changed }
            }
            Ok(response) => {
                let message = response.message.unwrap_or_else(|| REJECTED_MESSAGE.to_string());
                warn!("Backend refused settings update: {}", message);
                self.show_banner(doc, Banner::Danger, &message);
                self.hide_alert_at = None;
                SettingsOutcome::Rejected(message)
            }
            Err(e) => {
                error!("Saving settings failed: {}", e);
                self.show_banner(doc, Banner::Danger, TRANSPORT_MESSAGE);
                self.hide_alert_at = None;
                SettingsOutcome::Failed
            }
        };

        if let (Some(button), Some(label)) = (self.submit_button, original_label) {
            let button = doc.get_mut(button);
            button.disabled = false;
            button.text = label;
        }

        Ok(outcome)
    }

    fn show_banner(&self, doc: &mut Document, banner: Banner, message: &str) {
        let (Ok(alert), Ok(text)) = (
            doc.require(self.alert, "settings alert area"),
            doc.require(self.message, "settings message"),
        ) else {
            return;
        };

        let (remove, add) = match banner {
            Banner::Success => ("alert-danger", "alert-success"),
            Banner::Danger => ("alert-success", "alert-danger"),
        };
        let alert = doc.get_mut(alert);
        alert.remove_class("d-none");
        alert.remove_class(remove);
        alert.add_class(add);
        doc.get_mut(text).text = message.to_string();
    }

    /// Hides the success banner once its display time has passed.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        match (self.hide_alert_at, self.alert) {
            (Some(deadline), Some(alert)) if now >= deadline => {
                doc.get_mut(alert).add_class("d-none");
                self.hide_alert_at = None;
            }
            _ => {}
        }
    }
}
