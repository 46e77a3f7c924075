use serde::Deserialize;

/// Page behaviour knobs, loaded as the `[ui]` config section.
#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_alert_seconds")]
    pub settings_alert_seconds: u64,
    #[serde(default = "default_theme_key")]
    pub theme_storage_key: String,
}

fn default_language() -> String { "en".to_string() }
fn default_alert_seconds() -> u64 { 3 }
fn default_theme_key() -> String { "xpedition-theme".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            settings_alert_seconds: default_alert_seconds(),
            theme_storage_key: default_theme_key(),
        }
    }
}
