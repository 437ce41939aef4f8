use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn key(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Presentation-only overrides layered on top of the active template at
/// render time. An empty color or font string means "no override".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub font_family: String,
    pub text_color: String,
    pub primary_color: String,
    pub accent_color: String,
    pub font_size: u32,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            font_family: String::new(),
            text_color: String::new(),
            primary_color: String::new(),
            accent_color: String::new(),
            font_size: 16,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Overwrite one color slot by key. Unknown keys are a no-op so the
    /// operation stays total.
    pub fn set_color(&mut self, key: &str, value: &str) {
        match key {
            "primary" => self.primary_color = value.to_string(),
            "accent" => self.accent_color = value.to_string(),
            "text" => self.text_color = value.to_string(),
            _ => {}
        }
    }
}
