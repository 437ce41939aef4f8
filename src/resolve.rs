use std::collections::HashMap;

use crate::models::section::SectionKind;
use crate::models::settings::{Settings, Theme};
use crate::models::template::{SectionStyle, Template};

/// The merged result of base template, selected template, and settings.
/// Derived fresh on every render, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub font: String,
    pub primary_color: String,
    pub background_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub font_size: u32,
    pub theme: Theme,
    pub section_order: Vec<SectionKind>,
    pub styles: HashMap<SectionKind, SectionStyle>,
}

/// Merge base template <- selected template <- settings.
///
/// Section order is the insertion-ordered de-duplicated union of the base
/// order followed by the selected template's order: the base ordering wins
/// for sections both define, and sections unique to the selected template
/// are appended. A selected template cannot fully reorder the base — the
/// union rule is the one deterministic merge this builder supports.
pub fn resolve(selected: Option<&Template>, settings: &Settings) -> EffectiveConfig {
    let base = Template::base();

    let (mut font, mut primary, background, styles) = match selected {
        Some(t) => (
            t.font.clone(),
            t.primary_color.clone(),
            t.background_color.clone(),
            t.styles.clone(),
        ),
        None => (
            base.font.clone(),
            base.primary_color.clone(),
            base.background_color.clone(),
            HashMap::new(),
        ),
    };

    let mut section_order = base.section_order.clone();
    if let Some(t) = selected {
        for kind in &t.section_order {
            if !section_order.contains(kind) {
                section_order.push(*kind);
            }
        }
    }

    // Settings win for the fields they define.
    if !settings.font_family.is_empty() {
        font = settings.font_family.clone();
    }
    if !settings.primary_color.is_empty() {
        primary = settings.primary_color.clone();
    }
    let text_color = if settings.text_color.is_empty() {
        "#000000".to_string()
    } else {
        settings.text_color.clone()
    };
    let accent_color = if settings.accent_color.is_empty() {
        "#6610f2".to_string()
    } else {
        settings.accent_color.clone()
    };

    EffectiveConfig {
        font,
        primary_color: primary,
        background_color: background,
        text_color,
        accent_color,
        font_size: settings.font_size,
        theme: settings.theme,
        section_order,
        styles,
    }
}

/// Inline `style="…"` attribute for one section, from the resolved style
/// map. A missing entry renders no attribute at all. Values pass through
/// the CSS-safe filter so a stored color cannot break out of the attribute.
pub fn section_style_attr(config: &EffectiveConfig, kind: SectionKind) -> String {
    let style = match config.styles.get(&kind) {
        Some(s) => s,
        None => return String::new(),
    };
    let mut parts = Vec::new();
    if !style.background_color.is_empty() {
        parts.push(format!(
            "background-color:{}",
            crate::render::css_value(&style.background_color)
        ));
    }
    if !style.color.is_empty() {
        parts.push(format!("color:{}", crate::render::css_value(&style.color)));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", parts.join(";"))
    }
}
