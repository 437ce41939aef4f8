use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::section::SectionKind;

/// Inline style for one rendered section. Empty fields contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionStyle {
    pub background_color: String,
    pub color: String,
}

impl SectionStyle {
    pub fn bg(background_color: &str) -> Self {
        SectionStyle {
            background_color: background_color.to_string(),
            color: String::new(),
        }
    }

    pub fn bg_fg(background_color: &str, color: &str) -> Self {
        SectionStyle {
            background_color: background_color.to_string(),
            color: color.to_string(),
        }
    }
}

/// A named bundle of font/color/layout defaults. Selecting a template
/// copies it into the state snapshot — editing a predefined template later
/// does not retroactively change portfolios that copied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub font: String,
    pub primary_color: String,
    pub background_color: String,
    pub section_order: Vec<SectionKind>,
    pub styles: HashMap<SectionKind, SectionStyle>,
    pub image: String,
}

impl Default for Template {
    fn default() -> Self {
        Template::base()
    }
}

impl Template {
    /// The base template every resolution starts from.
    pub fn base() -> Self {
        Template {
            id: "base".to_string(),
            name: "Base".to_string(),
            font: "Arial, sans-serif".to_string(),
            primary_color: "#007bff".to_string(),
            background_color: "#ffffff".to_string(),
            section_order: SectionKind::ALL.to_vec(),
            styles: HashMap::new(),
            image: String::new(),
        }
    }

    /// The fixed set of predefined templates offered by the selector.
    pub fn predefined() -> Vec<Template> {
        vec![
            Template {
                id: "minimal".to_string(),
                name: "Minimal".to_string(),
                font: "Arial, sans-serif".to_string(),
                primary_color: "#007bff".to_string(),
                background_color: "#ffffff".to_string(),
                section_order: SectionKind::ALL.to_vec(),
                styles: HashMap::from([
                    (SectionKind::Hero, SectionStyle::bg_fg("#007bff", "#ffffff")),
                    (SectionKind::About, SectionStyle::bg("#ffffff")),
                    (SectionKind::Projects, SectionStyle::bg("#f8f9fa")),
                    (SectionKind::Skills, SectionStyle::bg("#ffffff")),
                    (SectionKind::Testimonials, SectionStyle::bg("#ffffff")),
                    (SectionKind::Contact, SectionStyle::bg("#ffffff")),
                ]),
                image: "/templates/minimal.png".to_string(),
            },
            Template {
                id: "creative".to_string(),
                name: "Creative".to_string(),
                font: "Poppins, sans-serif".to_string(),
                primary_color: "#ff5722".to_string(),
                background_color: "#fdfdfd".to_string(),
                section_order: SectionKind::ALL.to_vec(),
                styles: HashMap::from([
                    (SectionKind::Hero, SectionStyle::bg_fg("#ff5722", "#ffffff")),
                    (SectionKind::About, SectionStyle::bg("#fff5e6")),
                    (SectionKind::Projects, SectionStyle::bg("#ffe6e6")),
                    (SectionKind::Skills, SectionStyle::bg("#fff5e6")),
                    (SectionKind::Testimonials, SectionStyle::bg("#e6f7ff")),
                    (SectionKind::Contact, SectionStyle::bg("#ffffff")),
                ]),
                image: "/templates/creative.png".to_string(),
            },
            Template {
                id: "professional".to_string(),
                name: "Professional".to_string(),
                font: "Roboto, sans-serif".to_string(),
                primary_color: "#333333".to_string(),
                background_color: "#ffffff".to_string(),
                section_order: vec![
                    SectionKind::Hero,
                    SectionKind::About,
                    SectionKind::Projects,
                    SectionKind::Skills,
                    SectionKind::Contact,
                    SectionKind::Testimonials,
                ],
                styles: HashMap::from([
                    (SectionKind::Hero, SectionStyle::bg_fg("#333333", "#ffffff")),
                    (SectionKind::About, SectionStyle::bg("#ffffff")),
                    (SectionKind::Projects, SectionStyle::bg("#f8f9fa")),
                    (SectionKind::Skills, SectionStyle::bg("#ffffff")),
                    (SectionKind::Contact, SectionStyle::bg("#ffffff")),
                    (SectionKind::Testimonials, SectionStyle::bg("#ffffff")),
                ]),
                image: "/templates/professional.png".to_string(),
            },
        ]
    }

    pub fn find(id: &str) -> Option<Template> {
        Template::predefined().into_iter().find(|t| t.id == id)
    }

    /// Build a user-created template: a name and uploaded thumbnail with
    /// styling copied from an existing template.
    pub fn custom(name: &str, image: &str, source: &Template) -> Template {
        let slug: String = name
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        Template {
            id: format!("custom-{}", slug.trim_matches('-')),
            name: name.to_string(),
            image: image.to_string(),
            ..source.clone()
        }
    }
}
