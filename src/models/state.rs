use serde::{Deserialize, Serialize};

use super::profile::Profile;
use super::section::{Project, SectionKind, Sections, Skill, Testimonial};
use super::settings::Settings;
use super::template::Template;
use super::update::Update;

/// The full editable snapshot: everything the builder persists and the
/// renderer reads. `Default` is the hard-coded starter portfolio shown on
/// first load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioState {
    pub profile: Profile,
    pub sections: Sections,
    pub settings: Settings,
    pub active_section: SectionKind,
    pub selected_template: Option<Template>,
}

impl Default for PortfolioState {
    fn default() -> Self {
        let mut sections = Sections::default();
        sections.hero.title = "Welcome to My Portfolio!".to_string();
        sections.hero.body = "I build things for the web.".to_string();
        sections.about.title = "About Me".to_string();
        sections.projects.title = "My Projects".to_string();
        sections.projects.items = vec![
            Project {
                title: "Portfolio Template".to_string(),
                description: "A free portfolio template to showcase your skills.".to_string(),
                image: String::new(),
            },
            Project {
                title: "Builder Mockup".to_string(),
                description: "A mockup for a portfolio builder UI.".to_string(),
                image: String::new(),
            },
            Project {
                title: "Ecommerce".to_string(),
                description: "A full stack ecommerce website.".to_string(),
                image: String::new(),
            },
        ];
        sections.skills.title = "My Skills".to_string();
        sections.skills.items = vec![
            Skill {
                name: "React".to_string(),
                category: "Front-End".to_string(),
                level: 80,
            },
            Skill {
                name: "Bootstrap".to_string(),
                category: "Front-End".to_string(),
                level: 90,
            },
            Skill {
                name: "Node.js".to_string(),
                category: "Back-End".to_string(),
                level: 70,
            },
            Skill {
                name: "Express".to_string(),
                category: "Back-End".to_string(),
                level: 65,
            },
        ];
        sections.testimonials.title = "What Others Say".to_string();
        sections.testimonials.items = vec![
            Testimonial {
                author: "Jane Smith".to_string(),
                message: "Delivered the project on time and exceeded our expectations. \
                          Highly recommend!"
                    .to_string(),
                image: String::new(),
            },
            Testimonial {
                author: "Mark Davis".to_string(),
                message: "The best developer we've worked with. Extremely professional, \
                          creative, and reliable."
                    .to_string(),
                image: String::new(),
            },
        ];
        sections.contact.title = "Get in Touch".to_string();

        PortfolioState {
            profile: Profile::default(),
            sections,
            settings: Settings::default(),
            active_section: SectionKind::Hero,
            selected_template: None,
        }
    }
}

impl PortfolioState {
    /// Apply one update operation, producing a structurally new state so
    /// consumers can rely on shallow-equality change detection. The current
    /// state is never mutated in place.
    pub fn apply(&self, update: &Update) -> PortfolioState {
        let mut next = self.clone();
        match update {
            Update::SetActiveSection { section } => {
                next.active_section = *section;
            }
            Update::UpdateProfile { data } => {
                next.profile.merge(data);
            }
            Update::UpdateSectionContent { section, data } => {
                next.sections.merge_content(*section, data);
            }
            Update::UpdateListItem {
                section,
                index,
                field,
                value,
            } => {
                next.sections.set_item_field(*section, *index, field, value);
            }
            Update::AddListItem { section } => {
                next.sections.add_item(*section);
            }
            Update::RemoveListItem { section, index } => {
                next.sections.remove_item(*section, *index);
            }
            Update::UpdateColor { key, value } => {
                next.settings.set_color(key, value);
            }
            Update::UpdateFontFamily { value } => {
                next.settings.font_family = value.clone();
            }
            Update::UpdateFontSize { value } => {
                next.settings.font_size = *value;
            }
            Update::UpdateTheme { value } => {
                next.settings.theme = *value;
            }
            Update::SelectTemplate { template } => {
                next.selected_template = Some(template.clone());
            }
            Update::ResetCustomizations => {
                next.settings = Settings::default();
            }
        }
        next
    }
}
