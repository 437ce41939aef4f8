use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed set of portfolio sections. Every renderer and editor panel
/// matches exhaustively on this, so adding a variant is a compile-time
/// checklist rather than a silent "render nothing" fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    About,
    Projects,
    Skills,
    Testimonials,
    Contact,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Hero,
        SectionKind::About,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::Testimonials,
        SectionKind::Contact,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Hero => "hero",
            SectionKind::About => "about",
            SectionKind::Projects => "projects",
            SectionKind::Skills => "skills",
            SectionKind::Testimonials => "testimonials",
            SectionKind::Contact => "contact",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "hero" => Some(SectionKind::Hero),
            "about" => Some(SectionKind::About),
            "projects" => Some(SectionKind::Projects),
            "skills" => Some(SectionKind::Skills),
            "testimonials" => Some(SectionKind::Testimonials),
            "contact" => Some(SectionKind::Contact),
            _ => None,
        }
    }
}

// ── Item types ────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    pub category: String,
    pub level: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub author: String,
    pub message: String,
    pub image: String,
}

// ── Section payloads ──────────────────────────────────

/// Free-text section payload (hero, about, contact).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSection {
    pub title: String,
    pub body: String,
}

/// List section payload (projects, skills, testimonials).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSection<T> {
    pub title: String,
    pub items: Vec<T>,
}

/// All six sections of a portfolio. The struct shape (rather than a string
/// map) keeps section identity unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub hero: TextSection,
    pub about: TextSection,
    pub projects: ListSection<Project>,
    pub skills: ListSection<Skill>,
    pub testimonials: ListSection<Testimonial>,
    pub contact: TextSection,
}

impl Sections {
    /// Shallow-merge a partial field map into one section. Unknown fields
    /// are ignored; list sections additionally accept a wholesale `items`
    /// replacement. Total: bad input never fails, it merges nothing.
    pub fn merge_content(&mut self, kind: SectionKind, data: &Map<String, Value>) {
        match kind {
            SectionKind::Hero => merge_text(&mut self.hero, data),
            SectionKind::About => merge_text(&mut self.about, data),
            SectionKind::Contact => merge_text(&mut self.contact, data),
            SectionKind::Projects => merge_list(&mut self.projects, data),
            SectionKind::Skills => merge_list(&mut self.skills, data),
            SectionKind::Testimonials => merge_list(&mut self.testimonials, data),
        }
    }

    /// Replace one field of the item at `index`. Out-of-bounds index or a
    /// non-list section is a no-op.
    pub fn set_item_field(&mut self, kind: SectionKind, index: usize, field: &str, value: &Value) {
        match kind {
            SectionKind::Projects => {
                if let Some(item) = self.projects.items.get_mut(index) {
                    match field {
                        "title" => set_string(&mut item.title, value),
                        "description" => set_string(&mut item.description, value),
                        "image" => set_string(&mut item.image, value),
                        _ => {}
                    }
                }
            }
            SectionKind::Skills => {
                if let Some(item) = self.skills.items.get_mut(index) {
                    match field {
                        "name" => set_string(&mut item.name, value),
                        "category" => set_string(&mut item.category, value),
                        "level" => set_level(&mut item.level, value),
                        _ => {}
                    }
                }
            }
            SectionKind::Testimonials => {
                if let Some(item) = self.testimonials.items.get_mut(index) {
                    match field {
                        "author" => set_string(&mut item.author, value),
                        "message" => set_string(&mut item.message, value),
                        "image" => set_string(&mut item.image, value),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// Append a blank item (all fields empty) to a list section.
    pub fn add_item(&mut self, kind: SectionKind) {
        match kind {
            SectionKind::Projects => self.projects.items.push(Project::default()),
            SectionKind::Skills => self.skills.items.push(Skill::default()),
            SectionKind::Testimonials => self.testimonials.items.push(Testimonial::default()),
            _ => {}
        }
    }

    /// Splice out the item at `index`; later items shift down by one.
    /// Out-of-bounds is a no-op.
    pub fn remove_item(&mut self, kind: SectionKind, index: usize) {
        match kind {
            SectionKind::Projects => {
                if index < self.projects.items.len() {
                    self.projects.items.remove(index);
                }
            }
            SectionKind::Skills => {
                if index < self.skills.items.len() {
                    self.skills.items.remove(index);
                }
            }
            SectionKind::Testimonials => {
                if index < self.testimonials.items.len() {
                    self.testimonials.items.remove(index);
                }
            }
            _ => {}
        }
    }
}

fn merge_text(section: &mut TextSection, data: &Map<String, Value>) {
    if let Some(v) = data.get("title") {
        set_string(&mut section.title, v);
    }
    if let Some(v) = data.get("body") {
        set_string(&mut section.body, v);
    }
}

fn merge_list<T: serde::de::DeserializeOwned>(
    section: &mut ListSection<T>,
    data: &Map<String, Value>,
) {
    if let Some(v) = data.get("title") {
        set_string(&mut section.title, v);
    }
    if let Some(v) = data.get("items") {
        if let Ok(items) = serde_json::from_value::<Vec<T>>(v.clone()) {
            section.items = items;
        }
    }
}

fn set_string(target: &mut String, value: &Value) {
    if let Some(s) = value.as_str() {
        *target = s.to_string();
    }
}

/// Accept a number or a numeric string, clamped to 0–100.
fn set_level(target: &mut u32, value: &Value) {
    let parsed = value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()));
    if let Some(n) = parsed {
        *target = n.min(100) as u32;
    }
}
