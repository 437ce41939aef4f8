use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::section::SectionKind;
use super::settings::Theme;
use super::template::Template;

/// The closed vocabulary of state transitions. Every operation is total:
/// missing fields default to empty and out-of-range indices are no-ops, so
/// a dispatched operation never fails validation. The flat enumerable shape
/// makes every transition inspectable and replayable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Update {
    /// Change which section's editor is focused. No effect on rendering.
    SetActiveSection { section: SectionKind },
    /// Shallow-merge fields into the profile.
    UpdateProfile {
        #[serde(default)]
        data: Map<String, Value>,
    },
    /// Shallow-merge fields into one section's payload.
    UpdateSectionContent {
        section: SectionKind,
        #[serde(default)]
        data: Map<String, Value>,
    },
    /// Replace one field of the list item at `index`.
    UpdateListItem {
        section: SectionKind,
        index: usize,
        field: String,
        value: Value,
    },
    /// Append a blank item to a list section.
    AddListItem { section: SectionKind },
    /// Splice out the item at `index`; later items shift down by one.
    RemoveListItem { section: SectionKind, index: usize },
    UpdateColor { key: String, value: String },
    UpdateFontFamily { value: String },
    UpdateFontSize { value: u32 },
    UpdateTheme { value: Theme },
    /// Replace the active template with a copy of the given one.
    SelectTemplate { template: Template },
    /// Restore settings to their defaults. Content is untouched.
    ResetCustomizations,
}
