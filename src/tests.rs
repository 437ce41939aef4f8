#![cfg(test)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde_json::{json, Map, Value};

use crate::ai::{parse_generated, parse_structure, SuggestionBoard};
use crate::db::{run_migrations, DbPool};
use crate::models::section::{Project, SectionKind};
use crate::models::settings::{Settings, Theme};
use crate::models::state::PortfolioState;
use crate::models::template::{SectionStyle, Template};
use crate::models::update::Update;
use crate::render;
use crate::resolve::{resolve, section_style_attr};
use crate::store::{SqliteStorage, StateStore, Storage, STATE_KEY, TEMPLATE_KEY, THEME_KEY};

/// Atomic counter for unique shared-cache DB names so parallel tests don't collide.
static TEST_DB_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Create a fresh in-memory SQLite pool with migrations applied. Uses a
/// named shared-cache in-memory DB so multiple connections see the same data.
fn test_pool() -> DbPool {
    let id = TEST_DB_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    let uri = format!("file:testdb_{}?mode=memory&cache=shared", id);
    let manager = SqliteConnectionManager::file(uri);
    let pool = Pool::builder()
        .max_size(2)
        .build(manager)
        .expect("Failed to create test pool");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

/// In-memory storage that records every write, for debounce assertions.
#[derive(Default)]
struct CountingStorage {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl CountingStorage {
    fn writes_for(&self, key: &str) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    fn preset(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl Storage for CountingStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

// ═══════════════════════════════════════════════════════════
// Storage
// ═══════════════════════════════════════════════════════════

#[test]
fn sqlite_storage_roundtrip() {
    let storage = SqliteStorage::new(test_pool());
    assert_eq!(storage.read("missing"), None);
    storage.write("k", "v1").unwrap();
    assert_eq!(storage.read("k"), Some("v1".to_string()));
    storage.write("k", "v2").unwrap();
    assert_eq!(storage.read("k"), Some("v2".to_string()));
    storage.delete("k").unwrap();
    assert_eq!(storage.read("k"), None);
}

#[test]
fn load_falls_back_on_absent_snapshot() {
    let storage = Arc::new(CountingStorage::default());
    let store = StateStore::load(storage, Duration::from_millis(10));
    assert_eq!(store.snapshot(), PortfolioState::default());
}

#[test]
fn load_falls_back_on_corrupt_snapshot() {
    let storage = Arc::new(CountingStorage::default());
    storage.preset(STATE_KEY, "{not json at all");
    let store = StateStore::load(storage, Duration::from_millis(10));
    // Exactly the hard-coded defaults, no error escapes.
    assert_eq!(store.snapshot().profile.name, "John Doe");
}

#[test]
fn side_keys_survive_a_corrupt_snapshot() {
    let storage = Arc::new(CountingStorage::default());
    storage.preset(STATE_KEY, "{not json at all");
    storage.preset(TEMPLATE_KEY, "creative");
    storage.preset(THEME_KEY, "dark");

    let store = StateStore::load(storage, Duration::from_millis(10));
    let state = store.snapshot();
    assert_eq!(
        state.selected_template.map(|t| t.id),
        Some("creative".to_string())
    );
    assert_eq!(state.settings.theme, Theme::Dark);
}

#[test]
fn debounce_coalesces_rapid_writes() {
    let storage = Arc::new(CountingStorage::default());
    let store = StateStore::load(Arc::clone(&storage) as Arc<dyn Storage>, Duration::from_millis(100));

    store.dispatch(&Update::UpdateFontSize { value: 18 });
    store.dispatch(&Update::UpdateFontSize { value: 20 });

    std::thread::sleep(Duration::from_millis(400));

    let writes = storage.writes_for(STATE_KEY);
    assert_eq!(writes.len(), 1, "burst must collapse into one write");
    let persisted: PortfolioState = serde_json::from_str(&writes[0]).unwrap();
    assert_eq!(persisted.settings.font_size, 20);
}

#[test]
fn persist_writes_side_keys() {
    let storage = Arc::new(CountingStorage::default());
    let store = StateStore::load(Arc::clone(&storage) as Arc<dyn Storage>, Duration::from_millis(20));

    let template = Template::find("creative").unwrap();
    store.dispatch(&Update::SelectTemplate { template });
    store.dispatch(&Update::UpdateTheme { value: Theme::Dark });

    std::thread::sleep(Duration::from_millis(200));

    assert_eq!(storage.read(TEMPLATE_KEY), Some("creative".to_string()));
    assert_eq!(storage.read(THEME_KEY), Some("dark".to_string()));
}

#[test]
fn concurrent_dispatches_never_lose_updates() {
    let storage = Arc::new(CountingStorage::default());
    let store = Arc::new(StateStore::load(
        storage as Arc<dyn Storage>,
        Duration::from_millis(10),
    ));
    store.dispatch(&Update::UpdateSectionContent {
        section: SectionKind::Projects,
        data: obj(&[("items", json!([]))]),
    });

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    store.dispatch(&Update::AddListItem {
                        section: SectionKind::Projects,
                    });
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(store.snapshot().sections.projects.items.len(), 400);
}

#[test]
fn reset_restores_default_snapshot() {
    let storage = Arc::new(CountingStorage::default());
    let store = StateStore::load(storage, Duration::from_millis(10));

    store.dispatch(&Update::UpdateProfile {
        data: obj(&[("name", json!("Someone Else"))]),
    });
    assert_eq!(store.snapshot().profile.name, "Someone Else");

    store.reset();
    assert_eq!(store.snapshot(), PortfolioState::default());
}

// ═══════════════════════════════════════════════════════════
// Update protocol
// ═══════════════════════════════════════════════════════════

#[test]
fn apply_never_mutates_in_place() {
    let state = PortfolioState::default();
    let before = state.clone();
    let next = state.apply(&Update::UpdateFontSize { value: 22 });
    assert_eq!(state, before);
    assert_eq!(next.settings.font_size, 22);
}

#[test]
fn section_merge_is_associative_per_field() {
    let state = PortfolioState::default();

    // Applied one at a time
    let sequential = state
        .apply(&Update::UpdateSectionContent {
            section: SectionKind::Hero,
            data: obj(&[("title", json!("First")), ("body", json!("Alpha"))]),
        })
        .apply(&Update::UpdateSectionContent {
            section: SectionKind::Hero,
            data: obj(&[("title", json!("Second"))]),
        });

    // Applied as one merged map (last write wins per field)
    let merged = state.apply(&Update::UpdateSectionContent {
        section: SectionKind::Hero,
        data: obj(&[("title", json!("Second")), ("body", json!("Alpha"))]),
    });

    assert_eq!(sequential.sections.hero, merged.sections.hero);
}

#[test]
fn section_merge_ignores_unknown_fields() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::UpdateSectionContent {
        section: SectionKind::About,
        data: obj(&[("bogus", json!("x")), ("title", json!("About"))]),
    });
    assert_eq!(next.sections.about.title, "About");
}

#[test]
fn update_profile_merges_nested_social_links() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::UpdateProfile {
        data: obj(&[
            ("bio", json!("I make websites.")),
            ("social", json!({ "github": "https://github.com/johndoe" })),
        ]),
    });
    assert_eq!(next.profile.bio, "I make websites.");
    assert_eq!(next.profile.social.github, "https://github.com/johndoe");
    // Untouched fields survive the merge
    assert_eq!(next.profile.name, "John Doe");
}

#[test]
fn remove_list_item_shifts_later_indices() {
    let state = PortfolioState::default();
    let titles: Vec<String> = state
        .sections
        .projects
        .items
        .iter()
        .map(|p| p.title.clone())
        .collect();
    assert_eq!(titles.len(), 3);

    let next = state.apply(&Update::RemoveListItem {
        section: SectionKind::Projects,
        index: 0,
    });

    let remaining = &next.sections.projects.items;
    assert_eq!(remaining.len(), 2);
    // The removed item's values are gone and everything shifted down one.
    assert!(remaining.iter().all(|p| p.title != titles[0]));
    assert_eq!(remaining[0].title, titles[1]);
    assert_eq!(remaining[1].title, titles[2]);
}

#[test]
fn remove_list_item_out_of_bounds_is_noop() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::RemoveListItem {
        section: SectionKind::Projects,
        index: 99,
    });
    assert_eq!(next.sections.projects.items.len(), 3);
}

#[test]
fn add_list_item_on_empty_list_is_one_blank_item() {
    let state = PortfolioState::default();
    let emptied = state.apply(&Update::UpdateSectionContent {
        section: SectionKind::Projects,
        data: obj(&[("items", json!([]))]),
    });
    assert!(emptied.sections.projects.items.is_empty());

    let next = emptied.apply(&Update::AddListItem {
        section: SectionKind::Projects,
    });
    assert_eq!(next.sections.projects.items.len(), 1);
    assert_eq!(next.sections.projects.items[0], Project::default());
}

#[test]
fn update_list_item_replaces_one_field() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::UpdateListItem {
        section: SectionKind::Skills,
        index: 1,
        field: "level".to_string(),
        value: json!(95),
    });
    assert_eq!(next.sections.skills.items[1].level, 95);
    assert_eq!(next.sections.skills.items[1].name, "Bootstrap");
}

#[test]
fn update_list_item_out_of_bounds_is_noop() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::UpdateListItem {
        section: SectionKind::Skills,
        index: 42,
        field: "name".to_string(),
        value: json!("Nope"),
    });
    assert_eq!(next, state);
}

#[test]
fn update_list_item_on_text_section_is_noop() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::UpdateListItem {
        section: SectionKind::Hero,
        index: 0,
        field: "title".to_string(),
        value: json!("x"),
    });
    assert_eq!(next, state);
}

#[test]
fn skill_level_accepts_numeric_strings_and_clamps() {
    let state = PortfolioState::default();
    let next = state
        .apply(&Update::UpdateListItem {
            section: SectionKind::Skills,
            index: 0,
            field: "level".to_string(),
            value: json!("85"),
        })
        .apply(&Update::UpdateListItem {
            section: SectionKind::Skills,
            index: 1,
            field: "level".to_string(),
            value: json!(400),
        });
    assert_eq!(next.sections.skills.items[0].level, 85);
    assert_eq!(next.sections.skills.items[1].level, 100);
}

#[test]
fn update_color_unknown_key_is_noop() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::UpdateColor {
        key: "chartreuse".to_string(),
        value: "#bada55".to_string(),
    });
    assert_eq!(next.settings, state.settings);
}

#[test]
fn reset_customizations_keeps_content() {
    let state = PortfolioState::default()
        .apply(&Update::UpdateColor {
            key: "primary".to_string(),
            value: "#123456".to_string(),
        })
        .apply(&Update::UpdateFontFamily {
            value: "Georgia".to_string(),
        })
        .apply(&Update::UpdateSectionContent {
            section: SectionKind::Hero,
            data: obj(&[("title", json!("Hello"))]),
        });

    let next = state.apply(&Update::ResetCustomizations);
    assert_eq!(next.settings, Settings::default());
    assert_eq!(next.sections.hero.title, "Hello");
}

#[test]
fn set_active_section_does_not_touch_render_inputs() {
    let state = PortfolioState::default();
    let next = state.apply(&Update::SetActiveSection {
        section: SectionKind::Contact,
    });
    assert_eq!(next.active_section, SectionKind::Contact);
    assert_eq!(render::render_page(&next), render::render_page(&state));
}

#[test]
fn update_op_wire_format() {
    let raw = r#"{"op":"update_list_item","section":"projects","index":2,"field":"title","value":"New"}"#;
    let op: Update = serde_json::from_str(raw).unwrap();
    match op {
        Update::UpdateListItem {
            section,
            index,
            ref field,
            ..
        } => {
            assert_eq!(section, SectionKind::Projects);
            assert_eq!(index, 2);
            assert_eq!(field, "title");
        }
        _ => panic!("wrong variant"),
    }

    // Ops survive a serialize/deserialize round trip for replayability.
    let op = Update::ResetCustomizations;
    let encoded = serde_json::to_string(&op).unwrap();
    assert!(encoded.contains("reset_customizations"));
    let _: Update = serde_json::from_str(&encoded).unwrap();
}

// ═══════════════════════════════════════════════════════════
// Template resolution
// ═══════════════════════════════════════════════════════════

#[test]
fn resolve_without_template_is_pure_defaults() {
    let config = resolve(None, &Settings::default());
    assert_eq!(config.font, "Arial, sans-serif");
    assert_eq!(config.primary_color, "#007bff");
    assert_eq!(config.section_order, SectionKind::ALL.to_vec());
    assert!(config.styles.is_empty());
    assert_eq!(config.text_color, "#000000");
}

#[test]
fn resolved_order_is_default_precedence_union() {
    // Professional reorders contact before testimonials; the base ordering
    // wins because the union keeps first-seen positions.
    let professional = Template::find("professional").unwrap();
    let config = resolve(Some(&professional), &Settings::default());
    assert_eq!(config.section_order, SectionKind::ALL.to_vec());
    assert_eq!(config.font, "Roboto, sans-serif");
    assert_eq!(config.primary_color, "#333333");
}

#[test]
fn resolved_order_is_superset_and_duplicate_free() {
    let base_order = Template::base().section_order;
    for template in Template::predefined() {
        let config = resolve(Some(&template), &Settings::default());
        // Superset, order-preserving from the base
        let positions: Vec<usize> = base_order
            .iter()
            .map(|k| config.section_order.iter().position(|c| c == k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        // No duplicates
        let mut seen = Vec::new();
        for kind in &config.section_order {
            assert!(!seen.contains(kind), "duplicate section {:?}", kind);
            seen.push(*kind);
        }
    }
}

#[test]
fn duplicate_order_entries_in_template_are_collapsed() {
    let mut template = Template::find("minimal").unwrap();
    template.section_order = vec![SectionKind::Hero, SectionKind::Hero, SectionKind::Contact];
    let config = resolve(Some(&template), &Settings::default());
    let hero_count = config
        .section_order
        .iter()
        .filter(|k| **k == SectionKind::Hero)
        .count();
    assert_eq!(hero_count, 1);
}

#[test]
fn settings_win_over_template_fields() {
    let creative = Template::find("creative").unwrap();
    let mut settings = Settings::default();
    settings.font_family = "Courier New".to_string();
    settings.text_color = "#222222".to_string();
    settings.primary_color = "#00ff00".to_string();

    let config = resolve(Some(&creative), &settings);
    assert_eq!(config.font, "Courier New");
    assert_eq!(config.text_color, "#222222");
    assert_eq!(config.primary_color, "#00ff00");
    // Fields settings leave alone come from the template
    assert_eq!(config.background_color, "#fdfdfd");
}

#[test]
fn missing_styles_map_resolves_to_empty() {
    let mut template = Template::find("minimal").unwrap();
    template.styles.clear();
    let config = resolve(Some(&template), &Settings::default());
    assert!(config.styles.is_empty());
    assert_eq!(section_style_attr(&config, SectionKind::About), "");
}

#[test]
fn resolve_round_trips_through_serialization() {
    let mut state = PortfolioState::default();
    state.selected_template = Template::find("professional");
    state.settings.font_family = "Georgia".to_string();
    state.settings.theme = Theme::Dark;

    let before = resolve(state.selected_template.as_ref(), &state.settings);

    let raw = serde_json::to_string(&state).unwrap();
    let restored: PortfolioState = serde_json::from_str(&raw).unwrap();
    let after = resolve(restored.selected_template.as_ref(), &restored.settings);

    assert_eq!(before, after);
}

#[test]
fn selected_template_is_a_copy_not_a_live_link() {
    let state = PortfolioState::default();
    let mut template = Template::find("minimal").unwrap();
    let next = state.apply(&Update::SelectTemplate {
        template: template.clone(),
    });

    // Mutating the caller's template after selection changes nothing.
    template.primary_color = "#000000".to_string();
    assert_eq!(
        next.selected_template.as_ref().unwrap().primary_color,
        "#007bff"
    );
}

#[test]
fn custom_template_copies_styling_and_slugs_its_name() {
    let source = Template::find("creative").unwrap();
    let custom = Template::custom("My Brand!", "/uploads/brand.png", &source);
    assert_eq!(custom.id, "custom-my-brand");
    assert_eq!(custom.name, "My Brand!");
    assert_eq!(custom.image, "/uploads/brand.png");
    assert_eq!(custom.font, source.font);
    assert_eq!(custom.styles, source.styles);
}

// ═══════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════

#[test]
fn render_includes_sections_in_resolved_order() {
    let mut state = PortfolioState::default();
    state.selected_template = Template::find("professional");
    let html = render::render_page(&state);

    let mut last = 0;
    for kind in SectionKind::ALL {
        let marker = format!("id=\"{}\"", kind.key());
        let pos = html.find(&marker).unwrap_or_else(|| panic!("missing {}", marker));
        assert!(pos > last, "{} out of order", kind.key());
        last = pos;
    }
}

#[test]
fn empty_lists_render_placeholders_not_blank_regions() {
    let mut state = PortfolioState::default();
    state.sections.projects.items.clear();
    state.sections.skills.items.clear();
    state.sections.testimonials.items.clear();

    let html = render::render_page(&state);
    assert!(html.contains("No projects yet."));
    assert!(html.contains("No skills added yet."));
    assert!(html.contains("No testimonials yet."));
}

#[test]
fn render_escapes_user_content() {
    let mut state = PortfolioState::default();
    state.profile.name = "<script>alert(1)</script>".to_string();
    let html = render::render_page(&state);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn style_values_cannot_escape_their_css_context() {
    let mut state = PortfolioState::default();
    state.settings.font_family = "</style><script>alert(1)</script>".to_string();
    state.settings.primary_color = "#111\" onmouseover=\"alert(1)".to_string();
    let html = render::render_page(&state);
    assert!(!html.contains("</style><script>"));
    assert!(!html.contains("onmouseover=\""));

    let mut template = Template::find("minimal").unwrap();
    template
        .styles
        .insert(SectionKind::About, SectionStyle::bg("\"><script>x"));
    let config = resolve(Some(&template), &Settings::default());
    let attr = section_style_attr(&config, SectionKind::About);
    assert!(!attr.contains('<'));
    // Only the delimiting quotes of the attribute itself survive.
    assert_eq!(attr.matches('"').count(), 2);
}

#[test]
fn render_reflects_theme_and_font_size() {
    let state = PortfolioState::default()
        .apply(&Update::UpdateTheme { value: Theme::Dark })
        .apply(&Update::UpdateFontSize { value: 20 });
    let html = render::render_page(&state);
    assert!(html.contains("data-theme=\"dark\""));
    assert!(html.contains("--font-size-body: 20px"));
}

#[test]
fn section_style_attr_renders_inline_style() {
    let minimal = Template::find("minimal").unwrap();
    let config = resolve(Some(&minimal), &Settings::default());
    let attr = section_style_attr(&config, SectionKind::Projects);
    assert_eq!(attr, " style=\"background-color:#f8f9fa\"");
}

// ═══════════════════════════════════════════════════════════
// AI suggestions
// ═══════════════════════════════════════════════════════════

#[test]
fn parse_generated_extracts_texts() {
    let body = json!([
        { "generated_text": "First suggestion." },
        { "generated_text": "Second suggestion." },
        { "unrelated": true }
    ]);
    assert_eq!(
        parse_generated(&body),
        vec!["First suggestion.".to_string(), "Second suggestion.".to_string()]
    );
}

#[test]
fn parse_generated_malformed_body_is_empty() {
    assert!(parse_generated(&json!({ "error": "rate limited" })).is_empty());
    assert!(parse_generated(&json!("just a string")).is_empty());
}

#[test]
fn parse_structure_splits_and_trims() {
    assert_eq!(
        parse_structure("About, Projects , Skills,,Education"),
        vec!["About", "Projects", "Skills", "Education"]
    );
}

#[test]
fn unconfigured_client_errors_without_going_remote() {
    let client = crate::ai::SuggestClient::with_key("http://localhost:1", "");
    assert!(!client.is_configured());
    // No key means an immediate error, not a network attempt.
    assert!(client.generate("prompt", 3).is_err());
}

#[test]
fn suggestion_board_discards_stale_responses() {
    let board = SuggestionBoard::new();
    let first = board.begin();
    let second = board.begin();

    // The newer request resolves first and wins the slot.
    assert!(board.complete(second, vec!["new".to_string()]));
    // The older response arrives late and is discarded.
    assert!(!board.complete(first, vec!["old".to_string()]));

    let (seq, suggestions) = board.current();
    assert_eq!(seq, second);
    assert_eq!(suggestions, vec!["new".to_string()]);
}
