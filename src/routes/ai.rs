use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::ai::{self, canned, prompts, SuggestClient, SuggestionBoard};
use crate::models::section::SectionKind;

// ── Request types ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SuggestBioRequest {
    pub profession: String,
    pub current_bio: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestProjectRequest {
    pub title: String,
    pub current_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestStructureRequest {
    pub profession: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestSectionRequest {
    pub section: SectionKind,
    #[serde(default)]
    pub current: String,
}

// ── Helpers ───────────────────────────────────────────

/// Run one generation request against the board. Endpoint failures degrade
/// to the canned table for the fallback section; a stale response (a newer
/// request finished first) is reported but not applied.
fn generate_into_board(
    client: &SuggestClient,
    board: &SuggestionBoard,
    prompt: &str,
    sequences: u32,
    fallback: SectionKind,
) -> Json<Value> {
    let seq = board.begin();

    if !client.is_configured() {
        let suggestions = vec![canned::for_section(fallback).to_string()];
        let applied = board.complete(seq, suggestions.clone());
        return Json(json!({
            "ok": true,
            "seq": seq,
            "applied": applied,
            "source": "canned",
            "suggestions": suggestions,
        }));
    }

    let (suggestions, source) = match client.generate(prompt, sequences) {
        Ok(list) if !list.is_empty() => (list, "model"),
        Ok(_) => (vec![canned::for_section(fallback).to_string()], "canned"),
        Err(e) => {
            log::warn!("suggestion fetch failed: {}", e);
            (vec![canned::for_section(fallback).to_string()], "canned")
        }
    };

    let applied = board.complete(seq, suggestions.clone());
    Json(json!({
        "ok": true,
        "seq": seq,
        "applied": applied,
        "source": source,
        "suggestions": suggestions,
    }))
}

// ── Routes ────────────────────────────────────────────

#[post("/suggest-bio", format = "json", data = "<body>")]
pub fn suggest_bio(
    client: &State<SuggestClient>,
    board: &State<SuggestionBoard>,
    body: Json<SuggestBioRequest>,
) -> Json<Value> {
    let prompt = prompts::bio(&body.profession, body.current_bio.as_deref().unwrap_or(""));
    generate_into_board(client, board, &prompt, 3, SectionKind::About)
}

#[post("/suggest-project", format = "json", data = "<body>")]
pub fn suggest_project(
    client: &State<SuggestClient>,
    board: &State<SuggestionBoard>,
    body: Json<SuggestProjectRequest>,
) -> Json<Value> {
    let prompt = prompts::project_description(
        &body.title,
        body.current_description.as_deref().unwrap_or(""),
    );
    generate_into_board(client, board, &prompt, 3, SectionKind::Projects)
}

/// Suggest a portfolio structure: a list of section names derived from the
/// profession. The raw generation is split on commas.
#[post("/suggest-structure", format = "json", data = "<body>")]
pub fn suggest_structure(
    client: &State<SuggestClient>,
    body: Json<SuggestStructureRequest>,
) -> Json<Value> {
    let prompt = prompts::structure(&body.profession);
    match client.generate(&prompt, 1) {
        Ok(list) => {
            let sections = list
                .first()
                .map(|text| ai::parse_structure(text))
                .unwrap_or_default();
            // Suggested names the renderer actually has a section for.
            let supported: Vec<&str> = sections
                .iter()
                .filter_map(|s| SectionKind::from_key(s))
                .map(|k| k.key())
                .collect();
            Json(json!({ "ok": true, "sections": sections, "supported": supported }))
        }
        Err(e) => {
            log::warn!("structure suggestion failed: {}", e);
            Json(json!({
                "ok": true,
                "sections": Vec::<String>::new(),
                "supported": Vec::<String>::new(),
            }))
        }
    }
}

/// Generic per-section content suggestion, degrading to the canned line
/// for that section.
#[post("/suggest-section", format = "json", data = "<body>")]
pub fn suggest_section(
    client: &State<SuggestClient>,
    board: &State<SuggestionBoard>,
    body: Json<SuggestSectionRequest>,
) -> Json<Value> {
    let prompt = prompts::section_content(body.section, &body.current);
    generate_into_board(client, board, &prompt, 1, body.section)
}

/// Current contents of the shared suggestion slot.
#[get("/suggestions")]
pub fn suggestions(board: &State<SuggestionBoard>) -> Json<Value> {
    let (seq, suggestions) = board.current();
    Json(json!({ "seq": seq, "suggestions": suggestions }))
}

pub fn routes() -> Vec<Route> {
    routes![
        suggest_bio,
        suggest_project,
        suggest_structure,
        suggest_section,
        suggestions
    ]
}
