use std::sync::Arc;

use rocket::serde::json::Json;
use rocket::{Route, State};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::state::PortfolioState;
use crate::models::template::Template;
use crate::models::update::Update;
use crate::store::StateStore;

// ── State ─────────────────────────────────────────────

#[get("/state")]
pub fn state(store: &State<Arc<StateStore>>) -> Json<PortfolioState> {
    Json(store.snapshot())
}

/// Dispatch one update operation and return the resulting state.
#[post("/update", format = "json", data = "<body>")]
pub fn update(store: &State<Arc<StateStore>>, body: Json<Update>) -> Json<PortfolioState> {
    Json(store.dispatch(&body))
}

/// Restore the default snapshot, discarding all content and settings.
#[post("/reset")]
pub fn reset(store: &State<Arc<StateStore>>) -> Json<PortfolioState> {
    Json(store.reset())
}

// ── Templates ─────────────────────────────────────────

#[get("/templates")]
pub fn templates() -> Json<Vec<Template>> {
    Json(Template::predefined())
}

/// Select a predefined template by id. Unknown ids leave the state alone.
#[post("/template/<id>")]
pub fn select_template(store: &State<Arc<StateStore>>, id: &str) -> Json<Value> {
    match Template::find(id) {
        Some(template) => {
            let state = store.dispatch(&Update::SelectTemplate { template });
            Json(json!({ "ok": true, "state": state }))
        }
        None => Json(json!({ "ok": false, "error": format!("unknown template: {}", id) })),
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomTemplateForm {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub source_id: String,
}

/// Create a custom template (name + thumbnail, styling copied from an
/// existing template) and select it.
#[post("/template/custom", format = "json", data = "<body>")]
pub fn custom_template(
    store: &State<Arc<StateStore>>,
    body: Json<CustomTemplateForm>,
) -> Json<Value> {
    let source = Template::find(&body.source_id).unwrap_or_else(Template::base);
    let template = Template::custom(&body.name, &body.image, &source);
    let state = store.dispatch(&Update::SelectTemplate { template });
    Json(json!({ "ok": true, "state": state }))
}

pub fn routes() -> Vec<Route> {
    routes![state, update, reset, templates, select_template, custom_template]
}
