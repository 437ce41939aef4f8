use std::sync::Arc;

use rocket::response::content::RawHtml;
use rocket::{Route, State};

use crate::render;
use crate::store::StateStore;

/// The rendered portfolio preview. Re-rendered in full on every request
/// from the current in-memory state.
#[get("/")]
pub fn preview(store: &State<Arc<StateStore>>) -> RawHtml<String> {
    RawHtml(render::render_page(&store.snapshot()))
}

pub fn routes() -> Vec<Route> {
    routes![preview]
}
