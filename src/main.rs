#[macro_use]
extern crate rocket;

use std::sync::Arc;
use std::time::Duration;

use rocket::response::content::RawHtml;

mod ai;
mod boot;
mod db;
mod debounce;
mod designs;
mod models;
mod render;
mod resolve;
mod routes;
mod store;
mod tests;

use ai::{SuggestClient, SuggestionBoard};
use store::{SqliteStorage, StateStore};

/// Rapid edits within this window collapse into one storage write.
const PERSIST_DEBOUNCE: Duration = Duration::from_millis(300);

#[catch(404)]
fn not_found() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>404</h1><p>Page not found.</p><a href='/'>← Preview</a></body></html>".to_string())
}

#[catch(500)]
fn server_error() -> RawHtml<String> {
    RawHtml("<html><body style='font-family:sans-serif;text-align:center;padding:80px'><h1>500</h1><p>Internal server error.</p><a href='/'>← Preview</a></body></html>".to_string())
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    // Boot check — verify/create directories, report missing configuration
    boot::run();

    let pool = db::init_pool().expect("Failed to initialize database pool");
    db::run_migrations(&pool).expect("Failed to run database migrations");

    let storage = Arc::new(SqliteStorage::new(pool));
    let store = Arc::new(StateStore::load(storage, PERSIST_DEBOUNCE));

    rocket::build()
        .manage(store)
        .manage(SuggestClient::from_env())
        .manage(SuggestionBoard::new())
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .mount("/ai", routes::ai::routes())
        .register("/", catchers![not_found, server_error])
}
