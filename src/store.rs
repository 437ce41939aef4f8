use std::sync::{Arc, RwLock};
use std::time::Duration;

use rusqlite::params;

use crate::db::DbPool;
use crate::debounce::Debouncer;
use crate::models::settings::Theme;
use crate::models::state::PortfolioState;
use crate::models::template::Template;
use crate::models::update::Update;

/// Key holding the full JSON state snapshot.
pub const STATE_KEY: &str = "portfolio_state";
/// Key holding the id of the last-selected template.
pub const TEMPLATE_KEY: &str = "selected_template_id";
/// Key holding the light/dark theme flag.
pub const THEME_KEY: &str = "theme";

/// Flat key-value persistence. One implementation over SQLite; tests swap
/// in an in-memory map to count writes.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
    fn delete(&self, key: &str) -> Result<(), String>;
}

pub struct SqliteStorage {
    pool: DbPool,
}

impl SqliteStorage {
    pub fn new(pool: DbPool) -> Self {
        SqliteStorage { pool }
    }
}

impl Storage for SqliteStorage {
    fn read(&self, key: &str) -> Option<String> {
        let conn = self.pool.get().ok()?;
        conn.query_row(
            "SELECT value FROM storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )
        .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), String> {
        let conn = self.pool.get().map_err(|e| e.to_string())?;
        conn.execute("DELETE FROM storage WHERE key = ?1", params![key])
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// The single mutation entry point for portfolio state. Constructed once at
/// startup and handed to every consumer through Rocket's managed state —
/// no hidden singletons.
///
/// Dispatching applies the reducer, swaps in the new state, and schedules a
/// debounced persist. Storage failures are logged and swallowed: the
/// in-memory state stays authoritative for the session and the next edit
/// retries the write.
pub struct StateStore {
    state: RwLock<PortfolioState>,
    debouncer: Debouncer<PortfolioState>,
}

impl StateStore {
    /// Read the persisted snapshot, falling back to the default snapshot if
    /// it is absent or unreadable. A parse failure is logged, not fatal; the
    /// independently stored template id and theme flag are recovered even
    /// when the snapshot itself is lost.
    pub fn load(storage: Arc<dyn Storage>, debounce_delay: Duration) -> Self {
        let state = match storage.read(STATE_KEY) {
            Some(raw) => match serde_json::from_str::<PortfolioState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("stored portfolio state unreadable, using defaults: {}", e);
                    recover_from_side_keys(&*storage)
                }
            },
            None => recover_from_side_keys(&*storage),
        };

        let debouncer = Debouncer::new(debounce_delay, move |state: PortfolioState| {
            persist(&*storage, &state);
        });

        StateStore {
            state: RwLock::new(state),
            debouncer,
        }
    }

    pub fn snapshot(&self) -> PortfolioState {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Apply one update, returning the new state. The write guard is held
    /// across the whole read-apply-swap so concurrent dispatches serialize
    /// instead of clobbering each other's snapshot.
    pub fn dispatch(&self, update: &Update) -> PortfolioState {
        let next = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            let next = state.apply(update);
            *state = next.clone();
            next
        };
        self.debouncer.call(next.clone());
        next
    }

    /// Restore the hard-coded default snapshot. The only way portfolio
    /// content is ever destroyed.
    pub fn reset(&self) -> PortfolioState {
        let fresh = PortfolioState::default();
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = fresh.clone();
        self.debouncer.call(fresh.clone());
        fresh
    }
}

/// Rebuild a snapshot from the separately persisted template id and theme
/// flag. The side keys survive a corrupt or missing snapshot because each
/// one is written on its own.
fn recover_from_side_keys(storage: &dyn Storage) -> PortfolioState {
    let mut state = PortfolioState::default();

    if let Some(id) = storage.read(TEMPLATE_KEY) {
        state.selected_template = Template::find(&id);
    }
    if let Some(key) = storage.read(THEME_KEY) {
        if let Some(theme) = Theme::from_key(&key) {
            state.settings.theme = theme;
        }
    }
    state
}

/// Serialize and write the snapshot plus its two side keys. Each failure is
/// logged independently; none propagates.
fn persist(storage: &dyn Storage, state: &PortfolioState) {
    match serde_json::to_string(state) {
        Ok(raw) => {
            if let Err(e) = storage.write(STATE_KEY, &raw) {
                log::error!("failed to persist portfolio state: {}", e);
            }
        }
        Err(e) => log::error!("failed to serialize portfolio state: {}", e),
    }

    let template_id = state
        .selected_template
        .as_ref()
        .map(|t| t.id.as_str())
        .unwrap_or("");
    if let Err(e) = storage.write(TEMPLATE_KEY, template_id) {
        log::error!("failed to persist selected template id: {}", e);
    }

    if let Err(e) = storage.write(THEME_KEY, state.settings.theme.key()) {
        log::error!("failed to persist theme flag: {}", e);
    }
}
