use std::fs;
use std::path::Path;
use std::process;

use log::{error, info, warn};

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &["website", "website/db"];

/// Run all boot checks. Creates missing directories, reports missing
/// configuration, and aborts only when the database directory is unusable.
pub fn run() {
    info!("Folio boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Database directory writable ─────────────────
    let db_dir = Path::new("website/db");
    if db_dir.exists() {
        let test_file = db_dir.join(".write_test");
        match fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = fs::remove_file(&test_file);
            }
            Err(e) => {
                error!("  Database directory not writable: {}", e);
                errors += 1;
            }
        }
    }

    // ── 3. AI configuration ────────────────────────────
    // Missing key only disables suggestions; the builder still runs.
    if std::env::var("FOLIO_AI_API_KEY").unwrap_or_default().is_empty() {
        warn!("  FOLIO_AI_API_KEY not set (AI suggestions will use canned text)");
        warnings += 1;
    }

    // ── Summary ────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!("Boot check passed with {} warning(s).", warnings);
    } else {
        info!("Boot check passed. All systems go.");
    }
}
