// Bookmark Keeper repositories
// Each manager owns CRUD over one of the stored lists.

pub mod bookmark_manager;
pub mod category_manager;

use uuid::Uuid;

/// Returns the current UNIX timestamp in milliseconds.
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generates `<prefix>_<millis>_<8 random hex chars>`.
pub(crate) fn generate_id(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, now_millis(), &random[..8])
}
