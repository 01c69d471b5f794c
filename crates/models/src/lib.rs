pub mod blog;
pub mod user;

use surrealdb::sql::{Id, Thing};

/// Extract the numeric key from a record id.
///
/// Records are always created with numeric keys (see `generate_id` on the
/// model types), so the fallback parse only exists for ids that were
/// written by hand into the database.
pub fn record_number(id: &Thing) -> i64 {
    match &id.id {
        Id::Number(n) => *n,
        other => other.to_string().parse().unwrap_or_default(),
    }
}
