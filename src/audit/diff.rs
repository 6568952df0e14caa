//! Field-level change summaries for audit entries

use serde_json::Value;

const MAX_TEXT_CHARS: usize = 40;

/// Summarize which top-level fields changed between two entity snapshots
///
/// Returns `None` when nothing changed. Non-object values are compared as a
/// whole.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes: Vec<String> = old
                .iter()
                .filter_map(|(key, was)| match new.get(key) {
                    Some(now) if now == was => None,
                    Some(now) => Some(format!("{}: {} -> {}", key, render(was), render(now))),
                    None => Some(format!("{}: {} -> (removed)", key, render(was))),
                })
                .collect();

            changes.extend(
                new.iter()
                    .filter(|(key, _)| !old.contains_key(*key))
                    .map(|(key, now)| format!("{}: (added) -> {}", key, render(now))),
            );
            changes
        }
        _ if before == after => Vec::new(),
        _ => vec![format!("{} -> {}", render(before), render(after))],
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_TEXT_CHARS => {
            let head: String = s.chars().take(MAX_TEXT_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
