//! Command output rendering.
//!
//! Every handler hands its response to [`output`] as a serializable value;
//! rendering goes through `serde_json::Value` so the plain format needs no
//! per-entity code. JSON mode prints the value pretty-printed as-is.

use serde::Serialize;
use serde_json::Value;

/// Print a serializable response, as JSON or plain text.
pub fn output<T: Serialize>(value: &T, json: bool) -> anyhow::Result<()> {
    println!("{}", render(value, json)?);
    Ok(())
}

/// Render a serializable response to a string.
pub fn render<T: Serialize>(value: &T, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(value)?);
    }
    let value = serde_json::to_value(value)?;
    Ok(render_plain(&value))
}

/// Print the outcome of a lookup that may not match anything.
pub fn output_lookup<T: Serialize>(found: Option<&T>, json: bool) -> anyhow::Result<()> {
    match found {
        Some(value) => output(value, json),
        None if json => output(&Value::Null, true),
        None => {
            println!("(not found)");
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct DeleteOutcome {
    deleted: bool,
}

/// Print a delete outcome. `false` covers both "nothing matched" and
/// "still referenced elsewhere".
pub fn output_delete(deleted: bool, json: bool) -> anyhow::Result<()> {
    if json {
        return output(&DeleteOutcome { deleted }, true);
    }
    if deleted {
        println!("deleted");
    } else {
        println!("not deleted (no such row, or still referenced)");
    }
    Ok(())
}

fn render_plain(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) => items
            .iter()
            .map(render_line)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => {
            let mut lines = Vec::with_capacity(map.len());
            for (key, value) in map {
                match value {
                    Value::Array(items) => {
                        lines.push(format!("{key}:"));
                        for item in items {
                            lines.push(format!("  {}", render_line(item)));
                        }
                    }
                    other => lines.push(format!("{key}: {}", render_line(other))),
                }
            }
            lines.join("\n")
        }
        other => render_scalar(other),
    }
}

/// One row on one line: objects become `key=value` pairs with unset
/// optional fields omitted.
fn render_line(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| format!("{k}={}", render_scalar(v)))
            .collect::<Vec<_>>()
            .join("  "),
        other => render_scalar(other),
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::from("(none)"),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
