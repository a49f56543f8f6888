//! JSON form of the todo collection as kept in the persistence slot.
//!
//! Decoding is tolerant per record: the top level has to be an array, but
//! each element is validated on its own and dropped if it does not describe
//! a usable todo.

use std::collections::HashSet;

use serde_json::Value;

use crate::domain::todo::Todo;

#[derive(Debug, Default)]
pub struct Decoded {
    pub todos: Vec<Todo>,
    pub skipped: usize,
}

pub fn encode(todos: &[Todo]) -> serde_json::Result<String> {
    serde_json::to_string(todos)
}

pub fn decode(raw: &str) -> serde_json::Result<Decoded> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut decoded = Decoded { todos: Vec::with_capacity(records.len()), skipped: 0 };

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Todo>(record) {
            Ok(todo) if todo.id.as_str().trim().is_empty() => {
                tracing::debug!(index, "skipping stored todo with empty id");
                decoded.skipped += 1;
            }
            Ok(todo) if todo.text.trim().is_empty() => {
                tracing::debug!(index, id = %todo.id, "skipping stored todo with blank text");
                decoded.skipped += 1;
            }
            Ok(todo) if !seen.insert(todo.id.clone()) => {
                tracing::debug!(index, id = %todo.id, "skipping stored todo with duplicate id");
                decoded.skipped += 1;
            }
            Ok(todo) => decoded.todos.push(todo),
            Err(err) => {
                tracing::debug!(index, error = %err, "skipping malformed stored todo");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn reads_browser_written_value() {
        let raw = r#"[
            {"id":"7d0c6f58-3c8e-4a8b-9c39-2f0b8f0d2a11","text":"Walk dog","completed":true,"createdAt":"2024-05-01T10:00:00.250Z"},
            {"id":"0f5b6c9e-1d2a-4b3c-8d4e-5f6a7b8c9d0e","text":"Buy milk","completed":false,"createdAt":"2024-05-01T09:59:00.000Z"}
        ]"#;
        let decoded = decode(raw).unwrap();
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.todos.len(), 2);
        assert_eq!(decoded.todos[0].text, "Walk dog");
        assert!(decoded.todos[0].completed);
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + chrono::Duration::milliseconds(250);
        assert_eq!(decoded.todos[0].created_at, expected);
    }

    #[test]
    fn drops_bad_records_and_keeps_good_ones() {
        let good = Todo::new("keep".into());
        let dup = Todo { text: "again".into(), ..good.clone() };
        let raw = serde_json::json!([
            good,
            dup,
            {"id": "", "text": "x", "completed": false, "createdAt": "2024-01-01T00:00:00Z"},
            {"id": "0f5b6c9e-1d2a-4b3c-8d4e-5f6a7b8c9d0e", "text": "x", "completed": false, "createdAt": "yesterday"},
            {"id": "1f5b6c9e-1d2a-4b3c-8d4e-5f6a7b8c9d0e", "text": "   ", "completed": false, "createdAt": "2024-01-01T00:00:00Z"},
            {"text": "no id"},
            42,
        ])
        .to_string();
        let decoded = decode(&raw).unwrap();
        assert_eq!(decoded.todos, vec![good]);
        assert_eq!(decoded.skipped, 6);
    }

    #[test]
    fn keeps_ids_that_are_not_uuids() {
        let raw = r#"[
            {"id":"1714557600000","text":"Buy milk","completed":false,"createdAt":"2024-05-01T10:00:00.000Z"},
            {"id":"todo-7","text":"Walk dog","completed":true,"createdAt":"2024-05-01T10:01:00.000Z"}
        ]"#;
        let decoded = decode(raw).unwrap();
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.todos[0].id.as_str(), "1714557600000");
        assert_eq!(decoded.todos[1].id.as_str(), "todo-7");

        // Ids survive a re-encode untouched.
        let again = decode(&encode(&decoded.todos).unwrap()).unwrap();
        assert_eq!(again.todos, decoded.todos);
    }

    #[test]
    fn non_array_is_an_error() {
        assert!(decode("{\"todos\": []}").is_err());
        assert!(decode("not json").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn encode_keeps_order_and_exact_instants() {
        let mut a = Todo::new("a".into());
        a.created_at = Utc.timestamp_opt(1_714_557_600, 123_456_789).unwrap();
        let b = Todo::new("b".into());
        let raw = encode(&[a.clone(), b.clone()]).unwrap();
        let decoded = decode(&raw).unwrap();
        assert_eq!(decoded.todos, vec![a, b]);
    }
}
