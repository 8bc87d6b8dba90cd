//! Decoding of upstream user payloads into [`UserRecord`]s.
//!
//! Two shapes are recognised, decided on the top-level JSON value only:
//!
//! * a bare array of user objects whose fields already match the record
//!   (`id`, `name`, `email`, `phone`, `company.name`);
//! * an object with a `users` array of objects carrying `firstName` and
//!   `lastName` instead of `name`.
//!
//! Anything else is rejected as an unsupported format.

use report_core::{UserRecord, PLACEHOLDER};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("malformed json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported payload: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Deserialize)]
struct FlatUser {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    phone: Option<Value>,
    #[serde(default)]
    company: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamedUser {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    first_name: Option<Value>,
    #[serde(default)]
    last_name: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    phone: Option<Value>,
    #[serde(default)]
    company: Option<Value>,
}

/// Parse and normalize a raw response body.
pub fn normalize_payload(body: &[u8]) -> Result<Vec<UserRecord>, NormalizeError> {
    let value: Value = serde_json::from_slice(body)?;
    normalize_value(value)
}

/// Normalize an already parsed JSON document.
pub fn normalize_value(value: Value) -> Result<Vec<UserRecord>, NormalizeError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let user: FlatUser = decode_object(item, index)?;
                Ok(flat_record(user, index))
            })
            .collect(),
        Value::Object(mut map) => match map.remove("users") {
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    let user: NamedUser = decode_object(item, index)?;
                    Ok(named_record(user, index))
                })
                .collect(),
            Some(other) => Err(NormalizeError::UnsupportedFormat(format!(
                "`users` is {}, expected an array",
                kind_of(&other)
            ))),
            None => Err(NormalizeError::UnsupportedFormat(
                "object without a `users` array".to_string(),
            )),
        },
        other => Err(NormalizeError::UnsupportedFormat(format!(
            "top-level {}",
            kind_of(&other)
        ))),
    }
}

fn decode_object<T: serde::de::DeserializeOwned>(
    item: Value,
    index: usize,
) -> Result<T, NormalizeError> {
    if !item.is_object() {
        return Err(NormalizeError::UnsupportedFormat(format!(
            "entry {} is {}, expected an object",
            index,
            kind_of(&item)
        )));
    }
    serde_json::from_value(item).map_err(|err| NormalizeError::UnsupportedFormat(err.to_string()))
}

fn flat_record(user: FlatUser, index: usize) -> UserRecord {
    UserRecord {
        id: record_id(user.id.as_ref(), index),
        name: text(user.name.as_ref()).unwrap_or_default(),
        email: text(user.email.as_ref()).unwrap_or_default(),
        phone: text(user.phone.as_ref()).unwrap_or_default(),
        company_name: company_name(user.company.as_ref()).unwrap_or_else(placeholder),
    }
}

fn named_record(user: NamedUser, index: usize) -> UserRecord {
    let first = text(user.first_name.as_ref());
    let last = text(user.last_name.as_ref());
    let name = match (first, last) {
        (None, None) => String::new(),
        (first, last) => format!(
            "{} {}",
            first.unwrap_or_default(),
            last.unwrap_or_default()
        ),
    };
    UserRecord {
        id: record_id(user.id.as_ref(), index),
        name,
        email: text(user.email.as_ref()).unwrap_or_else(placeholder),
        phone: text(user.phone.as_ref()).unwrap_or_else(placeholder),
        company_name: company_name(user.company.as_ref())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(placeholder),
    }
}

fn record_id(value: Option<&Value>, index: usize) -> String {
    text(value).unwrap_or_else(|| format!("#{}", index + 1))
}

fn company_name(company: Option<&Value>) -> Option<String> {
    company
        .and_then(|c| c.get("name"))
        .and_then(|name| text(Some(name)))
}

/// Scalar JSON values as display text; null and containers have none.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flat_array_fields_are_copied() {
        let body = br#"[
            {"id": 1, "name": "Leanne Graham", "email": "Sincere@april.biz",
             "phone": "1-770-736-8031 x56442", "company": {"name": "Romaguera-Crona"}},
            {"id": "u-2", "name": "Ervin Howell", "email": "Shanna@melissa.tv",
             "phone": "010-692-6593 x09125", "company": {"name": "Deckow-Crist"}}
        ]"#;
        let records = normalize_payload(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            UserRecord {
                id: "1".to_string(),
                name: "Leanne Graham".to_string(),
                email: "Sincere@april.biz".to_string(),
                phone: "1-770-736-8031 x56442".to_string(),
                company_name: "Romaguera-Crona".to_string(),
            }
        );
        assert_eq!(records[1].id, "u-2");
    }

    #[test]
    fn flat_array_fills_missing_fields() {
        let records = normalize_payload(br#"[{"name": "Solo"}]"#).unwrap();
        assert_eq!(records[0].id, "#1");
        assert_eq!(records[0].email, "");
        assert_eq!(records[0].phone, "");
        assert_eq!(records[0].company_name, PLACEHOLDER);
    }

    #[test]
    fn users_object_composes_name_and_placeholders() {
        let body = br#"{"users": [
            {"id": 5, "firstName": "Emily", "lastName": "Johnson",
             "email": "emily@x.dummyjson.com", "phone": "+81 965-431-3024",
             "company": {"name": "Dooley, Kozey and Cronin"}},
            {"id": 6, "firstName": "Michael", "lastName": "Williams"}
        ], "total": 2}"#;
        let records = normalize_payload(body).unwrap();
        assert_eq!(records[0].name, "Emily Johnson");
        assert_eq!(records[0].company_name, "Dooley, Kozey and Cronin");
        assert_eq!(records[1].name, "Michael Williams");
        assert_eq!(records[1].email, PLACEHOLDER);
        assert_eq!(records[1].phone, PLACEHOLDER);
        assert_eq!(records[1].company_name, PLACEHOLDER);
    }

    #[test]
    fn users_object_keeps_joining_space_unless_both_halves_missing() {
        let body = br#"{"users": [
            {"id": 1, "firstName": "Emily", "lastName": ""},
            {"id": 2, "lastName": "Johnson"},
            {"id": 3, "email": "nameless@x.dummyjson.com"}
        ]}"#;
        let records = normalize_payload(body).unwrap();
        assert_eq!(records[0].name, "Emily ");
        assert_eq!(records[1].name, " Johnson");
        assert_eq!(records[2].name, "");
    }

    #[test]
    fn users_object_replaces_empty_company_name() {
        let body = br#"{"users": [{"id": 1, "firstName": "A", "lastName": "B",
            "company": {"name": ""}}]}"#;
        let records = normalize_payload(body).unwrap();
        assert_eq!(records[0].company_name, PLACEHOLDER);
    }

    #[test]
    fn flat_array_copies_empty_company_name_verbatim() {
        let body = br#"[{"id": 1, "name": "A", "email": "a@example.com",
            "phone": "1", "company": {"name": ""}}]"#;
        let records = normalize_payload(body).unwrap();
        assert_eq!(records[0].company_name, "");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = normalize_payload(b"{\"users\": [").unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
    }

    #[test]
    fn other_shapes_are_unsupported() {
        for body in [
            &br#"{"data": []}"#[..],
            br#"{"users": {"id": 1}}"#,
            br#"[1, 2, 3]"#,
            br#""users""#,
            b"null",
        ] {
            let err = normalize_payload(body).unwrap_err();
            assert!(
                matches!(err, NormalizeError::UnsupportedFormat(_)),
                "body {:?} gave {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn empty_array_yields_no_records() {
        assert!(normalize_payload(b"[]").unwrap().is_empty());
        assert!(normalize_payload(br#"{"users": []}"#).unwrap().is_empty());
    }
}
