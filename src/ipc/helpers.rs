use crate::dates::DateKey;
use crate::ipc::error::HandlerErr;
use serde_json::json;
use std::collections::HashMap;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Absent and `null` both read as `None`.
pub fn get_optional_str<'a>(
    params: &'a serde_json::Value,
    key: &str,
) -> Result<Option<&'a str>, HandlerErr> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a string", key))),
    }
}

/// Reads a `{ name: value }` object of form values.
///
/// Numbers are taken as their text; `null` values are skipped as if omitted.
pub fn get_string_map(
    params: &serde_json::Value,
    key: &str,
) -> Result<HashMap<String, String>, HandlerErr> {
    let Some(v) = params.get(key) else {
        return Ok(HashMap::new());
    };
    if v.is_null() {
        return Ok(HashMap::new());
    }
    let Some(obj) = v.as_object() else {
        return Err(HandlerErr::bad_params(format!("{} must be an object", key)));
    };
    let mut out = HashMap::with_capacity(obj.len());
    for (name, value) in obj {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => {
                return Err(HandlerErr {
                    code: "bad_params",
                    message: format!("{}.{} must be a string", key, name),
                    details: None,
                })
            }
        };
        out.insert(name.clone(), text);
    }
    Ok(out)
}

pub fn date_json(date: &DateKey) -> serde_json::Value {
    json!({
        "date": date.to_string(),
        "isoDate": date.iso(),
    })
}
