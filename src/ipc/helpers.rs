use serde_json::json;

use super::error::err;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> Self {
        Self {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "not_found",
            message: message.into(),
            details: None,
        }
    }

    pub fn db_query(e: anyhow::Error) -> Self {
        Self {
            code: "db_query_failed",
            message: format!("{e:#}"),
            details: None,
        }
    }

    pub fn db_update(e: anyhow::Error) -> Self {
        Self {
            code: "db_update_failed",
            message: format!("{e:#}"),
            details: None,
        }
    }

    pub fn db_delete(e: anyhow::Error) -> Self {
        Self {
            code: "db_delete_failed",
            message: format!("{e:#}"),
            details: None,
        }
    }

    pub fn io(e: std::io::Error, path: &str) -> Self {
        Self {
            code: "io_failed",
            message: e.to_string(),
            details: Some(json!({ "path": path })),
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn required_i64(params: &serde_json::Value, key: &str) -> Result<i64, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

/// Path params must be non-empty after trimming.
pub fn required_path(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    match params.get(key).and_then(|v| v.as_str()) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(HandlerErr::bad_params(format!("missing {}", key))),
    }
}
