use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Database user row. `deleted_at` is `None` while the user is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Request body for creating a user. The name is kept as whatever JSON the
/// client sent; only the database decides whether it is acceptable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUser {
    pub name: Option<Value>,
}

impl CreateUser {
    /// The value bound for `name`, converted the way MySQL stores a scalar in
    /// a VARCHAR column. Absent or `null` binds SQL NULL.
    pub fn name_param(&self) -> Option<String> {
        match self.name.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            other => Some(other.to_string()),
        }
    }
}

/// Response body for a freshly inserted user, echoing the submitted name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: i32,
    pub name: Option<Value>,
}
