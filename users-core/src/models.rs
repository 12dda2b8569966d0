use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload accepted by `POST /api/users`.
///
/// Only JSON objects are accepted. A missing or `null` field is inserted
/// as SQL `NULL` and the schema decides whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<Map<String, Value>> for NewUser {
    type Error = String;

    fn try_from(mut body: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            name: take_text(&mut body, "name")?,
            email: take_text(&mut body, "email")?,
            password: take_text(&mut body, "password")?,
        })
    }
}

fn take_text(body: &mut Map<String, Value>, field: &str) -> Result<Option<String>, String> {
    match body.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(other) => Err(format!("`{}` must be a string, got {}", field, other)),
    }
}

/// A row of the `users` table as returned by the insert.
///
/// Column types belong to the external schema, so the row is kept as the
/// column map the database produced and serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User {
    columns: Map<String, Value>,
}

impl User {
    pub fn id(&self) -> Option<&Value> {
        self.columns.get("id").filter(|id| !id.is_null())
    }

    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    // Stored and returned exactly as submitted.
    pub fn password(&self) -> Option<&str> {
        self.text("password")
    }

    pub fn columns(&self) -> &Map<String, Value> {
        &self.columns
    }

    fn text(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for User {
    fn from(columns: Map<String, Value>) -> Self {
        Self { columns }
    }
}
