use crate::{Error, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Methods whose spelling is folded to upper case before sending, the same
/// set a browser `fetch` normalizes. Anything else goes out as written.
const NORMALIZED_METHODS: [Method; 6] = [
    Method::DELETE,
    Method::GET,
    Method::HEAD,
    Method::OPTIONS,
    Method::POST,
    Method::PUT,
];

/// HTTP method named by the caller. Any valid HTTP token is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoMethod(Method);

impl TodoMethod {
    pub const GET: TodoMethod = TodoMethod(Method::GET);
    pub const POST: TodoMethod = TodoMethod(Method::POST);
    pub const PATCH: TodoMethod = TodoMethod(Method::PATCH);
    pub const DELETE: TodoMethod = TodoMethod(Method::DELETE);

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for TodoMethod {
    fn default() -> Self {
        Self::GET
    }
}

impl FromStr for TodoMethod {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        if let Some(known) = NORMALIZED_METHODS
            .iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(raw))
        {
            return Ok(Self(known.clone()));
        }

        Method::from_bytes(raw.as_bytes())
            .map(Self)
            .map_err(|_| Error::invalid_request(format!("'{}' is not an HTTP method", raw)))
    }
}

impl TryFrom<String> for TodoMethod {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<TodoMethod> for String {
    fn from(method: TodoMethod) -> Self {
        method.as_str().to_string()
    }
}

impl From<TodoMethod> for Method {
    fn from(method: TodoMethod) -> Self {
        method.0
    }
}

impl fmt::Display for TodoMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What came back from the todos API: the raw status and the body parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendReply {
    pub status: u16,
    pub body: Value,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// JavaScript-style truthiness of the body: `null`, `false`, `0` and `""`
    /// are falsy, everything else (including `[]` and `{}`) is truthy.
    pub fn has_truthy_body(&self) -> bool {
        match &self.body {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}
