//! # User Record
//!
//! The single entity served by this crate, and its JSON codec.
//!
//! Request decoding is lenient:
//! - keys match case-insensitively (`"Name"` sets `name`)
//! - `null` for a field, or for the whole body, leaves zero values
//! - missing fields keep zero values, unknown fields are ignored
//! - only the first JSON value in the body is read
//!
//! Wrong value types, non-object bodies and empty bodies are errors.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table.
///
/// Field order matches the column order of every select statement
/// (`id, name, email`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Decode the first JSON value of a request body into a user.
    ///
    /// Bytes after that value are not inspected.
    pub fn decode(body: &[u8]) -> serde_json::Result<Self> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<User>>();
        match values.next() {
            Some(value) => Ok(value?.unwrap_or_default()),
            None => Err(de::Error::custom("EOF while parsing a value")),
        }
    }

    /// Encode as a JSON object
    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

enum Field {
    Id,
    Name,
    Email,
    Other,
}

impl Field {
    fn from_key(key: &str) -> Self {
        if key.eq_ignore_ascii_case("id") {
            Field::Id
        } else if key.eq_ignore_ascii_case("name") {
            Field::Name
        } else if key.eq_ignore_ascii_case("email") {
            Field::Email
        } else {
            Field::Other
        }
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<User, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut user = User::default();

        // Later duplicates win; a null value leaves the field as it was
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Field::Id => {
                    if let Some(id) = map.next_value::<Option<i32>>()? {
                        user.id = id;
                    }
                }
                Field::Name => {
                    if let Some(name) = map.next_value::<Option<String>>()? {
                        user.name = name;
                    }
                }
                Field::Email => {
                    if let Some(email) = map.next_value::<Option<String>>()? {
                        user.email = email;
                    }
                }
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(user)
    }
}

impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UserVisitor)
    }
}
