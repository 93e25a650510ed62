use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A book record held by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Identifier assigned at creation
    #[schema(example = 1)]
    pub id: u32,
    /// Title of the book
    #[schema(example = "1984")]
    pub title: String,
    /// Author of the book
    #[schema(example = "George Orwell")]
    pub author: String,
}

impl Book {
    pub fn new(id: u32, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }
}

/// Request model for creating a new book.
///
/// Fields are optional on the wire so that a missing field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBook {
    /// Title of the book
    #[schema(value_type = String, required = true)]
    pub title: Option<String>,
    /// Author of the book
    #[schema(value_type = String, required = true)]
    pub author: Option<String>,
}

/// Partial update; only the supplied non-empty fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateBook {
    /// New title of the book
    pub title: Option<String>,
    /// New author of the book
    pub author: Option<String>,
}
