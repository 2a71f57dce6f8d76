//! Book data models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A book in the catalogue.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub year: i32,
}
