//! Wire models for the category backend.
//!
//! The backend is inconsistent about field casing: depending on the
//! serializer in front of it, records arrive camelCase (`imageUrl`) or
//! PascalCase (`ImageUrl`). Normalization happens here, once per record,
//! via serde aliases on [`CategoryRow`] — never as fallback chains at use
//! sites.

use serde::{Deserialize, Serialize};

/// A catalog category, normalized for use throughout the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Stable, unique backend identifier.
    pub id: i64,
    pub name: String,
    /// Address of the category image, if one was uploaded.
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Raw wire shape of one category record, accepting both casings.
///
/// Every field is optional at this layer; defaults are applied in
/// [`CategoryRow::into_category`], the single ingestion point.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryRow {
    #[serde(default, alias = "Id")]
    id: Option<i64>,
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(default, rename = "imageUrl", alias = "ImageUrl")]
    image_url: Option<String>,
    #[serde(default, rename = "isActive", alias = "IsActive")]
    is_active: Option<bool>,
}

impl CategoryRow {
    /// Normalize one record. Absent name defaults to empty, absent active
    /// flag defaults to true. Returns `None` when the record has no id in
    /// either casing; such a row cannot be edited or deleted and is dropped
    /// by the caller.
    pub(crate) fn into_category(self) -> Option<Category> {
        let id = self.id?;
        Some(Category {
            id,
            name: self.name.unwrap_or_default(),
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Coerce a collection response into categories.
///
/// A non-array body degrades to an empty collection; individual rows that
/// fail to deserialize or lack an id are skipped. Nothing here propagates
/// an error: a malformed payload must never take down the screen.
pub(crate) fn coerce_list(value: serde_json::Value) -> Vec<Category> {
    let serde_json::Value::Array(items) = value else {
        tracing::warn!("Category response is not an array, treating as empty");
        return Vec::new();
    };

    let total = items.len();
    let categories: Vec<Category> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<CategoryRow>(item) {
            Ok(row) => row.into_category(),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed category record");
                None
            }
        })
        .collect();

    if categories.len() < total {
        tracing::warn!(
            dropped = total - categories.len(),
            kept = categories.len(),
            "Dropped category records without a usable id"
        );
    }

    categories
}

/// Outbound payload for create and update calls. Always camelCase on the
/// wire; the backend accepts either casing but emits what it last received,
/// so we keep writes consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl CategoryPayload {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            image_url: category.image_url.clone(),
            is_active: category.is_active,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
