//! # Category List
//!
//! Ordered list of category labels with set semantics.
//!
//! Insertion order is display order (filter dropdown, chart bars). A label
//! appears at most once: [`CategoryList::add`] rejects duplicates and
//! [`CategoryList::from_labels`] drops repeats found in persisted data,
//! keeping the first occurrence.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::validate_category_name;
use crate::DEFAULT_CATEGORIES;

/// Serializes as a plain JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CategoryList {
    labels: Vec<String>,
}

impl CategoryList {
    pub fn new() -> Self {
        CategoryList::default()
    }

    /// The categories an empty store starts with.
    pub fn seeded() -> Self {
        CategoryList::from_labels(DEFAULT_CATEGORIES.iter().map(|c| c.to_string()))
    }

    /// Builds a list, dropping empty labels and repeats (first one wins).
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut list = CategoryList::new();
        for label in labels {
            let label = label.trim();
            if !label.is_empty() && !list.contains(label) {
                list.labels.push(label.to_string());
            }
        }
        list
    }

    /// Appends a category at the end of the list.
    pub fn add(&mut self, label: &str) -> CoreResult<()> {
        let label = label.trim();
        validate_category_name(label)?;

        if self.contains(label) {
            return Err(ValidationError::Duplicate {
                field: "category".to_string(),
                value: label.to_string(),
            }
            .into());
        }

        self.labels.push(label.to_string());
        Ok(())
    }

    /// Removes a category. Products keep their label; it just stops
    /// appearing in the chart and the filter dropdown.
    pub fn remove(&mut self, label: &str) -> CoreResult<()> {
        let label = label.trim();
        let pos = self
            .labels
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| CoreError::CategoryNotFound(label.to_string()))?;
        self.labels.remove(pos);
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|c| c == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<Vec<String>> for CategoryList {
    fn from(labels: Vec<String>) -> Self {
        CategoryList::from_labels(labels)
    }
}

impl From<CategoryList> for Vec<String> {
    fn from(list: CategoryList) -> Self {
        list.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_order() {
        let list = CategoryList::seeded();
        let labels: Vec<&str> = list.iter().collect();
        assert_eq!(labels, vec!["Electronics", "Food", "Cleaning", "Clothing"]);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut list = CategoryList::seeded();
        list.add("Toys").unwrap();
        assert_eq!(list.len(), 5);
        assert_eq!(list.iter().last(), Some("Toys"));

        let err = list.add(" Food ").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert!(list.add("").is_err());
    }

    #[test]
    fn test_remove() {
        let mut list = CategoryList::seeded();
        list.remove("Food").unwrap();
        assert!(!list.contains("Food"));
        assert!(matches!(
            list.remove("Food"),
            Err(CoreError::CategoryNotFound(_))
        ));
    }

    #[test]
    fn test_remove_trims_like_add() {
        let mut list = CategoryList::new();
        list.add(" Toys ").unwrap();
        assert!(list.contains("Toys"));

        list.remove(" Toys ").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_persisted_duplicates_are_dropped() {
        let list: CategoryList =
            serde_json::from_value(serde_json::json!(["A", "B", "A", "", "C"])).unwrap();
        assert_eq!(list.as_slice(), &["A", "B", "C"]);
        assert_eq!(serde_json::to_value(&list).unwrap(), serde_json::json!(["A", "B", "C"]));
    }
}
