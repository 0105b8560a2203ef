//! Category registry
//!
//! Owns the set of categories. Names are unique case-insensitively and the
//! "Uncategorized" sentinel always exists, can't be renamed and can't be deleted.

use crate::catalog::SoundCatalog;
use soundboard_core::{Category, CategoryId, Result, SoundboardError};

/// Name returned for ids that do not resolve to a category
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Ordered set of categories (creation order)
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Create a registry holding only the sentinel category
    pub fn new() -> Self {
        Self {
            categories: vec![Category::uncategorized()],
        }
    }

    /// Create a new category
    ///
    /// # Errors
    /// `EmptyName` for a blank name, `DuplicateName` if the name is taken
    pub fn create(&mut self, name: &str) -> Result<&Category> {
        let name = self.validate_name(name, None)?;
        self.categories.push(Category::new(name));
        let created = &self.categories[self.categories.len() - 1];
        tracing::info!("Created category '{}' ({})", created.name, created.id);
        Ok(created)
    }

    /// Rename a category in place
    ///
    /// # Errors
    /// `CategoryNotFound`, `NotEditable`, `EmptyName` or `DuplicateName`
    pub fn rename(&mut self, id: &CategoryId, new_name: &str) -> Result<()> {
        let category = self
            .get(id)
            .ok_or_else(|| SoundboardError::CategoryNotFound(id.clone()))?;
        if !category.is_editable {
            return Err(SoundboardError::NotEditable(id.clone()));
        }

        let new_name = self.validate_name(new_name, Some(id))?;
        if let Some(category) = self.categories.iter_mut().find(|c| &c.id == id) {
            tracing::info!("Renamed category '{}' to '{}'", category.name, new_name);
            category.name = new_name;
        }
        Ok(())
    }

    /// Delete a category, moving its sounds to "Uncategorized" first
    ///
    /// Reassignment and removal happen under one exclusive borrow, so nobody
    /// can observe a sound pointing at a removed category.
    /// Returns the number of sounds that were reassigned.
    ///
    /// # Errors
    /// `NotDeletable` if the category is protected or does not exist
    pub fn delete(&mut self, id: &CategoryId, sounds: &mut SoundCatalog) -> Result<usize> {
        let position = self
            .categories
            .iter()
            .position(|c| &c.id == id && c.is_deletable)
            .ok_or_else(|| SoundboardError::NotDeletable(id.clone()))?;

        let reassigned = sounds.reassign_category(id, &CategoryId::uncategorized());
        let removed = self.categories.remove(position);
        tracing::info!(
            "Deleted category '{}', moved {} sound(s) to Uncategorized",
            removed.name,
            reassigned
        );
        Ok(reassigned)
    }

    /// Category name, or "Unknown" when the id does not resolve
    pub fn name_of(&self, id: &CategoryId) -> &str {
        self.get(id)
            .map_or(UNKNOWN_CATEGORY_NAME, |category| category.name.as_str())
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive lookup by name
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories.iter().find(|c| c.has_name(name))
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Trim and check a candidate name against every category except `exclude`
    fn validate_name(&self, name: &str, exclude: Option<&CategoryId>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SoundboardError::EmptyName);
        }

        let taken = self
            .categories
            .iter()
            .filter(|c| Some(&c.id) != exclude)
            .any(|c| c.has_name(name));
        if taken {
            return Err(SoundboardError::DuplicateName(name.to_string()));
        }

        Ok(name.to_string())
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
