//! Category model
//!
//! A category is a user-defined label for spending. Categories are owned by
//! a [`CategoryRegistry`](crate::services::CategoryRegistry); records only
//! hold their [`CategoryId`].

use std::fmt;

use super::ids::CategoryId;
use crate::error::{TrackerError, TrackerResult};

/// Name of the category every registry synthesizes on creation
pub const DEFAULT_CATEGORY_NAME: &str = "default";

/// A spending category
///
/// Two categories are equal when their (trimmed) names match, regardless of
/// identity or flags.
#[derive(Debug, Clone)]
pub struct Category {
    /// Stable identity
    pub id: CategoryId,

    /// Category name, always trimmed and non-blank
    name: String,

    /// Whether the category is shown in selection lists
    pub visible: bool,

    /// Whether this is the registry's protected default
    is_default: bool,
}

impl Category {
    /// Create a new visible, non-default category
    pub fn new(name: &str) -> TrackerResult<Self> {
        Ok(Self {
            id: CategoryId::new(),
            name: validate_name(name)?,
            visible: true,
            is_default: false,
        })
    }

    /// Rebuild a category from persisted flags
    pub fn with_flags(name: &str, visible: bool, is_default: bool) -> TrackerResult<Self> {
        let mut category = Self::new(name)?;
        category.visible = visible;
        category.is_default = is_default;
        Ok(category)
    }

    /// The synthesized default category
    pub(crate) fn synthesized_default() -> Self {
        Self {
            id: CategoryId::new(),
            name: DEFAULT_CATEGORY_NAME.to_string(),
            visible: true,
            is_default: true,
        }
    }

    /// The category name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this category is flagged as the default
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub(crate) fn set_default_flag(&mut self, is_default: bool) {
        self.is_default = is_default;
    }

    /// Replace the name; duplicate checks belong to the registry
    pub(crate) fn set_name(&mut self, name: &str) -> TrackerResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Category {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Trim a category name, rejecting blank input
pub(crate) fn validate_name(name: &str) -> TrackerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::InvalidName(
            "Category name cannot be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}
