//! Skill catalog - the read-only data the game reveals
//!
//! The catalog maps a category key (`"aiml"`, `"data"`, ...) to a display name
//! and an ordered list of skills. Its JSON form matches the portfolio's skills
//! data file:
//!
//! ```json
//! { "aiml": { "category": "AI / ML", "skills": [ { "name": "PyTorch", "level": "expert" } ] } }
//! ```
//!
//! Categories keep the order in which they appear in the document. A catalog is
//! validated once when it is built; every later lookup can rely on it being
//! non-empty with unique, non-blank skill names.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CatalogError;
use crate::types::Proficiency;

const BUILTIN_CATALOG: &str = include_str!("../assets/skills.json");

/// A single skill entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: Proficiency,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: Proficiency) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }
}

/// A named group of skills
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    /// Display name (`"category"` in the JSON document)
    #[serde(rename = "category")]
    pub name: String,
    pub skills: Vec<Skill>,
}

impl SkillCategory {
    pub fn new(name: impl Into<String>, skills: Vec<Skill>) -> Self {
        Self {
            name: name.into(),
            skills,
        }
    }
}

/// Validated, ordered skill catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCatalog {
    categories: Vec<(String, SkillCategory)>,
    total_skills: usize,
}

impl SkillCatalog {
    /// Build a catalog from (key, category) pairs, keeping their order.
    pub fn new(
        categories: impl IntoIterator<Item = (String, SkillCategory)>,
    ) -> Result<Self, CatalogError> {
        let categories: Vec<_> = categories.into_iter().collect();
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for (key, category) in &categories {
            if key.trim().is_empty() {
                return Err(CatalogError::BlankCategoryKey);
            }
            if category.skills.is_empty() {
                return Err(CatalogError::EmptyCategory(key.clone()));
            }
            for skill in &category.skills {
                if skill.name.trim().is_empty() {
                    return Err(CatalogError::BlankSkillName(key.clone()));
                }
                if !seen.insert(skill.name.as_str()) {
                    return Err(CatalogError::DuplicateSkill(skill.name.clone()));
                }
            }
        }

        let total_skills = seen.len();
        Ok(Self {
            categories,
            total_skills,
        })
    }

    /// Parse and validate a JSON catalog document
    pub fn from_json_str(s: &str) -> Result<Self, CatalogError> {
        let OrderedCategories(categories) = serde_json::from_str(s)?;
        Self::new(categories)
    }

    /// Read, parse and validate a JSON catalog file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn category(&self, key: &str) -> Option<&SkillCategory> {
        self.categories
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, category)| category)
    }

    /// Categories in document order
    pub fn categories(&self) -> impl Iterator<Item = (&str, &SkillCategory)> {
        self.categories
            .iter()
            .map(|(key, category)| (key.as_str(), category))
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of skills across all categories
    pub fn total_skills(&self) -> usize {
        self.total_skills
    }

    /// Look up a skill by name, with its category key and category
    pub fn find_skill(&self, name: &str) -> Option<(&str, &SkillCategory, &Skill)> {
        self.categories.iter().find_map(|(key, category)| {
            category
                .skills
                .iter()
                .find(|skill| skill.name == name)
                .map(|skill| (key.as_str(), category, skill))
        })
    }
}

/// JSON object of categories, deserialized without losing key order
struct OrderedCategories(Vec<(String, SkillCategory)>);

impl<'de> Deserialize<'de> for OrderedCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = OrderedCategories;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category key to category")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, category)) = map.next_entry::<String, SkillCategory>()? {
                    out.push((key, category));
                }
                Ok(OrderedCategories(out))
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}
