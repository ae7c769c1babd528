//! Discovery module - which skills the player has revealed so far
//!
//! Each lock reveals one not-yet-discovered skill from the locked piece's
//! category, chosen uniformly at random. The discovered set only grows until
//! the session is reset.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::Serialize;

use crate::catalog::SkillCatalog;
use crate::types::Proficiency;

/// A skill that was just revealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillReveal {
    pub skill: String,
    pub level: Proficiency,
    pub category_key: String,
    pub category_name: String,
}

/// Transient "skill revealed" notification with a bounded lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealNotice {
    pub reveal: SkillReveal,
    pub remaining_ms: u32,
}

impl RevealNotice {
    pub fn new(reveal: SkillReveal, lifetime_ms: u32) -> Self {
        Self {
            reveal,
            remaining_ms: lifetime_ms,
        }
    }

    /// Count down; returns true once the notice has expired
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }
}

/// Revealed skills with per-category counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    discovered: HashSet<String>,
    per_category: HashMap<String, u32>,
}

impl Discovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveal one random undiscovered skill of `category_key`.
    ///
    /// Returns None, changing nothing, if the category is unknown or already
    /// fully discovered.
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        catalog: &SkillCatalog,
        category_key: &str,
        rng: &mut R,
    ) -> Option<SkillReveal> {
        let category = catalog.category(category_key)?;
        let hidden: Vec<_> = category
            .skills
            .iter()
            .filter(|skill| !self.discovered.contains(&skill.name))
            .collect();
        if hidden.is_empty() {
            return None;
        }

        let skill = hidden[rng.gen_range(0..hidden.len())];
        self.discovered.insert(skill.name.clone());
        *self
            .per_category
            .entry(category_key.to_string())
            .or_insert(0) += 1;

        Some(SkillReveal {
            skill: skill.name.clone(),
            level: skill.level,
            category_key: category_key.to_string(),
            category_name: category.name.clone(),
        })
    }

    pub fn is_discovered(&self, name: &str) -> bool {
        self.discovered.contains(name)
    }

    /// Number of discovered skills
    pub fn len(&self) -> usize {
        self.discovered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty()
    }

    /// How many skills of `category_key` were revealed
    pub fn revealed_in(&self, category_key: &str) -> u32 {
        self.per_category.get(category_key).copied().unwrap_or(0)
    }

    /// Discovered skills in catalog order
    pub fn in_catalog_order(&self, catalog: &SkillCatalog) -> Vec<SkillReveal> {
        catalog
            .categories()
            .flat_map(|(key, category)| {
                category
                    .skills
                    .iter()
                    .filter(|skill| self.discovered.contains(&skill.name))
                    .map(move |skill| SkillReveal {
                        skill: skill.name.clone(),
                        level: skill.level,
                        category_key: key.to_string(),
                        category_name: category.name.clone(),
                    })
            })
            .collect()
    }
}
