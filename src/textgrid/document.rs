//! The TextGrid document: an ordered collection of uniquely named tiers.

use crate::error::{Error, Result};
use crate::textgrid::Tier;

/// A time-aligned multi-tier annotation document.
///
/// Tier order is display order and is preserved exactly; every tier
/// mutation that could change the document's time span keeps
/// `max_time` up to date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextGrid {
    /// Lower time bound of the document.
    pub min_time: f64,
    /// Upper time bound of the document (latest time across all tiers).
    pub max_time: f64,
    tiers: Vec<Tier>,
}

impl TextGrid {
    /// Create an empty document spanning `[0, 0]`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with explicit time bounds.
    pub fn with_bounds(min_time: f64, max_time: f64) -> Self {
        Self {
            min_time,
            max_time,
            tiers: Vec::new(),
        }
    }

    /// Tiers in display order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Tier names in display order.
    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(Tier::name).collect()
    }

    /// Whether a tier with this name exists.
    pub fn has_tier(&self, name: &str) -> bool {
        self.tiers.iter().any(|t| t.name() == name)
    }

    /// Look up a tier by name.
    pub fn tier(&self, name: &str) -> Result<&Tier> {
        self.tiers
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::TierNotFound {
                name: name.to_string(),
            })
    }

    /// Append a tier to the document.
    ///
    /// The document's time bounds are widened to cover the new tier.
    pub fn add_tier(&mut self, tier: impl Into<Tier>) -> Result<()> {
        let index = self.tiers.len();
        self.add_tier_at(tier, index)
    }

    /// Insert a tier at a specific display position.
    pub fn add_tier_at(&mut self, tier: impl Into<Tier>, index: usize) -> Result<()> {
        let tier = tier.into();
        if self.has_tier(tier.name()) {
            return Err(Error::DuplicateTier {
                name: tier.name().to_string(),
            });
        }

        self.min_time = self.min_time.min(tier.min_time());
        self.max_time = self.max_time.max(tier.max_time());
        let index = index.min(self.tiers.len());
        self.tiers.insert(index, tier);
        Ok(())
    }

    /// Remove a tier by name and return it.
    pub fn remove_tier(&mut self, name: &str) -> Result<Tier> {
        let index = self
            .tiers
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| Error::TierNotFound {
                name: name.to_string(),
            })?;
        Ok(self.tiers.remove(index))
    }

    /// Rename a tier in place.
    pub fn rename_tier(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if old_name == new_name {
            return Ok(());
        }
        if self.has_tier(new_name) {
            return Err(Error::DuplicateTier {
                name: new_name.to_string(),
            });
        }
        let tier = self
            .tiers
            .iter_mut()
            .find(|t| t.name() == old_name)
            .ok_or_else(|| Error::TierNotFound {
                name: old_name.to_string(),
            })?;
        tier.set_name(new_name);
        Ok(())
    }
}
