//! Entity extraction over the entity rules of a pattern bank.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::patterns::{EntityType, PatternBank};

/// A typed span of the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    /// Raw matched substring
    pub value: String,
    /// Canonical value (type-specific)
    pub normalized: String,
    /// Byte span `[start, end)` into the message, so `&message[start..end] == value`
    pub position: (usize, usize),
}

/// Extracts entities with global matching: every hit of every pattern is
/// considered, in bank order.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    bank: Arc<PatternBank>,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(Arc::new(PatternBank::default()))
    }
}

impl EntityExtractor {
    pub fn new(bank: Arc<PatternBank>) -> Self {
        Self { bank }
    }

    /// Extract entities from a message.
    ///
    /// An entity is kept only if no earlier entity of the same type has the
    /// same raw value (case-insensitive). Types are independent: one substring
    /// may appear under two types.
    pub fn extract(&self, text: &str) -> Vec<ExtractedEntity> {
        let mut entities = Vec::new();
        let mut seen: HashSet<(EntityType, String)> = HashSet::new();

        for rule in self.bank.entities() {
            for pattern in &rule.patterns {
                for m in pattern.find_iter(text) {
                    if m.as_str().is_empty() {
                        continue;
                    }
                    let key = (rule.entity_type, m.as_str().to_lowercase());
                    if !seen.insert(key) {
                        continue;
                    }
                    entities.push(ExtractedEntity {
                        entity_type: rule.entity_type,
                        value: m.as_str().to_string(),
                        normalized: rule.normalize(m.as_str()),
                        position: (m.start(), m.end()),
                    });
                }
            }
        }

        entities
    }
}
