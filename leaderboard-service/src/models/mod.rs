use serde::{Deserialize, Serialize};

/// A full-field snapshot of one leaderboard entry. Updates from the feed
/// replace the whole record, never a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    /// Opaque identifier, stable across updates.
    pub id: String,
    /// Display name, replaced wholesale on update.
    pub label: String,
    /// Current score. May go down as well as up.
    pub score: f64,
}

impl ScoredEntity {
    pub fn new(id: impl Into<String>, label: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            score,
        }
    }

    /// Boundary check applied before a snapshot is allowed to reach the
    /// ranked core. A non-finite score would poison every later comparison.
    pub fn validate(&self) -> Result<(), InvalidEntity> {
        if self.id.is_empty() {
            return Err(InvalidEntity::EmptyId);
        }
        if !self.score.is_finite() {
            return Err(InvalidEntity::NonFiniteScore {
                id: self.id.clone(),
                score: self.score,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidEntity {
    #[error("entity id is empty")]
    EmptyId,

    #[error("entity {id} has non-finite score {score}")]
    NonFiniteScore { id: String, score: f64 },
}
