//! Average monster ability scores.

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use monster_fighter_core::{Ability, AbilityGroup};

use crate::client::ReferenceSource;
use crate::config::SamplingConfig;
use crate::error::{ReferenceError, Result};

/// Per-ability averages over a monster sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityAverages {
    /// Number of monsters the averages were computed over.
    pub sampled: usize,
    /// Scores in [`Ability::ALL`] order.
    pub scores: Vec<(Ability, i64)>,
}

impl AbilityAverages {
    /// Averages over already-fetched monster documents.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySample`](ReferenceError::EmptySample) for an empty
    /// slice and [`MissingField`](ReferenceError::MissingField) when a
    /// monster lacks a numeric score.
    pub fn from_monsters(monsters: &[Value]) -> Result<Self> {
        if monsters.is_empty() {
            return Err(ReferenceError::EmptySample);
        }
        let sampled = monsters.len();
        let scores = Ability::ALL
            .iter()
            .map(|&ability| -> Result<(Ability, i64)> {
                let total = monsters
                    .iter()
                    .map(|m| ability_score(m, ability))
                    .sum::<Result<i64>>()?;
                Ok((ability, total / sampled as i64))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sampled, scores })
    }

    /// Keeps the abilities of `group`, preserving order.
    pub fn filtered(&self, group: AbilityGroup) -> Self {
        Self {
            sampled: self.sampled,
            scores: self
                .scores
                .iter()
                .copied()
                .filter(|(ability, _)| group.contains(*ability))
                .collect(),
        }
    }

    pub fn get(&self, ability: Ability) -> Option<i64> {
        self.scores
            .iter()
            .find(|(a, _)| *a == ability)
            .map(|(_, score)| *score)
    }
}

fn ability_score(monster: &Value, ability: Ability) -> Result<i64> {
    let field = ability.field_name();
    monster
        .get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| ReferenceError::MissingField {
            context: monster_label(monster),
            field,
        })
}

fn monster_label(monster: &Value) -> String {
    ["index", "name"]
        .iter()
        .find_map(|key| monster.get(*key).and_then(Value::as_str))
        .map_or_else(|| "monster".to_string(), |name| format!("monster '{name}'"))
}

/// Positions of the sampled entries among `total` index entries.
///
/// # Examples
///
/// ```
/// use monster_fighter_reference::sample_indices;
///
/// assert_eq!(sample_indices(334, 10, 201).len(), 21);
/// assert_eq!(sample_indices(25, 10, 201), vec![0, 10, 20]);
/// ```
pub fn sample_indices(total: usize, stride: usize, limit: usize) -> Vec<usize> {
    (0..total.min(limit)).step_by(stride.max(1)).collect()
}

/// Samples the monster index and averages the sample's ability scores.
///
/// Documents are fetched in parallel; the first failed fetch aborts the run.
pub fn monster_ability_averages(
    source: &dyn ReferenceSource,
    sampling: &SamplingConfig,
) -> Result<AbilityAverages> {
    let index = source.list_monsters()?;
    let picks = sample_indices(index.len(), sampling.stride, sampling.limit);
    info!(
        available = index.len(),
        sampled = picks.len(),
        "Sampling monsters for ability averages"
    );

    let monsters = picks
        .par_iter()
        .map(|&i| {
            debug!(monster = %index[i].index, "Fetching sampled monster");
            source.monster(&index[i].index)
        })
        .collect::<Result<Vec<_>>>()?;

    AbilityAverages::from_monsters(&monsters)
}
