use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Field name of an answer slot, as stored and as submitted by forms.
pub fn item_key(slot: usize) -> String {
    format!("item{slot}")
}

/// Parse an `itemN` field name back into its slot index. Only the exact
/// form produced by [`item_key`] is accepted, so `item01` or `item+1` never
/// alias slot 1.
pub fn parse_item_key(key: &str) -> Option<usize> {
    let slot: usize = key.strip_prefix("item")?.parse().ok()?;
    (item_key(slot) == key).then_some(slot)
}

/// A symptom domain: a group of items summed and rated against its maximum.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Domain {
    pub id: String,
    pub name: String,
    pub items: Vec<usize>,
    pub max_score: i64,
}

/// The rated score of one domain in an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DomainScore {
    pub items: Vec<String>,
    pub score: i64,
    pub max_score: i64,
    pub severity: String,
}

/// Upper-exclusive thresholds mapped to labels, checked in order.
/// The last label applies when no threshold is exceeded.
#[derive(Debug, Clone, Copy)]
pub struct Bands<'a> {
    pub below: &'a [(f64, &'a str)],
    pub otherwise: &'a str,
}

impl Bands<'_> {
    pub fn label(&self, value: f64) -> &str {
        self.below
            .iter()
            .find(|(threshold, _)| value < *threshold)
            .map(|(_, label)| *label)
            .unwrap_or(self.otherwise)
    }
}

/// Score each domain from per-item scores and rate it by the percentage of
/// its maximum reached.
pub fn score_domains(
    domains: &[Domain],
    item_scores: &BTreeMap<usize, i64>,
    bands: Bands<'_>,
) -> BTreeMap<String, DomainScore> {
    domains
        .iter()
        .map(|domain| {
            let score: i64 = domain
                .items
                .iter()
                .filter_map(|slot| item_scores.get(slot))
                .sum();
            let percent = score as f64 / domain.max_score as f64 * 100.0;
            let rated = DomainScore {
                items: domain.items.iter().map(|slot| item_key(*slot)).collect(),
                score,
                max_score: domain.max_score,
                severity: bands.label(percent).to_string(),
            };
            (domain.id.clone(), rated)
        })
        .collect()
}

/// Render per-item scores keyed by their `itemN` field names.
pub fn keyed_item_scores(item_scores: &BTreeMap<usize, i64>) -> BTreeMap<String, i64> {
    item_scores
        .iter()
        .map(|(slot, score)| (item_key(*slot), *score))
        .collect()
}
