use std::collections::BTreeMap;

use psyexam_core::models::analysis::Analysis;

use crate::scoring::{keyed_item_scores, score_domains, Bands, Domain};
use crate::Analyzer;

/// SDS: Zung Self-Rating Depression Scale, twenty items.
/// Each item is rated 1–4 and reverse-keyed items are flipped (5 - raw), so
/// the total ranges 20–80. Unanswered items count as the minimum, 1.
/// The SDS index is the total as a percentage of 80.
pub struct Sds;

const ITEM_COUNT: usize = 20;

const MIN_ITEM_SCORE: i64 = 1;

const MAX_TOTAL: f64 = 80.0;

const REVERSED_ITEMS: [usize; 8] = [2, 6, 11, 12, 14, 16, 17, 18];

const SEVERITY: Bands<'static> = Bands {
    below: &[
        (50.0, "normal"),
        (60.0, "mild to moderate depression"),
        (70.0, "moderate to severe depression"),
    ],
    otherwise: "severe depression",
};

const DOMAIN_SEVERITY: Bands<'static> = Bands {
    below: &[
        (60.0, "normal"),
        (70.0, "mild to moderate"),
        (80.0, "moderate to severe"),
    ],
    otherwise: "severe",
};

impl Analyzer for Sds {
    fn id(&self) -> &str {
        "sds"
    }

    fn name(&self) -> &str {
        "SDS"
    }

    fn item_count(&self) -> usize {
        ITEM_COUNT
    }

    fn domains(&self) -> &[Domain] {
        static DOMAINS: std::sync::LazyLock<Vec<Domain>> = std::sync::LazyLock::new(|| {
            vec![
                domain("affective", "Affective symptoms", &[0, 3, 4, 7, 8, 9], 24),
                domain(
                    "somatic",
                    "Somatic symptoms",
                    &[1, 2, 11, 12, 14, 16, 17, 18],
                    32,
                ),
                domain(
                    "psychological",
                    "Psychological symptoms",
                    &[5, 6, 10, 13, 15, 19],
                    24,
                ),
            ]
        });
        &DOMAINS
    }

    fn analyze(&self, items: &[Option<i64>]) -> Analysis {
        tracing::info!("scoring SDS");

        let mut item_scores = BTreeMap::new();
        for slot in 0..ITEM_COUNT {
            let score = match items.get(slot).copied().flatten() {
                Some(raw) if REVERSED_ITEMS.contains(&slot) => 5 - raw,
                Some(raw) => raw,
                None => {
                    tracing::warn!(slot, "SDS item unanswered, scoring as minimum");
                    MIN_ITEM_SCORE
                }
            };
            item_scores.insert(slot, score);
        }

        let total: i64 = item_scores.values().sum();
        let sds_index = total as f64 / MAX_TOTAL * 100.0;
        let severity = SEVERITY.label(total as f64).to_string();
        let domain_analysis = score_domains(self.domains(), &item_scores, DOMAIN_SEVERITY);

        Analysis {
            total_score: total as f64,
            interpretation: interpretation(total, sds_index, &severity),
            severity: Some(severity),
            details: serde_json::json!({
                "sds_index": sds_index,
                "item_scores": keyed_item_scores(&item_scores),
                "domain_analysis": domain_analysis,
            }),
        }
    }
}

fn interpretation(total: i64, sds_index: f64, severity: &str) -> String {
    let base = format!(
        "The SDS total score is {total} with an SDS index of {sds_index:.1}, indicating {severity}."
    );
    let guidance = match total {
        ..=49 => "No clinically significant depressive symptoms at this time.",
        50..=59 => {
            "Mild to moderate depressive symptoms; follow-up and psychological support are \
             recommended."
        }
        60..=69 => {
            "Moderate to severe depressive symptoms; specialist intervention may be needed. \
             Consider counselling or medication."
        }
        _ => {
            "Severe depressive symptoms; a psychiatric evaluation and prompt treatment are \
             required."
        }
    };
    format!("{base} {guidance}")
}

fn domain(id: &str, name: &str, items: &[usize], max_score: i64) -> Domain {
    Domain {
        id: id.to_string(),
        name: name.to_string(),
        items: items.to_vec(),
        max_score,
    }
}
