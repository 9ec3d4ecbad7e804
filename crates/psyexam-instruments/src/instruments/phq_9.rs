use std::collections::BTreeMap;

use psyexam_core::models::analysis::Analysis;

use crate::scoring::{keyed_item_scores, score_domains, Bands, Domain};
use crate::Analyzer;

/// PHQ-9: Patient Health Questionnaire, nine items.
/// Each item is rated 0–3; the total ranges 0–27. Unanswered items count 0.
pub struct Phq9;

const ITEM_COUNT: usize = 9;

const SEVERITY: Bands<'static> = Bands {
    below: &[
        (5.0, "minimal"),
        (10.0, "mild"),
        (15.0, "moderate"),
        (20.0, "moderately severe"),
    ],
    otherwise: "severe",
};

const DOMAIN_SEVERITY: Bands<'static> = Bands {
    below: &[(33.0, "mild"), (66.0, "moderate")],
    otherwise: "severe",
};

impl Analyzer for Phq9 {
    fn id(&self) -> &str {
        "phq_9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn item_count(&self) -> usize {
        ITEM_COUNT
    }

    fn domains(&self) -> &[Domain] {
        static DOMAINS: std::sync::LazyLock<Vec<Domain>> = std::sync::LazyLock::new(|| {
            vec![
                domain("mood", "Mood / affect", &[0, 1], 6),
                domain("somatic", "Somatic symptoms", &[2, 3, 4], 9),
                domain("cognitive", "Cognition", &[6, 7], 6),
                domain("self_evaluation", "Self-evaluation", &[5], 3),
                domain("suicidal_ideation", "Suicidal ideation", &[8], 3),
            ]
        });
        &DOMAINS
    }

    fn analyze(&self, items: &[Option<i64>]) -> Analysis {
        tracing::info!("scoring PHQ-9");

        let mut item_scores = BTreeMap::new();
        for slot in 0..ITEM_COUNT {
            let score = match items.get(slot).copied().flatten() {
                Some(score) => score,
                None => {
                    tracing::warn!(slot, "PHQ-9 item unanswered, scoring as 0");
                    0
                }
            };
            item_scores.insert(slot, score);
        }

        let total: i64 = item_scores.values().sum();
        let severity = SEVERITY.label(total as f64).to_string();
        let domain_analysis = score_domains(self.domains(), &item_scores, DOMAIN_SEVERITY);

        Analysis {
            total_score: total as f64,
            interpretation: interpretation(total, &severity),
            severity: Some(severity),
            details: serde_json::json!({
                "item_scores": keyed_item_scores(&item_scores),
                "domain_analysis": domain_analysis,
            }),
        }
    }
}

fn interpretation(total: i64, severity: &str) -> String {
    let base = format!(
        "The PHQ-9 total score is {total}, indicating {severity} depressive symptoms."
    );
    let guidance = match total {
        ..=4 => "No clinically significant depressive symptoms at this time.",
        5..=9 => "Watchful waiting and follow-up are recommended.",
        10..=14 => {
            "Consider a treatment plan; evaluate the need for counselling or medication."
        }
        15..=19 => {
            "Active treatment is recommended; consider starting medication or psychotherapy."
        }
        _ => {
            "Immediate intervention is needed; combine medication and psychotherapy and \
             consider whether inpatient care is required."
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
