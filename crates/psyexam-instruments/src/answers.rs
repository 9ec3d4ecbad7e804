use std::collections::HashMap;

use psyexam_core::models::result::{FREE_TEXT_SLOTS, ITEM_SLOTS, MAX_FREE_TEXT_LEN};

use crate::definition::ExamDefinition;
use crate::error::InstrumentError;
use crate::scoring::parse_item_key;

/// Answers collected from one administration, laid out in result slots.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSheet {
    pub items: [Option<i64>; ITEM_SLOTS],
    pub free_texts: [Option<String>; FREE_TEXT_SLOTS],
}

/// Check submitted answers against the definition and lay them out in slots.
///
/// `answers` is keyed by `itemN` field names. Every question must be
/// answered with one of the offered option values; slots at or beyond the
/// question count are left empty. Blank free-text answers are stored as
/// empty slots.
pub fn collect_answers(
    definition: &ExamDefinition,
    answers: &HashMap<String, i64>,
    free_texts: &[String],
) -> Result<AnswerSheet, InstrumentError> {
    let question_count = definition.questions.len();

    let mut items = [None; ITEM_SLOTS];
    for (key, value) in answers {
        let slot = parse_item_key(key)
            .filter(|slot| *slot < question_count)
            .ok_or_else(|| InstrumentError::UnknownField(key.clone()))?;
        if !definition.accepts(*value) {
            return Err(InstrumentError::InvalidOption {
                item: slot,
                value: *value,
            });
        }
        items[slot] = Some(*value);
    }

    let missing: Vec<usize> = (0..question_count).filter(|slot| items[*slot].is_none()).collect();
    if !missing.is_empty() {
        return Err(InstrumentError::Unanswered { missing });
    }

    if free_texts.len() > FREE_TEXT_SLOTS {
        return Err(InstrumentError::TooManyFreeTexts {
            max: FREE_TEXT_SLOTS,
        });
    }
    let mut texts: [Option<String>; FREE_TEXT_SLOTS] = Default::default();
    for (index, text) in free_texts.iter().enumerate() {
        if text.chars().count() > MAX_FREE_TEXT_LEN {
            return Err(InstrumentError::FreeTextTooLong {
                index,
                max: MAX_FREE_TEXT_LEN,
            });
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            texts[index] = Some(trimmed.to_string());
        }
    }

    Ok(AnswerSheet {
        items,
        free_texts: texts,
    })
}
