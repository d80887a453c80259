//! Quiz sampling: filter the pool by tags, then draw without replacement.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::Question;

/// Questions eligible for a quiz.
///
/// An empty filter selects everything. Otherwise a question qualifies when it
/// shares at least one tag with the filter.
pub fn filter_pool<'a>(questions: &'a [Question], selected_tags: &BTreeSet<String>) -> Vec<&'a Question> {
    if selected_tags.is_empty() {
        return questions.iter().collect();
    }
    questions
        .iter()
        .filter(|q| q.has_any_tag(selected_tags))
        .collect()
}

/// Draw `min(count, |pool|)` distinct questions uniformly at random.
///
/// The result is always in random order, including when the whole pool is
/// returned. Negative counts are treated as zero.
pub fn generate_quiz<R: Rng + ?Sized>(
    questions: &[Question],
    selected_tags: &BTreeSet<String>,
    count: i64,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = filter_pool(questions, selected_tags);
    let take = usize::try_from(count.max(0)).unwrap_or(usize::MAX).min(pool.len());

    pool.shuffle(rng);
    pool.truncate(take);

    debug!(target: "quiz", requested = count, drawn = pool.len(), tags = selected_tags.len(), "Sampled quiz");
    pool.into_iter().cloned().collect()
}

/// `generate_quiz` with the thread-local RNG.
pub fn generate_quiz_random(questions: &[Question], selected_tags: &BTreeSet<String>, count: i64) -> Vec<Question> {
    generate_quiz(questions, selected_tags, count, &mut rand::thread_rng())
}
