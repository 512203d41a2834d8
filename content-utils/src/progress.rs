//! Lesson unlocking and session-building helpers.
//!
//! Progress gates content: a user can only review or play game mode over
//! lessons they have already unlocked. These helpers slice the lesson set
//! accordingly and hand back flat word lists the screens can run with.

use rand::Rng;

use crate::choices::{knuth_shuffle, random_in_range};
use crate::validation::LESSON_MAX;
use crate::{LessonKind, LessonSet, QuizScoreType, ScoreStatus, Word};

/// The furthest lesson the user has unlocked.
pub fn final_unlocked_lesson(user_score_status: &ScoreStatus) -> usize {
    user_score_status.final_completed_lesson_index
}

/// All words from lesson 0 through the unlocked lesson, in lesson order.
pub fn review_lesson_set(lessons: &LessonSet, unlocked_lesson_index: usize) -> Vec<Word> {
    lessons
        .iter()
        .take(unlocked_lesson_index + 1)
        .flatten()
        .cloned()
        .collect()
}

/// A randomized practice session over the unlocked content using the thread
/// RNG. See [`game_mode_lesson_set_with_rng`].
pub fn game_mode_lesson_set(lessons: &LessonSet, unlocked_lesson_index: usize) -> Vec<Word> {
    game_mode_lesson_set_with_rng(lessons, unlocked_lesson_index, &mut rand::rng())
}

/// Flatten the unlocked lessons, shuffle them, and cap the session at one
/// lesson's worth of words.
pub fn game_mode_lesson_set_with_rng(
    lessons: &LessonSet,
    unlocked_lesson_index: usize,
    rng: &mut impl Rng,
) -> Vec<Word> {
    let mut flattened = review_lesson_set(lessons, unlocked_lesson_index);
    knuth_shuffle(&mut flattened, rng);
    flattened.truncate(LESSON_MAX);
    flattened
}

/// Experience awarded for finishing a lesson, using the thread RNG. See
/// [`experience_points_for_lesson_with_rng`].
pub fn experience_points_for_lesson(quiz_type: QuizScoreType, lesson_kind: LessonKind) -> i64 {
    experience_points_for_lesson_with_rng(quiz_type, lesson_kind, &mut rand::rng())
}

/// Experience awarded for finishing a lesson.
///
/// The typed quiz pays out more than the multiple choice quizzes, and
/// regular lessons are offset downward so game and review sessions stay the
/// more rewarding way to revisit old content.
pub fn experience_points_for_lesson_with_rng(
    quiz_type: QuizScoreType,
    lesson_kind: LessonKind,
    rng: &mut impl Rng,
) -> i64 {
    const MIN: i64 = 500;
    let max = if quiz_type == QuizScoreType::QuizText {
        1250
    } else {
        750
    };
    let offset = if lesson_kind == LessonKind::Lesson {
        500
    } else {
        0
    };
    random_in_range(rng, MIN, max - offset)
}
