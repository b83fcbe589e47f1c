//! Suggestion composition.
//!
//! Zips the weak-area ranking with a budget-scaled difficulty mix and greedily
//! packs suggestions into the available time. Template choice is the only
//! random step and uses an injected generator so callers (and tests) control
//! determinism.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;

use crate::domain::{TaskCategory, TaskDifficulty, TaskSuggestion};
use crate::planner::mix::{pick_difficulty_mix, MAX_SUGGESTIONS, MIN_SUGGESTIONS};
use crate::planner::range::SummaryRange;

/// Fixed template pool per category.
pub fn templates_for(category: TaskCategory) -> &'static [&'static str] {
  match category {
    TaskCategory::Listening => &[
      "20-min Listening practice (Academic topics)",
      "IELTS Listening Section 3 practice",
    ],
    TaskCategory::Reading => &[
      "Complete Reading Practice passage",
      "Skim and scan 2 articles for keywords",
    ],
    TaskCategory::Writing => &[
      "Review Writing Task 2 feedback",
      "Outline essay for Task 2 topic",
    ],
    TaskCategory::Vocabulary => &[
      "Master 15 academic collocations",
      "Revise 20 vocabulary flashcards",
    ],
    TaskCategory::Grammar => &[
      "Review complex sentence structures",
      "Practice 10 complex sentences",
    ],
    TaskCategory::Speaking => &[
      "Record 10-min response: Part 2 topics",
      "Mock Speaking Part 3 Q&A (10 min)",
    ],
  }
}

/// Order all six categories from least to most recent completions.
///
/// Categories absent from `counts` default to zero. Ties keep the
/// `TaskCategory::ALL` enumeration order (stable sort).
pub fn rank_weak_areas(counts: &HashMap<TaskCategory, i64>) -> Vec<TaskCategory> {
  let mut ranked = TaskCategory::ALL.to_vec();
  ranked.sort_by_key(|cat| counts.get(cat).copied().unwrap_or(0));
  ranked
}

/// Greedily pack suggestions into the time budget.
///
/// Difficulties that would exceed the remaining budget are skipped without
/// consuming a category slot. If fewer than three suggestions fit, easy
/// reading tasks are backfilled while budget remains; a budget too small for
/// even one easy task legitimately yields fewer than three, including none.
pub fn compose_suggestions<R: Rng>(
  weak_areas: &[TaskCategory],
  range: SummaryRange,
  time_available_minutes: i64,
  now: DateTime<Utc>,
  rng: &mut R,
) -> Vec<TaskSuggestion> {
  let bounds = range.resolve(now);
  let due_at = match range {
    SummaryRange::Daily => now,
    _ => bounds.to,
  };

  let mut suggestions = Vec::new();
  let mut used_minutes = 0i64;
  let mut cat_idx = 0usize;

  for difficulty in pick_difficulty_mix(time_available_minutes) {
    let est = difficulty.estimated_minutes();
    if used_minutes + est > time_available_minutes {
      continue;
    }
    let category = if weak_areas.is_empty() {
      TaskCategory::Reading
    } else {
      weak_areas[cat_idx % weak_areas.len()]
    };
    cat_idx += 1;

    let templates = templates_for(category);
    let name = templates[rng.random_range(0..templates.len())];
    suggestions.push(TaskSuggestion {
      name: name.to_string(),
      category,
      difficulty,
      estimated_minutes: est,
      due_at: Some(due_at),
    });
    used_minutes += est;
  }

  while suggestions.len() < MIN_SUGGESTIONS {
    let est = TaskDifficulty::Easy.estimated_minutes();
    if used_minutes + est > time_available_minutes {
      break;
    }
    suggestions.push(TaskSuggestion {
      name: templates_for(TaskCategory::Reading)[0].to_string(),
      category: TaskCategory::Reading,
      difficulty: TaskDifficulty::Easy,
      estimated_minutes: est,
      due_at: Some(due_at),
    });
    used_minutes += est;
  }

  suggestions.truncate(MAX_SUGGESTIONS);
  suggestions
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn wednesday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 13, 10, 0, 0).unwrap()
  }

  #[test]
  fn test_rank_weak_areas_no_activity() {
    // No completions anywhere: enumeration order is the tie-break
    let ranked = rank_weak_areas(&HashMap::new());
    assert_eq!(ranked, TaskCategory::ALL.to_vec());
  }

  #[test]
  fn test_rank_weak_areas_orders_ascending() {
    let mut counts = HashMap::new();
    counts.insert(TaskCategory::Reading, 5);
    counts.insert(TaskCategory::Writing, 1);
    counts.insert(TaskCategory::Grammar, 3);
    let ranked = rank_weak_areas(&counts);

    // Zero-count categories first (in ALL order), then ascending by count
    assert_eq!(ranked[0], TaskCategory::Speaking);
    assert_eq!(ranked[1], TaskCategory::Listening);
    assert_eq!(ranked[2], TaskCategory::Vocabulary);
    assert_eq!(ranked[3], TaskCategory::Writing);
    assert_eq!(ranked[4], TaskCategory::Grammar);
    assert_eq!(ranked[5], TaskCategory::Reading);
  }

  #[test]
  fn test_rank_is_permutation() {
    let mut counts = HashMap::new();
    counts.insert(TaskCategory::Listening, 2);
    let ranked = rank_weak_areas(&counts);
    assert_eq!(ranked.len(), 6);
    for cat in TaskCategory::ALL {
      assert!(ranked.contains(&cat));
    }
  }

  #[test]
  fn test_sixty_minute_scenario() {
    // Mix [hard(25), medium(20), medium(20)]: third entry would exceed 60,
    // so it is skipped and one easy reading backfill lands instead.
    let mut rng = StdRng::seed_from_u64(7);
    let weak = TaskCategory::ALL.to_vec();
    let suggestions =
      compose_suggestions(&weak, SummaryRange::Daily, 60, wednesday(), &mut rng);

    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].difficulty, TaskDifficulty::Hard);
    assert_eq!(suggestions[1].difficulty, TaskDifficulty::Medium);
    assert_eq!(suggestions[2].difficulty, TaskDifficulty::Easy);
    assert_eq!(suggestions[2].category, TaskCategory::Reading);
    let total: i64 = suggestions.iter().map(|s| s.estimated_minutes).sum();
    assert_eq!(total, 60);
  }

  #[test]
  fn test_tiny_budget_yields_empty() {
    // Nothing fits in 10 minutes, not even a backfill task
    let mut rng = StdRng::seed_from_u64(1);
    let weak = TaskCategory::ALL.to_vec();
    let suggestions =
      compose_suggestions(&weak, SummaryRange::Daily, 10, wednesday(), &mut rng);
    assert!(suggestions.is_empty());
  }

  #[test]
  fn test_budget_never_exceeded() {
    let weak = TaskCategory::ALL.to_vec();
    for minutes in 0..=200 {
      let mut rng = StdRng::seed_from_u64(minutes as u64);
      let suggestions =
        compose_suggestions(&weak, SummaryRange::Weekly, minutes, wednesday(), &mut rng);
      let total: i64 = suggestions.iter().map(|s| s.estimated_minutes).sum();
      assert!(total <= minutes, "{} > {} at {} minutes", total, minutes, minutes);
      assert!(suggestions.len() <= MAX_SUGGESTIONS);
    }
  }

  #[test]
  fn test_categories_assigned_round_robin() {
    // Large budget: all mix entries fit, categories walk the weak ranking
    let mut rng = StdRng::seed_from_u64(3);
    let weak = TaskCategory::ALL.to_vec();
    let suggestions =
      compose_suggestions(&weak, SummaryRange::Daily, 120, wednesday(), &mut rng);

    assert_eq!(suggestions.len(), 4); // hard + 3 medium at >= 75 minutes
    assert_eq!(suggestions[0].category, TaskCategory::Reading);
    assert_eq!(suggestions[1].category, TaskCategory::Writing);
    assert_eq!(suggestions[2].category, TaskCategory::Speaking);
    assert_eq!(suggestions[3].category, TaskCategory::Listening);
  }

  #[test]
  fn test_due_dates_follow_range() {
    let now = wednesday();
    let weak = TaskCategory::ALL.to_vec();

    let mut rng = StdRng::seed_from_u64(5);
    let daily = compose_suggestions(&weak, SummaryRange::Daily, 60, now, &mut rng);
    assert!(daily.iter().all(|s| s.due_at == Some(now)));

    let mut rng = StdRng::seed_from_u64(5);
    let weekly = compose_suggestions(&weak, SummaryRange::Weekly, 60, now, &mut rng);
    let week_end = SummaryRange::Weekly.resolve(now).to;
    assert!(weekly.iter().all(|s| s.due_at == Some(week_end)));
  }

  #[test]
  fn test_template_names_come_from_category_pool() {
    let mut rng = StdRng::seed_from_u64(11);
    let weak = TaskCategory::ALL.to_vec();
    let suggestions =
      compose_suggestions(&weak, SummaryRange::Daily, 120, wednesday(), &mut rng);
    for s in &suggestions {
      assert!(templates_for(s.category).contains(&s.name.as_str()));
    }
  }

  #[test]
  fn test_seeded_rng_is_deterministic() {
    let weak = TaskCategory::ALL.to_vec();
    let mut a = StdRng::seed_from_u64(42);
    let mut b = StdRng::seed_from_u64(42);
    let first = compose_suggestions(&weak, SummaryRange::Daily, 90, wednesday(), &mut a);
    let second = compose_suggestions(&weak, SummaryRange::Daily, 90, wednesday(), &mut b);
    assert_eq!(first, second);
  }
}
