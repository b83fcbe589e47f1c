//! Budget-scaled difficulty mix selection.

use crate::domain::TaskDifficulty;

/// Minimum number of suggestions the planner aims for.
pub const MIN_SUGGESTIONS: usize = 3;

/// Hard cap on suggestions per generation.
pub const MAX_SUGGESTIONS: usize = 5;

/// Pick an ordered difficulty profile sized to the available time.
///
/// Harder entries only appear when ample time is available; the seed mix is
/// padded with easy entries to at least three, gains one extra medium at
/// 75+ minutes, and is capped at five.
pub fn pick_difficulty_mix(total_minutes: i64) -> Vec<TaskDifficulty> {
  use TaskDifficulty::{Easy, Hard, Medium};

  let mut mix: Vec<TaskDifficulty> = if total_minutes >= 60 {
    vec![Hard, Medium, Medium]
  } else if total_minutes >= 45 {
    vec![Medium, Medium, Easy]
  } else {
    vec![Medium, Easy, Easy]
  };

  while mix.len() < MIN_SUGGESTIONS {
    mix.push(Easy);
  }
  if mix.len() < MAX_SUGGESTIONS && total_minutes >= 75 {
    mix.push(Medium);
  }
  mix.truncate(MAX_SUGGESTIONS);
  mix
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::TaskDifficulty::{Easy, Hard, Medium};

  #[test]
  fn test_mix_generous_budget() {
    assert_eq!(pick_difficulty_mix(60), vec![Hard, Medium, Medium]);
    assert_eq!(pick_difficulty_mix(74), vec![Hard, Medium, Medium]);
  }

  #[test]
  fn test_mix_ample_budget_gains_extra_medium() {
    assert_eq!(pick_difficulty_mix(75), vec![Hard, Medium, Medium, Medium]);
    assert_eq!(pick_difficulty_mix(120), vec![Hard, Medium, Medium, Medium]);
  }

  #[test]
  fn test_mix_mid_budget() {
    assert_eq!(pick_difficulty_mix(45), vec![Medium, Medium, Easy]);
    assert_eq!(pick_difficulty_mix(59), vec![Medium, Medium, Easy]);
  }

  #[test]
  fn test_mix_small_budget() {
    assert_eq!(pick_difficulty_mix(44), vec![Medium, Easy, Easy]);
    assert_eq!(pick_difficulty_mix(0), vec![Medium, Easy, Easy]);
  }

  #[test]
  fn test_mix_length_always_3_to_5() {
    for minutes in 0..=300 {
      let mix = pick_difficulty_mix(minutes);
      assert!(
        (MIN_SUGGESTIONS..=MAX_SUGGESTIONS).contains(&mix.len()),
        "length {} for {} minutes",
        mix.len(),
        minutes
      );
    }
  }
}
