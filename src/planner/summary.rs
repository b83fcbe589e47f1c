//! Difficulty-weighted progress aggregation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::TaskDifficulty;

/// Planned-task points per difficulty within the summarized window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointsBreakdown {
  pub easy: f64,
  pub medium: f64,
  pub hard: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressTotals {
  pub planned: i64,
  pub completed: i64,
  pub points: PointsBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
  /// Completed share of planned points, rounded and clamped to 0-100.
  pub percent: i64,
  pub totals: ProgressTotals,
}

/// Compute the summary from per-difficulty counts of planned and completed
/// tasks in the window. Zero planned points yields 0 percent.
pub fn summarize(
  planned: i64,
  completed: i64,
  planned_by_difficulty: &HashMap<TaskDifficulty, i64>,
  completed_by_difficulty: &HashMap<TaskDifficulty, i64>,
) -> ProgressSummary {
  let mut points = PointsBreakdown::default();
  let mut planned_points = 0.0;
  for (difficulty, count) in planned_by_difficulty {
    let p = difficulty.points() * *count as f64;
    planned_points += p;
    match difficulty {
      TaskDifficulty::Easy => points.easy += p,
      TaskDifficulty::Medium => points.medium += p,
      TaskDifficulty::Hard => points.hard += p,
    }
  }

  let completed_points: f64 = completed_by_difficulty
    .iter()
    .map(|(difficulty, count)| difficulty.points() * *count as f64)
    .sum();

  let percent = if planned_points > 0.0 {
    ((completed_points / planned_points) * 100.0).round().clamp(0.0, 100.0) as i64
  } else {
    0
  };

  ProgressSummary {
    percent,
    totals: ProgressTotals {
      planned,
      completed,
      points,
    },
  }
}
