use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Study categories, in canonical enumeration order.
///
/// The order of `TaskCategory::ALL` is load-bearing: weak-area ranking breaks
/// count ties by this order, so reading surfaces before grammar when both have
/// the same recent activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
  Reading,
  Writing,
  Speaking,
  Listening,
  Vocabulary,
  Grammar,
}

impl TaskCategory {
  pub const ALL: [TaskCategory; 6] = [
    Self::Reading,
    Self::Writing,
    Self::Speaking,
    Self::Listening,
    Self::Vocabulary,
    Self::Grammar,
  ];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "reading" => Some(Self::Reading),
      "writing" => Some(Self::Writing),
      "speaking" => Some(Self::Speaking),
      "listening" => Some(Self::Listening),
      "vocabulary" => Some(Self::Vocabulary),
      "grammar" => Some(Self::Grammar),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Reading => "reading",
      Self::Writing => "writing",
      Self::Speaking => "speaking",
      Self::Listening => "listening",
      Self::Vocabulary => "vocabulary",
      Self::Grammar => "grammar",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDifficulty {
  Easy,
  Medium,
  Hard,
}

impl TaskDifficulty {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "easy" => Some(Self::Easy),
      "medium" => Some(Self::Medium),
      "hard" => Some(Self::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Easy => "easy",
      Self::Medium => "medium",
      Self::Hard => "hard",
    }
  }

  /// Weight used for progress-percent computation only, never for scheduling.
  pub fn points(&self) -> f64 {
    match self {
      Self::Easy => 1.0,
      Self::Medium => 1.5,
      Self::Hard => 2.0,
    }
  }

  /// Fixed per-difficulty time estimate used when packing suggestions.
  pub fn estimated_minutes(&self) -> i64 {
    match self {
      Self::Easy => 15,
      Self::Medium => 20,
      Self::Hard => 25,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  Planned,
  // Older clients send the kebab-case form
  #[serde(alias = "in-progress")]
  InProgress,
  Completed,
}

impl TaskStatus {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "planned" => Some(Self::Planned),
      "in_progress" => Some(Self::InProgress),
      "completed" => Some(Self::Completed),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Planned => "planned",
      Self::InProgress => "in_progress",
      Self::Completed => "completed",
    }
  }
}

/// A persisted unit of study work.
///
/// `completed_at` is only set when `status` transitions to completed;
/// `progress` reaching 100 is a UI-side completion signal and is not coupled
/// to the status column atomically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub id: i64,
  pub user_id: i64,
  pub name: String,
  pub category: TaskCategory,
  pub difficulty: TaskDifficulty,
  pub status: TaskStatus,
  pub estimated_minutes: i64,
  /// Completion progress 0-100.
  pub progress: i64,
  pub due_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub completed_at: Option<DateTime<Utc>>,
}

/// A planner-proposed task candidate. Not persisted until accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSuggestion {
  pub name: String,
  pub category: TaskCategory,
  pub difficulty: TaskDifficulty,
  #[serde(default = "default_estimated_minutes")]
  pub estimated_minutes: i64,
  #[serde(default)]
  pub due_at: Option<DateTime<Utc>>,
}

fn default_estimated_minutes() -> i64 {
  20
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_category_from_str() {
    assert_eq!(TaskCategory::from_str("reading"), Some(TaskCategory::Reading));
    assert_eq!(TaskCategory::from_str("grammar"), Some(TaskCategory::Grammar));
    assert_eq!(TaskCategory::from_str("READING"), None);
    assert_eq!(TaskCategory::from_str(""), None);
  }

  #[test]
  fn test_category_as_str_roundtrip() {
    for cat in TaskCategory::ALL {
      assert_eq!(TaskCategory::from_str(cat.as_str()), Some(cat));
    }
  }

  #[test]
  fn test_category_all_order() {
    // Tie-break order for weak-area ranking
    assert_eq!(
      TaskCategory::ALL,
      [
        TaskCategory::Reading,
        TaskCategory::Writing,
        TaskCategory::Speaking,
        TaskCategory::Listening,
        TaskCategory::Vocabulary,
        TaskCategory::Grammar,
      ]
    );
  }

  #[test]
  fn test_difficulty_roundtrip() {
    for diff in [TaskDifficulty::Easy, TaskDifficulty::Medium, TaskDifficulty::Hard] {
      assert_eq!(TaskDifficulty::from_str(diff.as_str()), Some(diff));
    }
    assert_eq!(TaskDifficulty::from_str("extreme"), None);
  }

  #[test]
  fn test_difficulty_points() {
    assert!((TaskDifficulty::Easy.points() - 1.0).abs() < f64::EPSILON);
    assert!((TaskDifficulty::Medium.points() - 1.5).abs() < f64::EPSILON);
    assert!((TaskDifficulty::Hard.points() - 2.0).abs() < f64::EPSILON);
  }

  #[test]
  fn test_difficulty_estimates() {
    assert_eq!(TaskDifficulty::Easy.estimated_minutes(), 15);
    assert_eq!(TaskDifficulty::Medium.estimated_minutes(), 20);
    assert_eq!(TaskDifficulty::Hard.estimated_minutes(), 25);
  }

  #[test]
  fn test_status_roundtrip() {
    for status in [TaskStatus::Planned, TaskStatus::InProgress, TaskStatus::Completed] {
      assert_eq!(TaskStatus::from_str(status.as_str()), Some(status));
    }
    assert_eq!(TaskStatus::from_str("in-progress"), None);
  }

  #[test]
  fn test_status_serde_wire_form() {
    let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
    assert_eq!(json, "\"in_progress\"");
    let parsed: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
    assert_eq!(parsed, TaskStatus::Completed);
  }
}
