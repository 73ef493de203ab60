use std::fmt;

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A task priority: a single uppercase letter `A`–`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Priority(char);

/// Error for a priority character outside `A`–`Z`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("priority must be a single uppercase letter A-Z, got {0:?}")]
pub struct InvalidPriority(pub char);

impl Priority {
    /// Construct a priority, returning `None` unless `c` is in `A`–`Z`.
    pub fn new(c: char) -> Option<Priority> {
        c.is_ascii_uppercase().then_some(Priority(c))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Priority {
    type Error = InvalidPriority;

    fn try_from(c: char) -> Result<Priority, InvalidPriority> {
        Priority::new(c).ok_or(InvalidPriority(c))
    }
}

impl From<Priority> for char {
    fn from(p: Priority) -> char {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One todo.txt task with all its parsed fields.
///
/// `completed` and `completion_date` are kept in sync at all times: a task
/// without a completion date may still be completed, but a completion date
/// implies completion, and marking a task incomplete clears the date. The
/// pair is private so the coupling cannot be bypassed; use
/// [`Task::mark_complete`], [`Task::mark_complete_on`],
/// [`Task::mark_incomplete`], or [`Task::set_completion_date`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTask")]
pub struct Task {
    /// Free text left after stripping structural tokens
    pub text: String,
    completed: bool,
    /// `YYYY-MM-DD`, present only on completed tasks
    completion_date: Option<String>,
    /// Optional priority letter
    pub priority: Option<Priority>,
    /// `YYYY-MM-DD` creation date
    pub creation_date: Option<String>,
    /// `+project` tags, without the `+` (unique, insertion order preserved)
    pub projects: IndexSet<String>,
    /// `@context` tags, without the `@` (unique, insertion order preserved)
    pub contexts: IndexSet<String>,
    /// `key:value` tags; duplicate keys within a line resolve last-wins
    pub tags: IndexMap<String, String>,
}

impl Task {
    /// Create an incomplete task with the given text and nothing else set.
    pub fn new(text: impl Into<String>) -> Task {
        Task {
            text: text.into(),
            ..Task::default()
        }
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn completion_date(&self) -> Option<&str> {
        self.completion_date.as_deref()
    }

    /// Mark the task completed without recording a completion date.
    /// An existing completion date is kept.
    pub fn mark_complete(&mut self) {
        self.completed = true;
    }

    /// Mark the task completed on the given date.
    pub fn mark_complete_on(&mut self, date: NaiveDate) {
        self.completed = true;
        self.completion_date = Some(format_date(date));
    }

    /// Mark the task incomplete, clearing any completion date.
    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completion_date = None;
    }

    /// Set or clear the completion date, re-deriving the completed flag:
    /// `Some` marks the task completed, `None` marks it incomplete.
    pub fn set_completion_date(&mut self, date: Option<NaiveDate>) {
        match date {
            Some(date) => self.mark_complete_on(date),
            None => self.mark_incomplete(),
        }
    }

    /// Set or clear the creation date, normalized to `YYYY-MM-DD`.
    pub fn set_creation_date(&mut self, date: Option<NaiveDate>) {
        self.creation_date = date.map(format_date);
    }

    /// Parser entry point: install pre-validated completion state. Applies
    /// the same coupling as the public setters.
    pub(crate) fn set_completion_raw(&mut self, completed: bool, completion_date: Option<String>) {
        self.completed = completed || completion_date.is_some();
        self.completion_date = if self.completed { completion_date } else { None };
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Mirror of [`Task`] with every field public and defaulted, used as the
/// deserialization surface so the completion coupling can be re-applied to
/// whatever an external record claims.
#[derive(Debug, Default, Deserialize)]
struct RawTask {
    #[serde(default)]
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    completion_date: Option<String>,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    creation_date: Option<String>,
    #[serde(default)]
    projects: IndexSet<String>,
    #[serde(default)]
    contexts: IndexSet<String>,
    #[serde(default)]
    tags: IndexMap<String, String>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Task {
        let mut task = Task {
            text: raw.text,
            completed: false,
            completion_date: None,
            priority: raw.priority,
            creation_date: raw.creation_date,
            projects: raw.projects,
            contexts: raw.contexts,
            tags: raw.tags,
        };
        // A completion date on a record that says incomplete is dropped;
        // a completion date with completed set is kept as-is.
        if raw.completed {
            task.set_completion_raw(true, raw.completion_date);
        }
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_priority_validation() {
        assert_eq!(Priority::new('A').map(|p| p.as_char()), Some('A'));
        assert_eq!(Priority::new('Z').map(|p| p.as_char()), Some('Z'));
        assert!(Priority::new('a').is_none());
        assert!(Priority::new('1').is_none());
        assert!(Priority::try_from('(').is_err());
    }

    #[test]
    fn test_mark_complete_on_sets_date() {
        let mut task = Task::new("Pay bills");
        task.mark_complete_on(date(2020, 1, 2));
        assert!(task.completed());
        assert_eq!(task.completion_date(), Some("2020-01-02"));
    }

    #[test]
    fn test_mark_incomplete_clears_date() {
        let mut task = Task::new("Pay bills");
        task.mark_complete_on(date(2020, 1, 2));
        task.mark_incomplete();
        assert!(!task.completed());
        assert_eq!(task.completion_date(), None);
    }

    #[test]
    fn test_completion_date_drives_completed_flag() {
        let mut task = Task::new("Pay bills");
        task.set_completion_date(Some(date(2020, 1, 2)));
        assert!(task.completed());
        task.set_completion_date(None);
        assert!(!task.completed());
        assert_eq!(task.completion_date(), None);
    }

    #[test]
    fn test_mark_complete_without_date() {
        let mut task = Task::new("Pay bills");
        task.mark_complete();
        assert!(task.completed());
        assert_eq!(task.completion_date(), None);
    }

    #[test]
    fn test_coupling_invariant_under_mutation_sequences() {
        let mut task = Task::new("Pay bills");
        task.mark_complete_on(date(2020, 1, 2));
        task.mark_incomplete();
        task.mark_complete();
        task.set_completion_date(Some(date(2021, 6, 30)));
        task.set_completion_date(None);
        task.mark_complete_on(date(2022, 3, 1));
        assert_eq!(task.completed(), task.completion_date().is_some());
        task.mark_incomplete();
        assert_eq!(task.completed(), task.completion_date().is_some());
    }

    #[test]
    fn test_set_creation_date_normalizes() {
        let mut task = Task::new("Call Mom");
        task.set_creation_date(Some(date(2020, 7, 4)));
        assert_eq!(task.creation_date.as_deref(), Some("2020-07-04"));
        task.set_creation_date(None);
        assert_eq!(task.creation_date, None);
    }

    #[test]
    fn test_equality_ignores_set_order() {
        let mut a = Task::new("Buy milk");
        a.projects.insert("Errands".to_string());
        a.projects.insert("Home".to_string());
        let mut b = Task::new("Buy milk");
        b.projects.insert("Home".to_string());
        b.projects.insert("Errands".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_dict_round_trip() {
        let mut task = Task::new("Buy milk");
        task.priority = Priority::new('A');
        task.creation_date = Some("2020-01-01".to_string());
        task.mark_complete_on(date(2020, 1, 2));
        task.projects.insert("Errands".to_string());
        task.contexts.insert("Home".to_string());
        task.tags.insert("due".to_string(), "2020-01-05".to_string());

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["text"], "Buy milk");
        assert_eq!(value["completed"], true);
        assert_eq!(value["priority"], "A");
        assert_eq!(value["tags"]["due"], "2020-01-05");

        let back: Task = serde_json::from_value(value).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_deserialize_reapplies_coupling() {
        // Incomplete record carrying a completion date: the date is dropped.
        let task: Task = serde_json::from_value(serde_json::json!({
            "text": "Buy milk",
            "completed": false,
            "completion_date": "2020-01-02",
        }))
        .unwrap();
        assert!(!task.completed());
        assert_eq!(task.completion_date(), None);
    }

    #[test]
    fn test_deserialize_rejects_wrong_shapes() {
        assert!(
            serde_json::from_value::<Task>(serde_json::json!({
                "text": "Buy milk",
                "projects": "Errands",
            }))
            .is_err()
        );
        assert!(
            serde_json::from_value::<Task>(serde_json::json!({
                "text": "Buy milk",
                "tags": ["due"],
            }))
            .is_err()
        );
        assert!(
            serde_json::from_value::<Task>(serde_json::json!({
                "text": "Buy milk",
                "priority": "a",
            }))
            .is_err()
        );
    }
}
