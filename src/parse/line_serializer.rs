use std::fmt;

use crate::model::list::TaskList;
use crate::model::task::Task;

/// Serialize a task to a single todo.txt line.
///
/// Tokens are emitted in the fixed order that inverts the parse grammar:
/// `x`, completion date, `(priority)`, creation date, text, projects,
/// contexts, tags — each only when set. Projects, contexts, and tags emit
/// in stored insertion order, so serialization is deterministic.
pub fn format_line(task: &Task) -> String {
    let mut parts: Vec<String> = Vec::new();

    if task.completed() {
        parts.push("x".to_string());
    }
    if let Some(date) = task.completion_date() {
        parts.push(date.to_string());
    }
    if let Some(priority) = task.priority {
        parts.push(format!("({priority})"));
    }
    if let Some(date) = &task.creation_date {
        parts.push(date.clone());
    }

    parts.push(task.text.clone());

    for project in &task.projects {
        parts.push(format!("+{project}"));
    }
    for context in &task.contexts {
        parts.push(format!("@{context}"));
    }
    for (key, value) in &task.tags {
        parts.push(format!("{key}:{value}"));
    }

    parts.join(" ")
}

/// Serialize tasks to a newline-joined document, in sequence order.
pub fn format_lines(tasks: &[Task]) -> String {
    tasks.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_line(self))
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, task) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&format_line(task))?;
        }
        Ok(())
    }
}
