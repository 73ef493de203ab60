use indexmap::IndexMap;

use crate::model::list::TaskList;
use crate::model::task::{Priority, Task};

/// Multi-criteria task search. Every field left `None` is vacuously
/// satisfied; a task matches when **all** supplied criteria match
/// (multi-valued criteria like `priority` OR within themselves).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Substring of the task text
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub completion_date: Option<String>,
    pub creation_date: Option<String>,
    /// Any of these priorities (a task without priority never matches)
    pub priority: Option<Vec<Priority>>,
    /// Non-empty intersection with the task's projects
    pub projects: Option<Vec<String>>,
    /// Non-empty intersection with the task's contexts
    pub contexts: Option<Vec<String>>,
    /// At least one of these key/value pairs present on the task
    pub tags: Option<IndexMap<String, String>>,
    /// Exact match on the full task text
    pub exact: Option<String>,
}

/// Evaluate `query` against every task once, in order. Returns matching
/// `(index, task)` pairs; with an empty query this is the whole list.
pub fn search<'a>(list: &'a TaskList, query: &SearchQuery) -> Vec<(usize, &'a Task)> {
    list.iter()
        .enumerate()
        .filter(|(_, task)| matches(task, query))
        .collect()
}

fn matches(task: &Task, query: &SearchQuery) -> bool {
    if let Some(text) = &query.text
        && !task.text.contains(text.as_str())
    {
        return false;
    }
    if let Some(completed) = query.completed
        && task.completed() != completed
    {
        return false;
    }
    if let Some(date) = &query.completion_date
        && task.completion_date() != Some(date.as_str())
    {
        return false;
    }
    if let Some(date) = &query.creation_date
        && task.creation_date.as_deref() != Some(date.as_str())
    {
        return false;
    }
    if let Some(priorities) = &query.priority
        && !task.priority.is_some_and(|p| priorities.contains(&p))
    {
        return false;
    }
    if let Some(projects) = &query.projects
        && !projects.iter().any(|p| task.projects.contains(p.as_str()))
    {
        return false;
    }
    if let Some(contexts) = &query.contexts
        && !contexts.iter().any(|c| task.contexts.contains(c.as_str()))
    {
        return false;
    }
    if let Some(tags) = &query.tags
        && !tags.iter().any(|(k, v)| task.tags.get(k.as_str()) == Some(v))
    {
        return false;
    }
    if let Some(exact) = &query.exact
        && task.text != *exact
    {
        return false;
    }
    true
}
