use std::collections::HashSet;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::slice;

use serde::{Deserialize, Serialize};

use crate::model::task::Task;
use crate::ops::search::{self, SearchQuery};
use crate::parse;

/// An ordered sequence of tasks, optionally bound to a file path used by
/// the [`load`](TaskList::load)/[`save`](TaskList::save) convenience
/// methods.
///
/// Order is insertion order and determines serialization order. Equality
/// compares the task sequence only, never the bound path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl TaskList {
    pub fn new() -> TaskList {
        TaskList::default()
    }

    /// Parse a whole todo.txt document. Each line is trimmed and parsed
    /// independently; lines whose derived text is empty are skipped.
    pub fn from_string(input: &str) -> TaskList {
        TaskList {
            tasks: parse::parse_string(input),
            path: None,
        }
    }

    /// Re-parse `input`, replacing the current contents. The bound path,
    /// if any, is retained.
    pub fn set_from_string(&mut self, input: &str) {
        self.tasks = parse::parse_string(input);
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Replace the task at `index`, or append when `index` is `None`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: Option<usize>, task: Task) {
        match index {
            Some(i) => self.tasks[i] = task,
            None => self.tasks.push(task),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Bind this list to a file path for [`load`](TaskList::load) and
    /// [`save`](TaskList::save).
    pub fn bind(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn bound_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Tasks with `completed == false`, relative order preserved.
    pub fn incomplete(&self) -> TaskList {
        self.tasks.iter().filter(|t| !t.completed()).cloned().collect()
    }

    /// Tasks with `completed == true`, relative order preserved.
    pub fn completed(&self) -> TaskList {
        self.tasks.iter().filter(|t| t.completed()).cloned().collect()
    }

    /// A new list ordered by task text (lexicographic). `self` is left
    /// unmodified.
    pub fn sorted(&self) -> TaskList {
        let mut tasks = self.tasks.clone();
        tasks.sort_by(|a, b| a.text.cmp(&b.text));
        tasks.into_iter().collect()
    }

    /// Tasks whose projects intersect the requested names, in original
    /// order, each at most once.
    pub fn with_projects(&self, filter: impl Into<NameFilter>) -> TaskList {
        let names = filter.into().into_set();
        self.tasks
            .iter()
            .filter(|t| t.projects.iter().any(|p| names.contains(p.as_str())))
            .cloned()
            .collect()
    }

    /// Tasks whose contexts intersect the requested names, in original
    /// order, each at most once.
    pub fn with_contexts(&self, filter: impl Into<NameFilter>) -> TaskList {
        let names = filter.into().into_set();
        self.tasks
            .iter()
            .filter(|t| t.contexts.iter().any(|c| names.contains(c.as_str())))
            .cloned()
            .collect()
    }

    /// Conjunction search over all criteria in `query`; see
    /// [`SearchQuery`]. Returns `(index, task)` pairs in original order.
    pub fn search(&self, query: &SearchQuery) -> Vec<(usize, &Task)> {
        search::search(self, query)
    }

    /// Each task as a plain JSON object keyed by its field names.
    pub fn to_dicts(&self) -> Result<Vec<serde_json::Value>, serde_json::Error> {
        self.tasks.iter().map(serde_json::to_value).collect()
    }

    /// Build a list from plain JSON objects, applying the same field
    /// validation and completion coupling as task deserialization.
    pub fn from_dicts(values: Vec<serde_json::Value>) -> Result<TaskList, serde_json::Error> {
        values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Task>, _>>()
            .map(|tasks| tasks.into_iter().collect())
    }
}

impl PartialEq for TaskList {
    fn eq(&self, other: &Self) -> bool {
        self.tasks == other.tasks
    }
}

impl Eq for TaskList {}

impl Index<usize> for TaskList {
    type Output = Task;

    fn index(&self, index: usize) -> &Task {
        &self.tasks[index]
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> TaskList {
        TaskList {
            tasks: iter.into_iter().collect(),
            path: None,
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl IntoIterator for TaskList {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.into_iter()
    }
}

/// A project/context name filter: a single name or several. Normalized to
/// a set at the call boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    One(String),
    Many(Vec<String>),
}

impl NameFilter {
    fn into_set(self) -> HashSet<String> {
        match self {
            NameFilter::One(name) => HashSet::from([name]),
            NameFilter::Many(names) => names.into_iter().collect(),
        }
    }
}

impl From<&str> for NameFilter {
    fn from(name: &str) -> NameFilter {
        NameFilter::One(name.to_string())
    }
}

impl From<String> for NameFilter {
    fn from(name: String) -> NameFilter {
        NameFilter::One(name)
    }
}

impl From<Vec<String>> for NameFilter {
    fn from(names: Vec<String>) -> NameFilter {
        NameFilter::Many(names)
    }
}

impl From<Vec<&str>> for NameFilter {
    fn from(names: Vec<&str>) -> NameFilter {
        NameFilter::Many(names.into_iter().map(str::to_string).collect())
    }
}
