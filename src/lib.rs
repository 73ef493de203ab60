//! Parser, serializer, and collection API for the
//! [todo.txt](http://todotxt.org/) plain-text task format.
//!
//! A line like
//! `x 2020-01-02 (A) 2020-01-01 Buy milk +Errands @Home due:2020-01-05`
//! maps to a [`Task`] and back; a [`TaskList`] holds tasks in order and
//! offers partitioning, grouping, multi-criteria search, and file
//! persistence with a pre-save backup.
//!
//! ```
//! use todotxt::{SearchQuery, TaskList};
//!
//! let list = TaskList::from_string(
//!     "(A) Call Mom +Family @phone\n\
//!      x 2020-01-02 Pay bills +Home",
//! );
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.incomplete().len(), 1);
//!
//! let query = SearchQuery {
//!     completed: Some(false),
//!     ..SearchQuery::default()
//! };
//! let hits = list.search(&query);
//! assert_eq!(hits[0].1.text, "Call Mom");
//!
//! assert_eq!(list.to_string().lines().count(), 2);
//! ```

pub mod io;
pub mod model;
pub mod ops;
pub mod parse;

pub use io::{BACKUP_SUFFIX, FileError};
pub use model::{InvalidPriority, NameFilter, Priority, Task, TaskList};
pub use ops::{MarkdownOptions, SearchQuery};
