pub mod markdown;
pub mod search;

pub use markdown::{MarkdownOptions, render_list, render_task};
pub use search::{SearchQuery, search};
