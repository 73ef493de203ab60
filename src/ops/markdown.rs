use indexmap::IndexSet;

use crate::model::list::TaskList;
use crate::model::task::Task;

/// Which optional suffixes to include in the markdown rendering. Each is
/// emitted only when the flag is on **and** the field is non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub priority: bool,
    pub projects: bool,
    pub contexts: bool,
}

/// Render one task as a markdown checklist line:
/// `- [ ] text` / `- [x] text`, then ` **P**`, ` (proj, …)`, ` (ctx, …)`.
pub fn render_task(task: &Task, options: MarkdownOptions) -> String {
    let checkbox = if task.completed() { "- [x]" } else { "- [ ]" };
    let mut line = format!("{} {}", checkbox, task.text);

    if options.priority
        && let Some(priority) = task.priority
    {
        line.push_str(&format!(" **{priority}**"));
    }
    if options.projects && !task.projects.is_empty() {
        line.push_str(&format!(" ({})", join_names(&task.projects)));
    }
    if options.contexts && !task.contexts.is_empty() {
        line.push_str(&format!(" ({})", join_names(&task.contexts)));
    }

    line
}

/// Render a whole list as a markdown checklist, one line per task.
pub fn render_list(list: &TaskList, options: MarkdownOptions) -> String {
    list.iter()
        .map(|task| render_task(task, options))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_names(names: &IndexSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_line;

    #[test]
    fn test_render_incomplete_and_completed() {
        let task = parse_line("Buy milk").unwrap();
        assert_eq!(render_task(&task, MarkdownOptions::default()), "- [ ] Buy milk");

        let task = parse_line("x Pay bills").unwrap();
        assert_eq!(render_task(&task, MarkdownOptions::default()), "- [x] Pay bills");
    }

    #[test]
    fn test_render_with_all_suffixes() {
        let task = parse_line("(A) Buy milk +Errands +Home @store @car").unwrap();
        let options = MarkdownOptions {
            priority: true,
            projects: true,
            contexts: true,
        };
        assert_eq!(
            render_task(&task, options),
            "- [ ] Buy milk **A** (Errands, Home) (store, car)"
        );
    }

    #[test]
    fn test_flags_gate_suffixes() {
        let task = parse_line("(A) Buy milk +Errands @store").unwrap();
        let options = MarkdownOptions {
            projects: true,
            ..MarkdownOptions::default()
        };
        assert_eq!(render_task(&task, options), "- [ ] Buy milk (Errands)");
    }

    #[test]
    fn test_empty_fields_render_nothing_even_when_enabled() {
        let task = parse_line("Buy milk").unwrap();
        let options = MarkdownOptions {
            priority: true,
            projects: true,
            contexts: true,
        };
        assert_eq!(render_task(&task, options), "- [ ] Buy milk");
    }

    #[test]
    fn test_render_list_joins_lines() {
        let list = TaskList::from_string("Call Mom\nx Pay bills");
        assert_eq!(
            render_list(&list, MarkdownOptions::default()),
            "- [ ] Call Mom\n- [x] Pay bills"
        );
    }
}
