use std::sync::LazyLock;

use regex::Regex;

use crate::model::task::{Priority, Task};

/// Shape check only: `2020-13-45` is a valid date token. Semantic calendar
/// validation is out of scope for the grammar.
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date token regex"));

/// Parse a whole document: one task per line, in order, skipping lines
/// whose derived text is empty.
pub fn parse_string(input: &str) -> Vec<Task> {
    input.lines().filter_map(parse_line).collect()
}

/// Parse a single todo.txt line.
///
/// The structural prefix is consumed left to right: completion marker `x `,
/// first date, priority `(X) `, second date. On a completed line the first
/// date is the completion date and the second the creation date; on an
/// incomplete line the creation date may sit on either side of the
/// priority, whichever comes first. A structural token out of position
/// (e.g. two dates on an incomplete line) is left in the text rather than
/// dropped, so parsing never loses input silently.
///
/// The remaining text is scanned as whitespace-delimited tokens for
/// `+project`, `@context`, and `key:value` tags. Returns `None` when the
/// text left over after extraction is empty.
pub fn parse_line(line: &str) -> Option<Task> {
    let mut rest = line.trim();

    let completed = match rest.strip_prefix("x ") {
        Some(r) => {
            rest = r;
            true
        }
        None => false,
    };

    let first_date = take_date(&mut rest);
    let priority = take_priority(&mut rest);
    // A date after the priority is the creation date on completed lines
    // (the slot before the priority being the completion date) and also on
    // incomplete lines that had no date before the priority. An incomplete
    // line with dates in both slots keeps the second one as text.
    let second_date = if completed || first_date.is_none() {
        take_date(&mut rest)
    } else {
        None
    };

    let (completion_date, creation_date) = if completed {
        (first_date, second_date)
    } else {
        (None, first_date.or(second_date))
    };

    let mut task = Task::new("");
    let mut words: Vec<&str> = Vec::new();

    for token in rest.split_whitespace() {
        if let Some(name) = token.strip_prefix('+').filter(|n| !n.is_empty()) {
            task.projects.insert(name.to_string());
        } else if let Some(name) = token.strip_prefix('@').filter(|n| !n.is_empty()) {
            task.contexts.insert(name.to_string());
        } else if let Some((key, value)) = split_tag(token) {
            // Duplicate keys within one line: last occurrence wins
            task.tags.insert(key.to_string(), value.to_string());
        } else {
            words.push(token);
        }
    }

    task.text = words.join(" ");
    if task.text.is_empty() {
        return None;
    }

    task.priority = priority;
    task.creation_date = creation_date.map(str::to_string);
    task.set_completion_raw(completed, completion_date.map(str::to_string));

    Some(task)
}

/// Consume a leading `YYYY-MM-DD ` token. The trailing space is part of the
/// structural shape; a date at the very end of the line is ordinary text.
fn take_date<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let (token, remainder) = rest.split_once(' ')?;
    if DATE_TOKEN.is_match(token) {
        *rest = remainder;
        Some(token)
    } else {
        None
    }
}

/// Consume a leading `(X) ` priority token, uppercase letter only.
fn take_priority(rest: &mut &str) -> Option<Priority> {
    let bytes = rest.as_bytes();
    if bytes.len() >= 4 && bytes[0] == b'(' && bytes[2] == b')' && bytes[3] == b' ' {
        let priority = Priority::new(bytes[1] as char)?;
        *rest = &rest[4..];
        Some(priority)
    } else {
        None
    }
}

/// Split a `key:value` tag token at its last colon. Both sides must be
/// non-empty and the value must not contain a slash, which keeps URLs like
/// `http://...` in the free text.
fn split_tag(token: &str) -> Option<(&str, &str)> {
    let (key, value) = token.rsplit_once(':')?;
    if key.is_empty() || value.is_empty() || value.contains('/') {
        return None;
    }
    Some((key, value))
}
