//! Truncation, pluralization, indentation and wrapping.

/// [`truncate_with`] using the `"..."` suffix and whole-word breaking.
#[must_use]
pub fn truncate(s: &str, max_length: usize) -> String {
    truncate_with(s, max_length, "...", true)
}

/// Shorten `s` to at most `max_length` characters, appending `suffix`.
///
/// Strings at or under the limit pass through unchanged. With
/// `whole_words`, the cut backs up to the last whitespace inside the kept
/// region; when the kept region has no whitespace the plain cut is used,
/// so a single long word still truncates. When `max_length` is smaller
/// than the suffix itself, the suffix is returned as-is.
#[must_use]
pub fn truncate_with(s: &str, max_length: usize, suffix: &str, whole_words: bool) -> String {
    if s.chars().count() <= max_length {
        return s.to_owned();
    }

    let budget = max_length.saturating_sub(suffix.chars().count());
    let kept: String = s.chars().take(budget).collect();

    let kept = if whole_words {
        kept.rfind(char::is_whitespace)
            .map_or(kept.as_str(), |pos| kept[..pos].trim_end())
            .to_owned()
    } else {
        kept
    };

    format!("{kept}{suffix}")
}

/// [`pluralize_with`] using the regular `+s` plural.
#[must_use]
pub fn pluralize(count: i64, singular: &str) -> String {
    let plural = format!("{singular}s");
    pluralize_with(count, singular, &plural)
}

/// `"1 file"`, `"5 files"`, `"2 children"`: the word agrees with `count`.
#[must_use]
pub fn pluralize_with(count: i64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// [`indent_with`] using `spaces` space characters.
#[must_use]
pub fn indent(s: &str, spaces: usize) -> String {
    indent_with(s, &" ".repeat(spaces))
}

/// Prefix every line containing non-whitespace with `prefix`.
///
/// Blank lines stay bare so indented blocks keep clean paragraph breaks.
#[must_use]
pub fn indent_with(s: &str, prefix: &str) -> String {
    s.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_owned()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greedy word wrap to `width` characters per line.
///
/// Paragraphs (separated by blank lines) wrap independently and stay
/// separated by a single blank line. Words longer than `width` stand on
/// their own line; nothing is ever split mid-word.
#[must_use]
pub fn wrap_text(s: &str, width: usize) -> String {
    s.split("\n\n")
        .map(|paragraph| wrap_paragraph(paragraph, width))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn wrap_paragraph(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0_usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
