//! Template tag scanning over the runs of a paragraph.
//!
//! Word splits text into runs at arbitrary points, so a `{{ tag }}` may start
//! in one run and end in another. Runs are grouped so that every tag and
//! every `{% if %}`/`{% for %}` block lies inside a single group.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static VARIABLE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?:\{\{-?|\{%-?\s*(?:if|elif)\s+(?:not\s+)?)\s*([A-Za-z_][A-Za-z0-9_]*)").ok()
});

const BLOCK_OPENERS: [&str; 5] = ["if", "for", "filter", "macro", "raw"];

/// Whether `text` contains a tag opener.
pub fn has_tags(text: &str) -> bool {
    text.contains("{{") || text.contains("{%") || text.contains("{#")
}

/// Top-level variable names referenced by `{{ name ... }}` and `{% if name %}`.
pub fn referenced_variables(text: &str) -> Vec<&str> {
    let Some(re) = VARIABLE.as_ref() else {
        return Vec::new();
    };
    let mut names: Vec<&str> = re
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|name| !matches!(*name, "true" | "false" | "loop" | "not"))
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

#[derive(Debug, Default)]
struct TagScanner {
    /// Closing character awaited before `}` while inside a tag.
    inside: Option<char>,
    prev: Option<char>,
    tag: String,
    depth: i32,
}

impl TagScanner {
    fn feed(&mut self, text: &str) {
        for c in text.chars() {
            match self.inside {
                None => {
                    if self.prev == Some('{') && matches!(c, '{' | '%' | '#') {
                        self.inside = Some(if c == '{' { '}' } else { c });
                        self.tag.clear();
                        self.prev = None;
                        continue;
                    }
                }
                Some(close) => {
                    if self.prev == Some(close) && c == '}' {
                        if close == '%' {
                            self.close_statement();
                        }
                        self.inside = None;
                        self.prev = None;
                        continue;
                    }
                    self.tag.push(c);
                }
            }
            self.prev = Some(c);
        }
    }

    fn close_statement(&mut self) {
        let body = self.tag.trim_end_matches('%');
        let keyword = body
            .trim_matches(|c: char| c == '-' || c.is_whitespace())
            .split_whitespace()
            .next()
            .unwrap_or_default();
        if BLOCK_OPENERS.contains(&keyword) {
            self.depth += 1;
        } else if keyword.starts_with("end") {
            self.depth -= 1;
        }
    }

    /// Outside any tag or block, with no half-seen opener.
    fn is_clean(&self) -> bool {
        self.inside.is_none() && self.depth <= 0 && self.prev != Some('{')
    }
}

/// Ranges of run indices that must be rendered together. Runs outside every
/// tag and block belong to no group.
pub fn tag_groups(runs: &[String]) -> Vec<Range<usize>> {
    let mut groups = Vec::new();
    let mut scanner = TagScanner::default();
    let mut start: Option<usize> = None;

    for (i, text) in runs.iter().enumerate() {
        scanner.feed(text);
        if start.is_none() && (has_tags(text) || !scanner.is_clean()) {
            start = Some(i);
        }
        if let Some(s) = start {
            if scanner.is_clean() {
                if has_tags(&runs[s..=i].concat()) {
                    groups.push(s..i + 1);
                }
                start = None;
            }
        }
    }
    if let Some(s) = start {
        if has_tags(&runs[s..].concat()) {
            groups.push(s..runs.len());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn tags_within_runs_keep_runs_separate() {
        let groups = tag_groups(&runs(&["Sehr geehrte ", "{{ anrede }}", " ", "{{ name }}", ","]));
        assert_eq!(groups, vec![1..2, 3..4]);
    }

    #[test]
    fn tag_split_across_runs_is_one_group() {
        assert_eq!(tag_groups(&runs(&["Hallo {{ vor", "name }}", "!"])), vec![0..2]);
        assert_eq!(tag_groups(&runs(&["Hallo {", "{ name }}", "!"])), vec![0..2]);
    }

    #[test]
    fn block_spans_its_runs() {
        let groups = tag_groups(&runs(&[
            "{% if ckd_sentence %}",
            "Es liegt ",
            "{{ ckd_sentence }}",
            "{% endif %}",
            " Ende",
        ]));
        assert_eq!(groups, vec![0..4]);
    }

    #[test]
    fn unterminated_tag_runs_to_the_end() {
        assert_eq!(tag_groups(&runs(&["a", "{{ b", "c"])), vec![1..3]);
    }

    #[test]
    fn lone_brace_is_not_a_tag() {
        assert!(tag_groups(&runs(&["{", "x", "}"])).is_empty());
    }

    #[test]
    fn variables_are_collected_once() {
        let text = "{{ anrede }} {{name}} {% if not ckd_sentence %}x{% endif %} {{ name | upper }}";
        assert_eq!(referenced_variables(text), vec!["anrede", "ckd_sentence", "name"]);
    }
}
