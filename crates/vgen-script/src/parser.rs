//! Structured script parsing.
//!
//! Long-form scripts are laid out as labelled blocks (HOOK, PROMISE,
//! SECTION N, RECAP, CTA), each header on its own line with free-form
//! narration underneath. The parser is tolerant: unknown lines belong to
//! the nearest preceding header, and a script with no headers at all
//! becomes one catch-all section.

use std::sync::LazyLock;

use regex::Regex;

use vgen_models::Section;

/// Matches a section header at the start of a line, e.g. `HOOK (0-30 s):`,
/// `SECTION 2: The Core Idea`, `RECAP:`.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(HOOK|PROMISE|RECAP|CTA|SECTION\s+\d+)\b").unwrap()
});

/// Split a raw script into its labelled sections.
///
/// The header line itself (trimmed) becomes the section title; following
/// non-header lines are joined with single spaces as the content. Sections
/// whose content is empty after trimming are dropped. A non-empty script
/// with no recognised headers yields a single section titled `SCRIPT`;
/// an empty script yields no sections.
pub fn parse_sections(script: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in script.lines() {
        if HEADER_RE.is_match(line) {
            flush(&mut sections, current.take());
            current = Some((line.trim().to_string(), Vec::new()));
        } else {
            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            match current.as_mut() {
                Some((_, body)) => body.push(text.to_string()),
                // Preamble before any header gets the catch-all title
                None => current = Some(("SCRIPT".to_string(), vec![text.to_string()])),
            }
        }
    }
    flush(&mut sections, current);
    sections
}

fn flush(sections: &mut Vec<Section>, pending: Option<(String, Vec<String>)>) {
    if let Some((title, body)) = pending {
        let content = body.join(" ");
        if !content.trim().is_empty() {
            sections.push(Section::new(title, content));
        }
    }
}
