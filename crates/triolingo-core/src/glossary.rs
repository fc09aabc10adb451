//! Inline glossary markup in question prompts.
//!
//! A prompt may contain spans of the form `[word](definition)`. The
//! presentation layer turns them into hoverable words or footnotes; the
//! quiz itself treats the prompt as opaque text.

use std::fmt;

/// One piece of a parsed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSegment {
    /// Text outside any markup, preserved verbatim.
    Text(String),
    /// A glossed word with its definition.
    Gloss { word: String, definition: String },
}

impl fmt::Display for PromptSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptSegment::Text(text) => write!(f, "{text}"),
            PromptSegment::Gloss { word, .. } => write!(f, "{word}"),
        }
    }
}

/// Split a prompt into text and glossary segments.
///
/// A span is `[`, one or more characters other than `]`, `](`, one or more
/// characters other than `)`, then `)`. Spans are matched leftmost-first and
/// never overlap. Anything that does not form a complete span stays text.
/// A prompt without markup comes back as a single `Text` segment.
pub fn parse_prompt(prompt: &str) -> Vec<PromptSegment> {
    let mut segments = Vec::new();
    let mut last = 0;
    let mut pos = 0;

    while let Some(offset) = prompt[pos..].find('[') {
        let open = pos + offset;
        match match_span(prompt, open) {
            Some((word, definition, end)) => {
                if open > last {
                    segments.push(PromptSegment::Text(prompt[last..open].to_string()));
                }
                segments.push(PromptSegment::Gloss {
                    word: word.to_string(),
                    definition: definition.to_string(),
                });
                last = end;
                pos = end;
            }
            None => pos = open + 1,
        }
    }

    if last < prompt.len() {
        segments.push(PromptSegment::Text(prompt[last..].to_string()));
    }

    if segments.is_empty() {
        segments.push(PromptSegment::Text(prompt.to_string()));
    }
    segments
}

/// Try to match a span starting at the `[` at byte `open`.
/// Returns the word, the definition, and the byte index just past `)`.
fn match_span(prompt: &str, open: usize) -> Option<(&str, &str, usize)> {
    let word_start = open + 1;
    let close = word_start + prompt[word_start..].find(']')?;
    if close == word_start {
        return None;
    }

    let paren = close + 1;
    if !prompt[paren..].starts_with('(') {
        return None;
    }

    let def_start = paren + 1;
    let def_end = def_start + prompt[def_start..].find(')')?;
    if def_end == def_start {
        return None;
    }

    Some((
        &prompt[word_start..close],
        &prompt[def_start..def_end],
        def_end + 1,
    ))
}

/// The prompt as the learner reads it, with glossed words shown bare.
pub fn plain_text(segments: &[PromptSegment]) -> String {
    segments.iter().map(ToString::to_string).collect()
}

/// Reassemble the original markup from parsed segments.
pub fn to_markup(segments: &[PromptSegment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            PromptSegment::Text(text) => text.clone(),
            PromptSegment::Gloss { word, definition } => format!("[{word}]({definition})"),
        })
        .collect()
}

/// Glossed words and their definitions, in prompt order.
pub fn glossary(segments: &[PromptSegment]) -> Vec<(&str, &str)> {
    segments
        .iter()
        .filter_map(|segment| match segment {
            PromptSegment::Gloss { word, definition } => {
                Some((word.as_str(), definition.as_str()))
            }
            PromptSegment::Text(_) => None,
        })
        .collect()
}

/// Returns `true` if the prompt has a `[word](` that never gets its
/// closing `)`.
pub fn has_unterminated_span(prompt: &str) -> bool {
    prompt.match_indices("](").any(|(idx, _)| {
        let opened = prompt[..idx]
            .rfind('[')
            .is_some_and(|open| open + 1 < idx && !prompt[open + 1..idx].contains(']'));
        opened && !prompt[idx + 2..].contains(')')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> PromptSegment {
        PromptSegment::Text(s.to_string())
    }

    fn gloss(word: &str, definition: &str) -> PromptSegment {
        PromptSegment::Gloss {
            word: word.to_string(),
            definition: definition.to_string(),
        }
    }

    #[test]
    fn plain_prompt_is_unchanged() {
        let prompt = "What does 'Hola' mean in English?";
        assert_eq!(parse_prompt(prompt), vec![text(prompt)]);
    }

    #[test]
    fn empty_prompt_yields_single_empty_text() {
        assert_eq!(parse_prompt(""), vec![text("")]);
    }

    #[test]
    fn single_span_in_the_middle() {
        let segments = parse_prompt("What does [Hola](hello) mean?");
        assert_eq!(
            segments,
            vec![text("What does "), gloss("Hola", "hello"), text(" mean?")]
        );
    }

    #[test]
    fn adjacent_spans_and_edges() {
        let segments = parse_prompt("[el](the)[gato](cat)");
        assert_eq!(segments, vec![gloss("el", "the"), gloss("gato", "cat")]);
    }

    #[test]
    fn incomplete_markup_stays_text() {
        for prompt in [
            "[]()",
            "[word]",
            "[word] (gap)",
            "[word](",
            "brackets [like this] are fine",
        ] {
            assert_eq!(parse_prompt(prompt), vec![text(prompt)], "{prompt}");
        }
    }

    #[test]
    fn failed_open_bracket_does_not_hide_later_span() {
        let segments = parse_prompt("[a] [b](c)");
        assert_eq!(segments, vec![text("[a] "), gloss("b", "c")]);
    }

    #[test]
    fn word_may_contain_open_bracket() {
        // The word part only excludes `]`, so `[x[y](z)` glosses "x[y".
        let segments = parse_prompt("[x[y](z)");
        assert_eq!(segments, vec![gloss("x[y", "z")]);
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let prompt = "¿Cómo se dice [niño](child) en inglés? 🇪🇸";
        let segments = parse_prompt(prompt);
        assert_eq!(to_markup(&segments), prompt);
        assert_eq!(plain_text(&segments), "¿Cómo se dice niño en inglés? 🇪🇸");
    }

    #[test]
    fn markup_reconstruction_is_exact() {
        for prompt in [
            "Complete: 'Me llamo ___'",
            "[Je](I) [suis](am) ___ ([fatigué](tired))",
            "odd ] ) [ ( characters",
        ] {
            assert_eq!(to_markup(&parse_prompt(prompt)), prompt);
        }
    }

    #[test]
    fn parsing_plain_text_twice_is_stable() {
        let once = plain_text(&parse_prompt("[perro](dog) y [gato](cat)"));
        let twice = plain_text(&parse_prompt(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn glossary_lists_definitions_in_order() {
        let segments = parse_prompt("[uno](one), [dos](two)");
        assert_eq!(glossary(&segments), vec![("uno", "one"), ("dos", "two")]);
    }

    #[test]
    fn unterminated_span_detection() {
        assert!(has_unterminated_span("[word](definition"));
        assert!(!has_unterminated_span("[word](definition)"));
        assert!(!has_unterminated_span("no markup"));
    }

    #[test]
    fn closing_bracket_without_opening_is_not_a_span() {
        assert!(!has_unterminated_span("x](y"));
        assert!(!has_unterminated_span("[](y"));
        assert!(!has_unterminated_span("[a] b](y"));
        assert!(has_unterminated_span("x](y [gato](cat"));
    }
}
