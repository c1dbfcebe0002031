use crate::language::{Direction, Language};

/// Normalize input for dictionary lookups in the given direction.
///
/// Trims, collapses every whitespace run to a single space and removes the
/// source language's punctuation. Idempotent.
pub fn normalize(text: &str, direction: Direction) -> String {
    let punctuation = direction.source().punctuation();

    // Punctuation goes first so "a , b" does not leave a double space behind
    let stripped: String = text.chars().filter(|c| !punctuation.contains(c)).collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fold text for key comparison: lowercase on case-bearing scripts, unchanged otherwise
pub fn fold(text: &str, language: Language) -> String {
    if language.is_case_bearing() {
        text.to_lowercase()
    } else {
        text.to_string()
    }
}

/// Find the first occurrence of `needle` in `haystack`, comparing with [`fold`].
///
/// Returns the byte range in `haystack`, so the caller can splice into the
/// original spelling.
pub fn find_folded(haystack: &str, needle: &str, language: Language) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    if !language.is_case_bearing() {
        return haystack.find(needle).map(|start| (start, start + needle.len()));
    }

    let folded_needle = fold(needle, language);
    let needle_chars = needle.chars().count();

    for (start, _) in haystack.char_indices() {
        let window_end = haystack[start..]
            .char_indices()
            .nth(needle_chars)
            .map(|(offset, _)| start + offset)
            .unwrap_or(haystack.len());

        let window = &haystack[start..window_end];
        if window.chars().count() < needle_chars {
            break;
        }
        if fold(window, language) == folded_needle {
            return Some((start, window_end));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_english() {
        let d = Direction::EnglishToPersian;
        assert_eq!(normalize("  Hello,   world!  ", d), "Hello world");
        assert_eq!(normalize("How are you?", d), "How are you");
        assert_eq!(normalize("a\t\tb\nc", d), "a b c");
        assert_eq!(normalize("wait ; what", d), "wait what");
    }

    #[test]
    fn test_normalize_persian() {
        let d = Direction::PersianToEnglish;
        assert_eq!(normalize(" حال شما چطور است؟ ", d), "حال شما چطور است");
        assert_eq!(normalize("سلام، خوبم", d), "سلام خوبم");
        // ASCII punctuation is left alone on the Persian side
        assert_eq!(normalize("سلام!", d), "سلام!");
    }

    #[test]
    fn test_normalize_empty_and_punctuation_only() {
        assert_eq!(normalize("", Direction::EnglishToPersian), "");
        assert_eq!(normalize("   ", Direction::EnglishToPersian), "");
        assert_eq!(normalize("?!.", Direction::EnglishToPersian), "");
        assert_eq!(normalize("؟ ، ؛", Direction::PersianToEnglish), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "  Hello,   world!  ",
            "How are you? I am fine.",
            "a , b ; c",
            "\tتشکر،  ممنون؟ ",
            "",
            "!!!",
            "The  weather is   cold today.",
        ];

        for direction in Direction::ALL {
            for sample in samples {
                let once = normalize(sample, direction);
                assert_eq!(normalize(&once, direction), once, "sample {:?}", sample);
            }
        }
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("Hello World", Language::English), "hello world");
        assert_eq!(fold("سلام", Language::Persian), "سلام");
    }

    #[test]
    fn test_find_folded() {
        let text = "The Weather is cold today";
        let (start, end) = find_folded(text, "the weather is cold", Language::English).unwrap();
        assert_eq!(&text[start..end], "The Weather is cold");

        assert_eq!(find_folded("abc", "abcd", Language::English), None);
        assert_eq!(find_folded("abc", "", Language::English), None);

        let fa = "هوا سرد است امروز";
        let (start, end) = find_folded(fa, "سرد", Language::Persian).unwrap();
        assert_eq!(&fa[start..end], "سرد");
    }
}
