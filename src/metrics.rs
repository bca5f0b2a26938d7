//! Pure scoring functions. Nothing here touches session state.
//!
//! Accuracy is a positional match against the reference: position `i` counts
//! when `input[i] == reference[i]`, divided by the reference length. There is
//! no alignment or edit distance, so an inserted character shifts everything
//! after it into the "incorrect" column. Characters typed past the end of the
//! reference are ignored.

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage of reference positions matched by the input, rounded to one
/// decimal place. An empty reference scores 0.
pub fn accuracy(reference: &str, input: &str) -> f64 {
    let reference_len = reference.chars().count();
    if reference_len == 0 {
        return 0.0;
    }

    let correct = reference
        .chars()
        .zip(input.chars())
        .filter(|(expected, typed)| expected == typed)
        .count();

    round_to_tenth(correct as f64 / reference_len as f64 * 100.0)
}

pub fn word_count(input: &str) -> usize {
    input.split_whitespace().count()
}

/// Words per minute over `elapsed_secs`, rounded to one decimal place.
///
/// Returns `None` when no time has elapsed; callers keep their previous rate
/// in that case rather than zeroing it.
pub fn words_per_minute(input: &str, elapsed_secs: u32) -> Option<f64> {
    if elapsed_secs == 0 {
        return None;
    }

    let minutes = elapsed_secs as f64 / 60.0;
    Some(round_to_tenth(word_count(input) as f64 / minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(66.666), 66.7);
        assert_eq!(round_to_tenth(12.34), 12.3);
        assert_eq!(round_to_tenth(0.0), 0.0);
        assert_eq!(round_to_tenth(100.0), 100.0);
    }

    #[test]
    fn test_accuracy_partial_match() {
        assert_eq!(accuracy("cat", "cax"), 66.7);
    }

    #[test]
    fn test_accuracy_progression_while_typing_reference() {
        assert_eq!(accuracy("cat", "c"), 33.3);
        assert_eq!(accuracy("cat", "ca"), 66.7);
        assert_eq!(accuracy("cat", "cat"), 100.0);
    }

    #[test]
    fn test_accuracy_empty_input() {
        assert_eq!(accuracy("cat", ""), 0.0);
    }

    #[test]
    fn test_accuracy_empty_reference() {
        assert_eq!(accuracy("", "anything"), 0.0);
        assert_eq!(accuracy("", ""), 0.0);
    }

    #[test]
    fn test_accuracy_ignores_overflow() {
        assert_eq!(accuracy("cat", "catapult"), 100.0);
        assert_eq!(accuracy("cat", "cxtxxxx"), 66.7);
    }

    #[test]
    fn test_accuracy_is_positional() {
        // one inserted character shifts the rest out of alignment
        assert_eq!(accuracy("abcd", "xabcd"), 0.0);
    }

    #[test]
    fn test_accuracy_multibyte_characters() {
        let reference = "it’s bad";
        assert_eq!(accuracy(reference, "it’s bad"), 100.0);
        assert_eq!(accuracy(reference, "it's bad"), 87.5);
    }

    #[test]
    fn test_accuracy_never_exceeds_bounds() {
        for input in ["", "z", "cat", "cattle", "xxxxxxxxxxxx"] {
            let acc = accuracy("cat", input);
            assert!((0.0..=100.0).contains(&acc), "{input} -> {acc}");
        }
    }

    #[test]
    fn test_word_count_collapses_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("hello"), 1);
        assert_eq!(word_count("  the   best\tway \n"), 3);
    }

    #[test]
    fn test_words_per_minute_zero_elapsed_is_skipped() {
        assert_eq!(words_per_minute("hello world", 0), None);
    }

    #[test]
    fn test_words_per_minute_basic() {
        assert_eq!(words_per_minute("hello", 60), Some(1.0));
        assert_eq!(words_per_minute("hello world", 30), Some(4.0));
        assert_eq!(words_per_minute("one two three", 7), Some(25.7));
    }

    #[test]
    fn test_words_per_minute_no_words() {
        assert_eq!(words_per_minute("", 10), Some(0.0));
        assert_eq!(words_per_minute("   ", 10), Some(0.0));
    }
}
