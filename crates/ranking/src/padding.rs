//! Fixed-length context windows.
//!
//! The ranker consumes exactly `num_turns` sentences per example. Shorter
//! contexts are padded with empty sentences and longer ones are cut.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the context receives padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Pad on the left and keep the most recent turns. Turns older than the
    /// context depth are blanked.
    #[default]
    Pre,
    /// Pad on the right and keep the earliest turns. No blanking.
    Post,
}

impl FromStr for Padding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            other => Err(format!("unknown padding '{other}', expected 'pre' or 'post'")),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => f.write_str("pre"),
            Self::Post => f.write_str("post"),
        }
    }
}

/// Align `context` to exactly `num_turns` sentences.
///
/// With [`Padding::Pre`] only the last `context_depth` positions of the
/// window keep their text; a depth of `num_turns` or more blanks nothing.
/// `context_depth` is ignored for [`Padding::Post`].
pub fn expand_context(
    context: &[String],
    num_turns: usize,
    context_depth: usize,
    padding: Padding,
) -> Vec<String> {
    match padding {
        Padding::Post => {
            let mut window: Vec<String> = context.iter().take(num_turns).cloned().collect();
            window.resize(num_turns, String::new());
            window
        }
        Padding::Pre => {
            let recent = &context[context.len().saturating_sub(num_turns)..];
            let mut window = vec![String::new(); num_turns - recent.len()];
            window.extend_from_slice(recent);

            // Erase everything before the desired depth.
            let visible_from = num_turns.saturating_sub(context_depth);
            for turn in &mut window[..visible_from] {
                turn.clear();
            }
            window
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pre_pads_left_and_blanks_beyond_depth() {
        let window = expand_context(&turns(&["hello", "how are you", "hi"]), 10, 2, Padding::Pre);
        assert_eq!(
            window,
            turns(&["", "", "", "", "", "", "", "", "how are you", "hi"])
        );
    }

    #[test]
    fn pre_keeps_most_recent_turns() {
        let context: Vec<String> = (0..15).map(|i| format!("t{i}")).collect();
        let window = expand_context(&context, 10, 10, Padding::Pre);
        assert_eq!(window.len(), 10);
        assert_eq!(window.first().map(String::as_str), Some("t5"));
        assert_eq!(window.last().map(String::as_str), Some("t14"));
    }

    #[test]
    fn pre_depth_beyond_window_blanks_nothing() {
        let window = expand_context(&turns(&["a", "b", "c"]), 4, 50, Padding::Pre);
        assert_eq!(window, turns(&["", "a", "b", "c"]));
    }

    #[test]
    fn pre_blanks_padded_text_inside_full_window() {
        let context: Vec<String> = (0..10).map(|i| format!("t{i}")).collect();
        let window = expand_context(&context, 10, 3, Padding::Pre);
        assert!(window[..7].iter().all(String::is_empty));
        assert_eq!(window[7..], turns(&["t7", "t8", "t9"])[..]);
    }

    #[test]
    fn pre_on_empty_context_is_all_padding() {
        let window = expand_context(&[], 5, 1, Padding::Pre);
        assert_eq!(window, vec![String::new(); 5]);
    }

    #[test]
    fn post_pads_right_without_blanking() {
        let window = expand_context(&turns(&["a", "b"]), 4, 1, Padding::Post);
        assert_eq!(window, turns(&["a", "b", "", ""]));
    }

    #[test]
    fn post_truncates_keeping_the_head() {
        let window = expand_context(&turns(&["a", "b", "c", "d", "e"]), 3, 1, Padding::Post);
        assert_eq!(window, turns(&["a", "b", "c"]));
    }

    #[test]
    fn padding_parses_and_displays() {
        assert_eq!("pre".parse::<Padding>(), Ok(Padding::Pre));
        assert_eq!("post".parse::<Padding>(), Ok(Padding::Post));
        assert!("middle".parse::<Padding>().is_err());
        assert_eq!(Padding::Post.to_string(), "post");
        assert_eq!(Padding::default(), Padding::Pre);
    }

    #[test]
    fn padding_serde_uses_lowercase() {
        let json = serde_json::to_string(&Padding::Post).unwrap();
        assert_eq!(json, "\"post\"");
        let parsed: Padding = serde_json::from_str("\"pre\"").unwrap();
        assert_eq!(parsed, Padding::Pre);
    }
}
