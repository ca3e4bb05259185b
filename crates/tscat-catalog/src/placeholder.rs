//! Positional placeholder markers
//!
//! A marker is `%` followed by an optional `L` and one or two digits with a
//! value between 1 and 99; the second digit is taken greedily, so `%10` is
//! marker ten. `%n` (or `%Ln`) is the count marker of numerus messages.
//! Everything else, including `%0` and a lone `%`, is literal text.

use std::collections::BTreeSet;

use crate::error::SubstitutionError;

/// What a marker stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerKind {
    /// `%1`..`%99`
    Positional(u8),
    /// `%n`
    Count,
}

/// A marker and its byte span in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Marker {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) kind: MarkerKind,
}

/// Iterator over the markers of a string, left to right
pub(crate) struct Markers<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Markers<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn marker_at(&self, start: usize) -> Option<Marker> {
        let mut cursor = start + 1;
        if self.bytes.get(cursor) == Some(&b'L') {
            cursor += 1;
        }

        match self.bytes.get(cursor).copied() {
            Some(b'n') => Some(Marker {
                start,
                end: cursor + 1,
                kind: MarkerKind::Count,
            }),
            Some(first @ b'1'..=b'9') => {
                let mut index = first - b'0';
                let mut end = cursor + 1;
                if let Some(second @ b'0'..=b'9') = self.bytes.get(end).copied() {
                    index = index * 10 + (second - b'0');
                    end += 1;
                }
                Some(Marker {
                    start,
                    end,
                    kind: MarkerKind::Positional(index),
                })
            }
            _ => None,
        }
    }
}

impl Iterator for Markers<'_> {
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            if self.bytes[start] == b'%' {
                if let Some(marker) = self.marker_at(start) {
                    self.pos = marker.end;
                    return Some(marker);
                }
            }
            self.pos += 1;
        }
        None
    }
}

/// Replace `%1`..`%99` with `args[0]`..`args[98]`.
///
/// Substituted text is not scanned again. `%n` is left untouched.
///
/// # Errors
///
/// Returns [`SubstitutionError::MissingArgument`] when a marker refers past
/// the end of `args`. Surplus arguments are ignored.
pub fn substitute(text: &str, args: &[&str]) -> Result<String, SubstitutionError> {
    render(text, None, args)
}

/// Like [`substitute`], and also replace `%n` / `%Ln` with `count`.
///
/// # Errors
///
/// As [`substitute`].
pub fn substitute_plural(text: &str, count: i64, args: &[&str]) -> Result<String, SubstitutionError> {
    render(text, Some(count), args)
}

fn render(text: &str, count: Option<i64>, args: &[&str]) -> Result<String, SubstitutionError> {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;

    for marker in Markers::new(text) {
        let replacement = match marker.kind {
            MarkerKind::Positional(index) => {
                let slot = usize::from(index) - 1;
                let arg = args.get(slot).ok_or(SubstitutionError::MissingArgument {
                    index,
                    supplied: args.len(),
                })?;
                (*arg).to_string()
            }
            MarkerKind::Count => match count {
                Some(n) => n.to_string(),
                None => continue,
            },
        };

        output.push_str(&text[copied..marker.start]);
        output.push_str(&replacement);
        copied = marker.end;
    }

    output.push_str(&text[copied..]);
    Ok(output)
}

/// The set of positional marker indices used in `text`
pub fn markers(text: &str) -> BTreeSet<u8> {
    Markers::new(text)
        .filter_map(|marker| match marker.kind {
            MarkerKind::Positional(index) => Some(index),
            MarkerKind::Count => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_marker() {
        assert_eq!(
            substitute("QField Version: %1", &["3.2"]).unwrap(),
            "QField Version: 3.2"
        );
    }

    #[test]
    fn test_out_of_order_markers() {
        let text = "Value \"%1\" %4 could not be converted for field %2(%3).";
        assert_eq!(
            substitute(text, &["a", "b", "c", "d"]).unwrap(),
            "Value \"a\" d could not be converted for field b(c)."
        );
    }

    #[test]
    fn test_missing_argument_is_an_error() {
        let err = substitute("QField Version: %1 (%2)", &["3.2"]).unwrap_err();
        assert_eq!(err, SubstitutionError::MissingArgument { index: 2, supplied: 1 });
    }

    #[test]
    fn test_literal_percent_sequences() {
        assert_eq!(substitute("100% done, %0, %x, %", &[]).unwrap(), "100% done, %0, %x, %");
    }

    #[test]
    fn test_two_digit_marker_is_greedy() {
        let args: Vec<String> = (1..=10).map(|i| format!("<{i}>")).collect();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        assert_eq!(substitute("%10 then %1", &args).unwrap(), "<10> then <1>");
    }

    #[test]
    fn test_localized_marker() {
        assert_eq!(substitute("%L1 m", &["1,5"]).unwrap(), "1,5 m");
    }

    #[test]
    fn test_arguments_are_not_rescanned() {
        assert_eq!(substitute("%1 and %2", &["%2", "b"]).unwrap(), "%2 and b");
    }

    #[test]
    fn test_count_marker() {
        assert_eq!(substitute("%n files", &[]).unwrap(), "%n files");
        assert_eq!(substitute_plural("%n files in %1", 3, &["Inbox"]).unwrap(), "3 files in Inbox");
        assert_eq!(substitute_plural("%Ln files", 1200, &[]).unwrap(), "1200 files");
    }

    #[test]
    fn test_marker_set() {
        let found = markers("Default value expression for %1:%2 has parser error: %3 (%n, %1)");
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_non_ascii_text_around_markers() {
        assert_eq!(
            substitute("Įkeliamas projektas: %1 ✓", &["Miškai"]).unwrap(),
            "Įkeliamas projektas: Miškai ✓"
        );
    }
}
