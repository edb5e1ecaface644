//! String transformations.
//!
//! Indexes and widths count `char`s, not bytes.

use crate::error::{Result, TransformError};
use crate::Step;
use hygiene_core::PipelineBuilder;
use regex::Regex;

#[derive(Debug, Clone, Copy)]
enum Side {
    Both,
    Start,
    End,
}

fn trim_step(
    name: &'static str,
    chars: &[char],
    side: Side,
) -> Step<impl Fn(&mut String) -> Result<()>> {
    let chars = chars.to_vec();
    Step::new(name, move |value: &mut String| {
        let set = chars.as_slice();
        let trimmed = match (side, set.is_empty()) {
            (Side::Both, true) => value.trim(),
            (Side::Both, false) => value.trim_matches(set),
            (Side::Start, true) => value.trim_start(),
            (Side::Start, false) => value.trim_start_matches(set),
            (Side::End, true) => value.trim_end(),
            (Side::End, false) => value.trim_end_matches(set),
        };
        *value = trimmed.to_string();
        Ok(())
    })
}

/// Resolve a char range against `value`, failing when it runs past the end.
fn char_range(
    op: &'static str,
    value: &str,
    start: usize,
    len: Option<usize>,
) -> Result<(usize, usize)> {
    let total = value.chars().count();
    let end = len.map_or(total, |len| start.saturating_add(len));
    if start > total || end > total {
        return Err(TransformError::OutOfRange {
            op,
            start,
            end,
            len: total,
        });
    }
    Ok((start, end))
}

fn padding(fill: char, width: usize, value: &str) -> String {
    let missing = width.saturating_sub(value.chars().count());
    std::iter::repeat(fill).take(missing).collect()
}

/// String helpers for [`PipelineBuilder<String>`].
pub trait StringPipelineExt {
    /// Strip leading and trailing whitespace.
    fn trim(&self) -> &Self;

    /// Strip leading and trailing characters from `chars`; whitespace when empty.
    fn trim_chars(&self, chars: &[char]) -> &Self;

    /// Strip leading characters from `chars`; whitespace when empty.
    fn trim_start(&self, chars: &[char]) -> &Self;

    /// Strip trailing characters from `chars`; whitespace when empty.
    fn trim_end(&self, chars: &[char]) -> &Self;

    fn to_upper(&self) -> &Self;

    fn to_lower(&self) -> &Self;

    /// Replace every match of the regular expression `pattern`.
    ///
    /// `replacement` may refer to capture groups (`$1`, `${name}`). The
    /// pattern is compiled here, so a bad pattern fails at configuration time.
    fn replace(&self, pattern: &str, replacement: &str) -> Result<&Self>;

    fn append(&self, suffix: &str) -> &Self;

    fn prepend(&self, prefix: &str) -> &Self;

    /// Keep `len` characters from `start`, or everything from `start` when
    /// `len` is `None`.
    fn substring(&self, start: usize, len: Option<usize>) -> &Self;

    /// Drop `count` characters from `start`, or everything from `start` when
    /// `count` is `None`.
    fn remove(&self, start: usize, count: Option<usize>) -> &Self;

    /// Left-pad with `fill` up to `width` characters.
    fn pad_left(&self, width: usize, fill: char) -> &Self;

    /// Right-pad with `fill` up to `width` characters.
    fn pad_right(&self, width: usize, fill: char) -> &Self;
}

impl StringPipelineExt for PipelineBuilder<String> {
    fn trim(&self) -> &Self {
        self.with_transform(trim_step("trim", &[], Side::Both))
    }

    fn trim_chars(&self, chars: &[char]) -> &Self {
        self.with_transform(trim_step("trim", chars, Side::Both))
    }

    fn trim_start(&self, chars: &[char]) -> &Self {
        self.with_transform(trim_step("trim_start", chars, Side::Start))
    }

    fn trim_end(&self, chars: &[char]) -> &Self {
        self.with_transform(trim_step("trim_end", chars, Side::End))
    }

    fn to_upper(&self) -> &Self {
        self.with_transform(Step::new("to_upper", |value: &mut String| {
            *value = value.to_uppercase();
            Ok(())
        }))
    }

    fn to_lower(&self) -> &Self {
        self.with_transform(Step::new("to_lower", |value: &mut String| {
            *value = value.to_lowercase();
            Ok(())
        }))
    }

    fn replace(&self, pattern: &str, replacement: &str) -> Result<&Self> {
        let regex = Regex::new(pattern).map_err(|source| TransformError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let replacement = replacement.to_string();

        Ok(self.with_transform(Step::new("replace", move |value: &mut String| {
            *value = regex
                .replace_all(value.as_str(), replacement.as_str())
                .into_owned();
            Ok(())
        })))
    }

    fn append(&self, suffix: &str) -> &Self {
        let suffix = suffix.to_string();
        self.with_transform(Step::new("append", move |value: &mut String| {
            value.push_str(&suffix);
            Ok(())
        }))
    }

    fn prepend(&self, prefix: &str) -> &Self {
        let prefix = prefix.to_string();
        self.with_transform(Step::new("prepend", move |value: &mut String| {
            value.insert_str(0, &prefix);
            Ok(())
        }))
    }

    fn substring(&self, start: usize, len: Option<usize>) -> &Self {
        self.with_transform(Step::new("substring", move |value: &mut String| {
            let (start, end) = char_range("substring", value, start, len)?;
            *value = value.chars().skip(start).take(end - start).collect();
            Ok(())
        }))
    }

    fn remove(&self, start: usize, count: Option<usize>) -> &Self {
        self.with_transform(Step::new("remove", move |value: &mut String| {
            let (start, end) = char_range("remove", value, start, count)?;
            *value = value
                .chars()
                .enumerate()
                .filter(|(index, _)| *index < start || *index >= end)
                .map(|(_, c)| c)
                .collect();
            Ok(())
        }))
    }

    fn pad_left(&self, width: usize, fill: char) -> &Self {
        self.with_transform(Step::new("pad_left", move |value: &mut String| {
            let pad = padding(fill, width, value);
            value.insert_str(0, &pad);
            Ok(())
        }))
    }

    fn pad_right(&self, width: usize, fill: char) -> &Self {
        self.with_transform(Step::new("pad_right", move |value: &mut String| {
            let pad = padding(fill, width, value);
            value.push_str(&pad);
            Ok(())
        }))
    }
}
