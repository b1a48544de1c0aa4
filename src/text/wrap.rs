use crate::foundation::error::PosterResult;

/// Appended to text that had to be shortened.
pub const ELLIPSIS: &str = "…";

/// Greedily pack `tokens` into lines joined by `separator`, each at most `max_width` wide.
///
/// A token is appended to the current line unless the joined result would exceed `max_width`,
/// in which case the current line is flushed and the token starts a new one. A token wider than
/// `max_width` on its own still gets a line of its own; tokens are never split.
///
/// Captions use word tokens with `" "`; tracklists use whole track names with a pipe separator.
pub fn pack_tokens<'a, I, F>(
    tokens: I,
    separator: &str,
    max_width: f64,
    mut width_of: F,
) -> PosterResult<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
    F: FnMut(&str) -> PosterResult<f64>,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    for token in tokens {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }
        let candidate = format!("{current}{separator}{token}");
        if width_of(&candidate)? > max_width {
            lines.push(std::mem::replace(&mut current, token.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Word-wrap `text` at whitespace.
pub fn wrap_words<F>(text: &str, max_width: f64, width_of: F) -> PosterResult<Vec<String>>
where
    F: FnMut(&str) -> PosterResult<f64>,
{
    pack_tokens(text.split_whitespace(), " ", max_width, width_of)
}

/// Shorten `text` with a trailing [`ELLIPSIS`] until it fits in `max_width`.
///
/// Returns `text` unchanged when it already fits. If even the ellipsis alone does not fit, the
/// ellipsis is returned anyway.
pub fn truncate_to_width<F>(text: &str, max_width: f64, mut width_of: F) -> PosterResult<String>
where
    F: FnMut(&str) -> PosterResult<f64>,
{
    if width_of(text)? <= max_width {
        return Ok(text.to_string());
    }
    let chars: Vec<char> = text.chars().collect();
    // Binary search on the kept prefix length.
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        let candidate = with_ellipsis(&chars[..mid]);
        if width_of(&candidate)? <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(with_ellipsis(&chars[..lo]))
}

fn with_ellipsis(prefix: &[char]) -> String {
    let mut s: String = prefix.iter().collect();
    let trimmed = s.trim_end().len();
    s.truncate(trimmed);
    s.push_str(ELLIPSIS);
    s
}

/// Font sizes and spacing for a title block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleStyle {
    /// Size used when the title fits on one line.
    pub base_size: f64,
    /// Size used when the title must wrap to two lines.
    pub compact_size: f64,
    /// Line height as a multiple of font size.
    pub line_height: f64,
}

impl TitleStyle {
    /// Vertical space reserved for the title, whatever the outcome of fitting.
    pub fn reserved_height(&self) -> f64 {
        let one = self.base_size * self.line_height;
        let two = 2.0 * self.compact_size * self.line_height;
        one.max(two)
    }
}

/// Outcome of [`fit_title`].
#[derive(Clone, Debug, PartialEq)]
pub struct FittedTitle {
    /// One or two lines, top to bottom.
    pub lines: Vec<String>,
    /// Font size the lines should be drawn at.
    pub font_size: f64,
    /// Always [`TitleStyle::reserved_height`].
    pub block_height: f64,
}

/// Fit a title on one line at the base size, or split it over two lines at the compact size.
///
/// `width_at(text, size)` measures `text` at font `size`. With no `available_width` the title is
/// never wrapped. When no word prefix fits at the compact size (a single overlong word), the title
/// falls back to one unwrapped line at the base size. The second line is not re-wrapped.
pub fn fit_title<F>(
    text: &str,
    style: &TitleStyle,
    available_width: Option<f64>,
    mut width_at: F,
) -> PosterResult<FittedTitle>
where
    F: FnMut(&str, f64) -> PosterResult<f64>,
{
    let text = text.trim();
    let block_height = style.reserved_height();
    let single = |text: &str| FittedTitle {
        lines: vec![text.to_string()],
        font_size: style.base_size,
        block_height,
    };

    let Some(avail) = available_width else {
        return Ok(single(text));
    };
    if width_at(text, style.base_size)? <= avail {
        return Ok(single(text));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut split_at = 0;
    for n in 1..words.len() {
        let prefix = words[..n].join(" ");
        if width_at(&prefix, style.compact_size)? <= avail {
            split_at = n;
        } else {
            break;
        }
    }
    if split_at == 0 {
        return Ok(single(text));
    }

    Ok(FittedTitle {
        lines: vec![words[..split_at].join(" "), words[split_at..].join(" ")],
        font_size: style.compact_size,
        block_height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
