use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

pub struct TextMetrics {
    pub char_width: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self { char_width: 8.0 }
    }
}

impl TextMetrics {
    pub fn new(char_width: f64) -> Self {
        Self { char_width }
    }

    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Shorten `text` with a trailing ellipsis so it fits in `max_width`.
    pub fn fit<'a>(&self, text: &'a str, max_width: f64) -> Cow<'a, str> {
        if self.text_width(text) <= max_width {
            return Cow::Borrowed(text);
        }

        let budget = max_width - self.char_width;
        let mut out = String::new();
        let mut used = 0.0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0) as f64 * self.char_width;
            if used + w > budget {
                break;
            }
            used += w;
            out.push(c);
        }
        out.push(ELLIPSIS);
        Cow::Owned(out)
    }
}
