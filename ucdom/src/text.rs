use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Width of the widest line and number of lines.
pub fn text_size(s: &str) -> (u16, u16) {
    let width = s.lines().map(display_width).max().unwrap_or(0);
    let height = s.lines().count().max(1);
    (width as u16, height as u16)
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_of_multiline_text() {
        assert_eq!(text_size("Okay"), (4, 1));
        assert_eq!(text_size("one\nthree"), (5, 2));
        assert_eq!(text_size(""), (0, 1));
    }

    #[test]
    fn truncation_adds_ellipsis() {
        assert_eq!(truncate_to_width("Cancel", 10), "Cancel");
        assert_eq!(truncate_to_width("Please Confirm", 7), "Please…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
