//! Pure layout arithmetic for the two-panel interface. Everything here is a
//! function of its arguments so the policy can be tested without a terminal.

use std::ops::Range;

/// Minimum total height of the context list panel.
pub const MIN_LIST_HEIGHT: u16 = 8;
/// Minimum total height of the output panel.
pub const MIN_OUTPUT_HEIGHT: u16 = 5;

/// Computed panel geometry for a terminal of a given size. Heights include
/// the panel borders; `inner_width` is the usable text width inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub list_height: u16,
    pub output_height: u16,
    pub inner_width: u16,
}

/// Split the terminal height into the list panel and the output panel.
///
/// The list panel takes half the height minus fixed chrome, the output panel
/// the remainder; both are clamped to their minimums, so on a tiny terminal
/// the panels may together exceed the nominal height (accepted degradation).
pub fn split(width: u16, height: u16) -> PanelGeometry {
    let list_height = (height / 2).saturating_sub(2).max(MIN_LIST_HEIGHT);
    let output_height = height
        .saturating_sub(list_height + 2)
        .max(MIN_OUTPUT_HEIGHT);
    let inner_width = width.saturating_sub(8).max(10);
    PanelGeometry {
        list_height,
        output_height,
        inner_width,
    }
}

/// Entry lines that fit in a list panel of the given total height: borders
/// take two rows and the key-hint line one more.
pub fn list_capacity(list_height: u16) -> usize {
    usize::from(list_height.saturating_sub(3).max(1))
}

/// Text lines that fit in an output panel of the given total height.
pub fn output_capacity(output_height: u16) -> usize {
    usize::from(output_height.saturating_sub(2).max(1))
}

/// Sliding window of `visible` entries centered on the cursor, clamped to
/// `[0, len)`. Returns the full range when the list already fits.
pub fn window(len: usize, cursor: usize, visible: usize) -> Range<usize> {
    if len <= visible || visible == 0 {
        return 0..len;
    }
    let mut start = cursor.saturating_sub(visible / 2);
    let mut end = start + visible;
    if end > len {
        end = len;
        start = end - visible;
    }
    start..end
}

/// Truncate a line to `max` columns with an ellipsis marker. Never wraps.
pub fn truncate(line: &str, max: usize) -> String {
    if line.chars().count() <= max {
        return line.to_string();
    }
    if max <= 3 {
        return line.chars().take(max).collect();
    }
    let mut truncated: String = line.chars().take(max - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Hard-wrap text at the column boundary (no word-awareness) and keep at
/// most `max_lines` from the top, so the beginning of the latest output is
/// what stays visible.
pub fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for line in text.lines() {
        if lines.len() >= max_lines {
            break;
        }
        if line.is_empty() {
            lines.push(String::new());
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        for chunk in chars.chunks(width) {
            if lines.len() >= max_lines {
                break;
            }
            lines.push(chunk.iter().collect());
        }
    }

    lines.truncate(max_lines);
    lines
}
