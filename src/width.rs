//! Display-width helpers for text captured from live screens.
//!
//! Captured status lines may carry ANSI styling from the host terminal, so
//! widths are always computed on the stripped text.

/// Terminal cell width of `text` with ANSI escape sequences removed.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Strip ANSI sequences and cut the text down to at most `max` display cells.
pub fn sanitize_to_width(text: &str, max: usize) -> String {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);

    let mut out = String::new();
    let mut used = 0usize;
    for ch in clean_str.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
