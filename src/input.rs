use glam::Vec2;

// ---------------- Pointer helpers ----------------
/// Client pixel coordinates to NDC with y up; a zero-sized viewport maps to the center.
#[inline]
pub fn pointer_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -(client_y / height) * 2.0 + 1.0,
    )
}

/// Offset of the pointer from the center of a rect, scaled by `pull`.
#[inline]
pub fn magnetic_offset(
    client: Vec2,
    rect_left: f32,
    rect_top: f32,
    rect_size: Vec2,
    pull: f32,
) -> Vec2 {
    let center = Vec2::new(rect_left, rect_top) + rect_size * 0.5;
    (client - center) * pull
}

// ---------------- Scroll helpers ----------------
/// 0 at the top of the page, 1 at the bottom. Pages that do not scroll stay at 0.
#[inline]
pub fn scroll_ratio(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let range = document_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0)
}

// ---------------- Markup helpers ----------------
/// Leading integer of a text node, like `parseInt`: "150+" gives 150.
pub fn leading_int(text: &str) -> Option<i64> {
    let t = text.trim_start();
    let (sign, digits) = match t.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, t.strip_prefix('+').unwrap_or(t)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(digits.len(), |(i, _)| i);
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// "85%" or "85" to 85.0.
pub fn percent(raw: &str) -> Option<f32> {
    let t = raw.trim();
    t.strip_suffix('%').unwrap_or(t).trim().parse().ok()
}

/// One `<span class="char">` per character; spaces become `&nbsp;`.
pub fn split_chars_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 24);
    for c in text.chars() {
        out.push_str("<span class=\"char\">");
        match c {
            ' ' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
        out.push_str("</span>");
    }
    out
}
