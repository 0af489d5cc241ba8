const TRUNCATION_MARKER: &str = "...";

/// Display cap for a generated reply, marker included.
pub const REPLY_DISPLAY_CAP: usize = 200;

/// Cap on extracted page text before it is sent to the provider.
pub const POST_TEXT_CAP: usize = 5_000;

/// Cuts a reply to the display cap, appending the marker when cut.
/// For ASCII input the truncated result is exactly `REPLY_DISPLAY_CAP` long.
pub fn truncate_reply(reply: &str) -> String {
    if reply.len() <= REPLY_DISPLAY_CAP {
        return reply.to_string();
    }
    let mut end = REPLY_DISPLAY_CAP - TRUNCATION_MARKER.len();
    while end > 0 && !reply.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{}", &reply[..end], TRUNCATION_MARKER)
}

/// Bounds scanned page text before the provider call. No marker; the model
/// never sees the cut edge announced.
pub fn truncate_post_text(text: &str) -> String {
    if text.len() <= POST_TEXT_CAP {
        return text.to_string();
    }
    let mut end = POST_TEXT_CAP;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}
