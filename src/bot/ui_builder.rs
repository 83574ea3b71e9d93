//! UI Builder module for formatting replies and keyboards

use teloxide::types::KeyboardRemove;

/// Maximum message length accepted by Telegram, in UTF-16 code units
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Split `text` into chunks Telegram accepts
///
/// Chunks break after a newline when possible and inside a line only when the
/// line alone exceeds `limit`. Concatenating the chunks yields `text` again.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(2);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len: usize = line.chars().map(char::len_utf16).sum();

        if current_len + line_len > limit && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len <= limit {
            current.push_str(line);
            current_len += line_len;
            continue;
        }

        for ch in line.chars() {
            let ch_len = ch.len_utf16();
            if current_len + ch_len > limit {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            current.push(ch);
            current_len += ch_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Markup that hides any custom reply keyboard
pub fn remove_keyboard() -> KeyboardRemove {
    KeyboardRemove::new()
}
