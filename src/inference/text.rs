//! Text helpers for building model prompts and cleaning model output.

/// Build the generation prompt for a lyric style.
///
/// # Format
///
/// ```text
/// Transform this content into {style} lyrics with rhythm and rhyme:
///
/// {content}
///
/// Lyrics:
/// ```
pub fn build_lyrics_prompt(content: &str, style: &str) -> String {
    format!("Transform this content into {style} lyrics with rhythm and rhyme:\n\n{content}\n\nLyrics:")
}

/// Text-generation models may echo the prompt ahead of the continuation
pub fn strip_prompt_echo<'a>(generated: &'a str, prompt: &str) -> &'a str {
    generated.strip_prefix(prompt).unwrap_or(generated).trim()
}

/// First `max_chars` characters of `text`, never splitting a UTF-8 sequence
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
