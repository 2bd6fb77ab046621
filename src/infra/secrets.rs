use std::panic;

const REDACTED: &str = "[REDACTED]";

const SENSITIVE_MARKERS: [&str; 6] = ["password", "passwd", "api_key", "apikey", "secret", "key="];

/// Scrubs chunks that name or look like credentials. Used before any
/// upstream or user-supplied text reaches the log.
pub fn redact_text(input: &str) -> String {
    input
        .split_whitespace()
        .map(redact_chunk)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Panic hook that runs `restore` first (terminal cleanup) and prints a
/// redacted message.
pub fn install_panic_redaction_hook(restore: fn()) {
    panic::set_hook(Box::new(move |panic_info| {
        restore();

        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic payload omitted".to_owned());

        let scrubbed = redact_text(&payload);

        match panic_info.location() {
            Some(location) => eprintln!(
                "localnet-chat panic: {} at {}:{}:{}",
                scrubbed,
                location.file(),
                location.line(),
                location.column()
            ),
            None => eprintln!("localnet-chat panic: {}", scrubbed),
        }
    }));
}

fn redact_chunk(chunk: &str) -> String {
    let lowered = chunk.to_ascii_lowercase();
    if SENSITIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
        || looks_like_api_key(chunk)
    {
        REDACTED.to_owned()
    } else {
        chunk.to_owned()
    }
}

/// Google API keys are 39 chars starting with `AIza`; anything long and
/// mixed-alphanumeric is treated the same way.
fn looks_like_api_key(value: &str) -> bool {
    let cleaned = value.trim_matches(|ch: char| !ch.is_ascii_alphanumeric());
    if cleaned.starts_with("AIza") {
        return true;
    }

    let has_mixed = cleaned.chars().any(|ch| ch.is_ascii_alphabetic())
        && cleaned.chars().any(|ch| ch.is_ascii_digit());

    cleaned.len() >= 24
        && has_mixed
        && cleaned
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_text_scrubs_credentials() {
        let input = "bad request password=hostel-vibes key=AIzaSyA1b2c3 for AIzaSyD9x8y7w6v5u4t3s2r1";
        let output = redact_text(input);

        assert!(!output.contains("hostel-vibes"));
        assert!(!output.contains("AIzaSyA1b2c3"));
        assert!(!output.contains("AIzaSyD9x8y7w6v5u4t3s2r1"));
        assert!(output.starts_with("bad request"));
    }

    #[test]
    fn redact_text_keeps_ordinary_words() {
        let input = "The caller does not have permission";

        assert_eq!(redact_text(input), input);
    }
}
