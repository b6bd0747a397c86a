/// Delimiter placed between post texts in the summarization payload.
pub const POST_SEPARATOR: &str = "\n\n---\n\n";

/// Instruction sent in the system role of every digest request.
pub const DIGEST_SYSTEM_PROMPT: &str = "You are a newsletter author. \
Compile the following list of posts into a coherent newsletter digest that \
summarises the main topics, so readers can catch up without reading every post.";

/// A ready-to-send summarization request: system instruction plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRequest {
    system_prompt: &'static str,
    payload: String,
    post_count: usize,
}

impl DigestRequest {
    /// Join `texts` with [`POST_SEPARATOR`] and pair them with [`DIGEST_SYSTEM_PROMPT`].
    ///
    /// Texts are never truncated. An empty input still yields a request with
    /// an empty payload.
    ///
    /// ```
    /// use roundup_core::{DigestRequest, POST_SEPARATOR};
    ///
    /// let req = DigestRequest::build(["one", "two"]);
    /// assert_eq!(req.payload(), format!("one{POST_SEPARATOR}two"));
    /// assert_eq!(req.post_count(), 2);
    /// ```
    pub fn build<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut payload = String::new();
        let mut post_count = 0;
        for text in texts {
            if post_count > 0 {
                payload.push_str(POST_SEPARATOR);
            }
            payload.push_str(text.as_ref());
            post_count += 1;
        }

        Self {
            system_prompt: DIGEST_SYSTEM_PROMPT,
            payload,
            post_count,
        }
    }

    pub fn system_prompt(&self) -> &str {
        self.system_prompt
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn post_count(&self) -> usize {
        self.post_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_TEXTS: &[&str] = &[
        "Shipping the new release today, changelog in thread",
        "Hot take: tabs > spaces\n\nfight me",
        "Conference talk slides are up - link below",
        "",
        "Three things I learned this week: 1) ... 2) ... 3) ...",
    ];

    #[test]
    fn separator_is_absent_from_fixtures() {
        for text in FIXTURE_TEXTS {
            assert!(!text.contains(POST_SEPARATOR), "fixture contains separator: {text:?}");
        }
    }

    #[test]
    fn n_texts_give_n_minus_one_separators() {
        for n in 1..=FIXTURE_TEXTS.len() {
            let req = DigestRequest::build(&FIXTURE_TEXTS[..n]);
            assert_eq!(req.payload().matches(POST_SEPARATOR).count(), n - 1);
            assert_eq!(req.post_count(), n);
        }
    }

    #[test]
    fn payload_splits_back_into_texts() {
        let req = DigestRequest::build(FIXTURE_TEXTS);
        let parts: Vec<&str> = req.payload().split(POST_SEPARATOR).collect();
        assert_eq!(parts, FIXTURE_TEXTS);
    }

    #[test]
    fn single_text_has_no_separator() {
        let req = DigestRequest::build(["a"]);
        assert_eq!(req.payload(), "a");
    }

    #[test]
    fn empty_input_builds_empty_payload() {
        let req = DigestRequest::build(Vec::<String>::new());
        assert_eq!(req.payload(), "");
        assert_eq!(req.post_count(), 0);
        assert_eq!(req.system_prompt(), DIGEST_SYSTEM_PROMPT);
    }

    #[test]
    fn long_text_is_not_truncated() {
        let long = "x".repeat(200_000);
        let req = DigestRequest::build([long.as_str(), "tail"]);
        assert_eq!(req.payload().len(), long.len() + POST_SEPARATOR.len() + 4);
    }
}
