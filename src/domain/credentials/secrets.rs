use std::fmt;

/// The three API keys the pipeline needs, loaded once at startup
#[derive(Clone)]
pub struct Secrets {
    pub judge_key: String,
    pub generation_key: String,
    pub search_key: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("judge_key", &"[REDACTED]")
            .field("generation_key", &"[REDACTED]")
            .field("search_key", &"[REDACTED]")
            .finish()
    }
}
