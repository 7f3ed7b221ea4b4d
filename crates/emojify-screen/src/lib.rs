//! Prompt screen state and the submission workflow.
//!
//! `PromptScreen` owns the two text fields, the accumulated results, the
//! in-flight flag and pending notices. A submission is split into
//! [`begin_submit`](PromptScreen::begin_submit) and
//! [`finish_submit`](PromptScreen::finish_submit) so a front-end can keep
//! handling input while the request is outstanding;
//! [`submit`](PromptScreen::submit) chains both around one service call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use emojify_client::EmojiService;
use emojify_types::{
    EmojiRequest, EmojifyError, Notice, Result, INVALID_COUNT_MESSAGE, MISSING_FIELDS_MESSAGE,
};

pub const DEFAULT_EMOJI_COUNT: &str = "6";
pub const SUBMIT_LABEL: &str = "Generate Emojis";
pub const GENERATING_LABEL: &str = "Generating...";

// ---------------------------------------------------------------------------
// PendingSubmission
// ---------------------------------------------------------------------------

/// Proof that a submission passed validation and the screen is now in flight.
///
/// Only [`PromptScreen::begin_submit`] creates one, and
/// [`PromptScreen::finish_submit`] consumes it. Dropping it without finishing
/// (including dropping a [`PromptScreen::submit`] future mid-request) also
/// leaves the in-flight state, discarding the outcome.
#[derive(Debug)]
#[must_use = "dropping a pending submission discards its outcome"]
pub struct PendingSubmission {
    request: EmojiRequest,
    in_flight: Arc<AtomicBool>,
}

impl PendingSubmission {
    pub fn request(&self) -> &EmojiRequest {
        &self.request
    }
}

impl Drop for PendingSubmission {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

// ---------------------------------------------------------------------------
// PromptScreen
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct PromptScreen {
    prompt: String,
    emoji_count: String,
    results: Vec<String>,
    // Shared with the outstanding `PendingSubmission`, which clears it on drop.
    in_flight: Arc<AtomicBool>,
    notices: Vec<Notice>,
}

impl PromptScreen {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            emoji_count: DEFAULT_EMOJI_COUNT.to_string(),
            results: Vec::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
            notices: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn emoji_count(&self) -> &str {
        &self.emoji_count
    }

    /// Every successful result so far, oldest first.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_emoji_count(&mut self, count: impl Into<String>) {
        self.emoji_count = count.into();
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_in_flight()
    }

    /// Whether the clear action is enabled. `clear` itself always works.
    pub fn can_clear(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_in_flight() {
            GENERATING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Drain notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Validate the fields and mark the screen in flight.
    ///
    /// Fails with `Busy` while another submission is outstanding, leaving the
    /// screen untouched. Fails with `Validation` (and raises a notice) when
    /// either field is blank or the count is not a whole number.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission> {
        if self.is_in_flight() {
            debug!("submit ignored, request already in flight");
            return Err(EmojifyError::Busy);
        }

        let num_of_emojis = match self.validate() {
            Ok(n) => n,
            Err(err) => {
                self.report(&err);
                return Err(err);
            }
        };

        self.in_flight.store(true, Ordering::Release);
        debug!(num_of_emojis, "submission started");
        Ok(PendingSubmission {
            request: EmojiRequest::new(self.prompt.clone(), num_of_emojis),
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    /// Apply the service outcome and leave the in-flight state.
    ///
    /// A success appends one element to the results; a failure raises a notice
    /// and leaves the results alone. The in-flight flag is cleared either way.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<String>,
    ) -> Result<()> {
        let result = match outcome {
            Ok(emojis) => {
                self.results.push(emojis);
                debug!(results = self.results.len(), "submission appended");
                Ok(())
            }
            Err(err) => {
                warn!(
                    prompt_chars = pending.request.prompt.chars().count(),
                    error = %err,
                    "submission failed"
                );
                self.report(&err);
                Err(err)
            }
        };
        drop(pending);
        result
    }

    /// Run one full submission against `service`.
    pub async fn submit<S: EmojiService + ?Sized>(&mut self, service: &S) -> Result<()> {
        let pending = self.begin_submit()?;
        let outcome = service.generate(pending.request()).await;
        self.finish_submit(pending, outcome)
    }

    /// Empty the results and the prompt. The count and any in-flight request
    /// are left alone.
    pub fn clear(&mut self) {
        self.results.clear();
        self.prompt.clear();
        debug!("screen cleared");
    }

    fn validate(&self) -> Result<u32> {
        if self.prompt.trim().is_empty() || self.emoji_count.trim().is_empty() {
            return Err(EmojifyError::Validation(MISSING_FIELDS_MESSAGE.into()));
        }
        self.emoji_count
            .trim()
            .parse::<u32>()
            .map_err(|_| EmojifyError::Validation(INVALID_COUNT_MESSAGE.into()))
    }

    fn report(&mut self, err: &EmojifyError) {
        self.notices.push(Notice::from(err));
    }
}

impl Default for PromptScreen {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
