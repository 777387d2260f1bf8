//! Splits a transcript into raw messages.
//!
//! The segmenter walks the transcript line by line. A line recognized by the
//! [`LineGrammar`] opens a new message; any other line is folded into the
//! body of the open message. No line is ever attributed to two messages.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ChatstatsError, Result};
use crate::grammar::{LineGrammar, LineKind};

/// One message as it appears in the transcript, before feature extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawMessage {
    /// Zero-based line where the message starts
    pub start_index: usize,
    /// Zero-based last line folded into the message (inclusive)
    pub end_index: usize,
    /// Timestamp text from the header line
    pub timestamp_text: String,
    /// Author; `None` for system notices
    pub author: Option<String>,
    /// Header remainder plus continuation lines, joined with their original
    /// terminators
    pub body: String,
}

impl RawMessage {
    /// Returns `true` if this message has no author.
    pub fn is_system(&self) -> bool {
        self.author.is_none()
    }

    /// Number of physical lines the message spans.
    pub fn line_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// A continuation line found before any message start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanLine {
    /// Zero-based line offset
    pub line: usize,
    /// Line text without its terminator
    pub text: String,
}

/// Output of [`MessageSegmenter::segment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Messages in transcript order
    pub messages: Vec<RawMessage>,
    /// Discarded lines that preceded the first message
    pub orphans: Vec<OrphanLine>,
}

/// Walks a transcript and groups its lines into [`RawMessage`]s.
#[derive(Debug, Clone)]
pub struct MessageSegmenter<'g> {
    grammar: &'g LineGrammar,
    strict_header: bool,
}

impl<'g> MessageSegmenter<'g> {
    /// Creates a segmenter over a compiled grammar.
    ///
    /// With `strict_header`, the first non-blank line must open a message.
    pub fn new(grammar: &'g LineGrammar, strict_header: bool) -> Self {
        Self {
            grammar,
            strict_header,
        }
    }

    /// Segments the whole transcript.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::UnrecognizedTranscriptFormat`] when the
    /// transcript is blank, when (in strict mode) its first non-blank line is
    /// not a message start, or when no line starts a message at all.
    pub fn segment(&self, text: &str) -> Result<Segmentation> {
        let mut out = Segmentation::default();
        let mut open: Option<RawMessage> = None;
        let mut seen_content = false;

        for (index, raw_line) in text.split_inclusive('\n').enumerate() {
            let line = strip_terminator(raw_line);

            if !seen_content {
                if line.trim().is_empty() {
                    continue;
                }
                seen_content = true;
            }

            match self.grammar.classify(line) {
                LineKind::MessageStart(start) => {
                    if let Some(done) = open.take() {
                        out.messages.push(finish(done));
                    }
                    let mut body = String::with_capacity(start.body.len() + 1);
                    body.push_str(start.body);
                    body.push_str(&raw_line[line.len()..]);
                    open = Some(RawMessage {
                        start_index: index,
                        end_index: index,
                        timestamp_text: start.timestamp_text.to_string(),
                        author: start.author.map(str::to_string),
                        body,
                    });
                }
                LineKind::Continuation(_) => match open.as_mut() {
                    Some(msg) => {
                        msg.body.push_str(raw_line);
                        msg.end_index = index;
                    }
                    None if self.strict_header => {
                        return Err(ChatstatsError::unrecognized(index, line));
                    }
                    None => {
                        warn!(line = index + 1, "discarding continuation line before first message");
                        out.orphans.push(OrphanLine {
                            line: index,
                            text: line.to_string(),
                        });
                    }
                },
            }
        }

        if let Some(done) = open.take() {
            out.messages.push(finish(done));
        }

        if out.messages.is_empty() {
            let (line, preview) = out
                .orphans
                .first()
                .map_or((0, ""), |o| (o.line, o.text.as_str()));
            return Err(ChatstatsError::unrecognized(line, preview));
        }

        debug!(
            messages = out.messages.len(),
            orphans = out.orphans.len(),
            "segmented transcript"
        );
        Ok(out)
    }
}

/// Drops the trailing line terminator the body picked up from its last line.
fn finish(mut msg: RawMessage) -> RawMessage {
    let len = strip_terminator(&msg.body).len();
    msg.body.truncate(len);
    msg
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
