//! Incremental stream parser.
//!
//! Owns the growing text buffer for one session and the working record built
//! from it. Each [`StreamParser::ingest`] call appends a fragment, drains
//! every completed tag region, falls back to JSON while the output has never
//! carried tag markup, and re-derives the hook type from the full output.
//!
//! Fields taken from JSON are provisional: the first tag marker anywhere in
//! the output discards them, so the record never depends on where the
//! transport happened to split the text.
//!
//! Ingestion is synchronous and never fails: content that cannot be
//! interpreted yet stays in the buffer for later fragments.

use crate::config::SessionConfig;
use crate::extract::{self, detect_hook_type, HookPhrase};
use crate::models::{project, FieldUpdate, GenerationRecord, HookType, RecordField, WorkingRecord};
use crate::repair;

/// Progress never reaches 100 before the stream is finalized.
const MAX_STREAMING_PROGRESS: u8 = 95;

/// Bytes of already-seen output rescanned for a marker split across fragments.
/// Longer than the longest opening tag.
const MARKER_WINDOW: usize = 32;

/// Read-only view returned from each ingest.
#[derive(Debug, Clone)]
pub struct PartialRecordView<'a> {
    record: &'a WorkingRecord,
    progress: u8,
    changed: Vec<RecordField>,
}

impl<'a> PartialRecordView<'a> {
    /// Current working record, diagnostic fields included.
    pub fn record(&self) -> &'a WorkingRecord {
        self.record
    }

    /// Coarse progress estimate, 0..=95 while streaming.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Fields whose value changed during this ingest, in merge order.
    pub fn changed(&self) -> &[RecordField] {
        &self.changed
    }

    /// True when `code` was set or changed by this ingest.
    pub fn code_changed(&self) -> bool {
        self.changed.contains(&RecordField::Code)
    }

    /// The new code, if this ingest changed it.
    pub fn code(&self) -> Option<&'a str> {
        if self.code_changed() {
            self.record.code.as_deref().filter(|code| !code.is_empty())
        } else {
            None
        }
    }

    /// Consumer-facing projection of the current record.
    pub fn snapshot(&self) -> GenerationRecord {
        project(self.record)
    }
}

/// Parser for one streaming session. Not reusable: [`finalize`](Self::finalize)
/// consumes it.
#[derive(Debug, Clone)]
pub struct StreamParser {
    buffer: String,
    record: WorkingRecord,
    hook_phrases: Vec<HookPhrase>,
    expected_chars: usize,
    json_fallback: bool,
    /// `hookType` taken from JSON output; overrides the phrase heuristic
    explicit_hook_type: Option<HookType>,
    saw_markup: bool,
    saw_json: bool,
    progress: u8,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl StreamParser {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            buffer: String::new(),
            record: WorkingRecord::new(),
            hook_phrases: config.hook_phrases.clone(),
            expected_chars: config.expected_output_chars.max(1),
            json_fallback: config.json_fallback,
            explicit_hook_type: None,
            saw_markup: false,
            saw_json: false,
            progress: 0,
        }
    }

    /// Append `fragment` and merge everything it completes.
    pub fn ingest(&mut self, fragment: &str) -> PartialRecordView<'_> {
        let seen = self.record.raw_content.len();
        self.record.raw_content.push_str(fragment);
        self.buffer.push_str(fragment);
        self.detect_markup(seen);

        let mut changed = Vec::new();

        let updates = extract::drain(&mut self.buffer);
        self.merge(updates, &mut changed);

        if self.json_fallback && !self.saw_markup {
            if let Some(updates) = repair::extract_json(&self.buffer) {
                self.saw_json = true;
                self.merge(updates, &mut changed);
            }
        }

        self.refresh_hook_type(&mut changed);
        self.advance_progress();

        PartialRecordView {
            record: &self.record,
            progress: self.progress,
            changed,
        }
    }

    /// Look for the first tag marker in the output, scanning only text that
    /// could not have held one before. On first sight, JSON-derived fields
    /// are dropped: tag markup takes precedence over the JSON fallback.
    fn detect_markup(&mut self, seen: usize) {
        if self.saw_markup {
            return;
        }
        let raw = &self.record.raw_content;
        let mut start = seen.saturating_sub(MARKER_WINDOW);
        while !raw.is_char_boundary(start) {
            start -= 1;
        }
        if !extract::contains_known_marker(&raw[start..]) {
            return;
        }

        self.saw_markup = true;
        if self.saw_json {
            self.record = WorkingRecord {
                raw_content: std::mem::take(&mut self.record.raw_content),
                reply_content: std::mem::take(&mut self.record.reply_content),
                ..WorkingRecord::default()
            };
            self.explicit_hook_type = None;
            self.saw_json = false;
        }
    }

    fn merge(&mut self, updates: Vec<FieldUpdate>, changed: &mut Vec<RecordField>) {
        for update in updates {
            if let FieldUpdate::HookType(hook_type) = update {
                self.explicit_hook_type = Some(hook_type);
                continue;
            }
            if let Some(field) = self.record.apply(update) {
                push_unique(changed, field);
            }
        }
    }

    fn refresh_hook_type(&mut self, changed: &mut Vec<RecordField>) {
        let detected = self.explicit_hook_type.or_else(|| {
            detect_hook_type(
                &self.record.raw_content,
                &self.hook_phrases,
                self.record.has_structured_data(),
            )
        });
        if let Some(hook_type) = detected {
            if let Some(field) = self.record.apply(FieldUpdate::HookType(hook_type)) {
                push_unique(changed, field);
            }
        }
    }

    fn advance_progress(&mut self) {
        let estimate = self
            .record
            .raw_content
            .len()
            .saturating_mul(100)
            / self.expected_chars;
        let estimate = estimate.min(MAX_STREAMING_PROGRESS as usize) as u8;
        self.progress = self.progress.max(estimate);
    }

    pub fn record(&self) -> &WorkingRecord {
        &self.record
    }

    /// Unconsumed text: incomplete regions and inert text between tags.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Whether any tag marker or JSON object has been recognised.
    pub fn saw_structure(&self) -> bool {
        self.saw_markup || self.saw_json
    }

    /// Conversational reply accumulated so far.
    ///
    /// When the model answered without any markup, the whole output is the
    /// reply.
    pub fn reply_text(&self) -> String {
        if !self.record.reply_content.is_empty() {
            return self.record.reply_content.clone();
        }
        let raw = &self.record.raw_content;
        if self.saw_structure() || extract::contains_known_marker(raw) {
            return String::new();
        }
        raw.trim().to_string()
    }

    /// Current record with diagnostic fields stripped.
    pub fn snapshot(&self) -> GenerationRecord {
        project(&self.record)
    }

    /// Strip diagnostics and hand back the final record.
    ///
    /// Fields whose tags never closed are simply absent.
    pub fn finalize(self) -> GenerationRecord {
        project(&self.record)
    }
}

fn push_unique(changed: &mut Vec<RecordField>, field: RecordField) {
    if !changed.contains(&field) {
        changed.push(field);
    }
}
