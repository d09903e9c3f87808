//! Permissive repair of truncated or sloppy JSON text.
//!
//! Single pass over the input tracking string state and a stack of open
//! containers. The output is the input with:
//! - unterminated strings, arrays and objects closed,
//! - raw control characters inside strings escaped,
//! - trailing commas dropped and missing commas between values inserted,
//! - truncated `true`/`false`/`null` literals and numbers completed,
//! - dangling keys given a `null` value.
//!
//! Anything after the first complete top-level value is discarded.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Object: expecting a key or `}`
    Key,
    /// Object: key read, expecting `:`
    Colon,
    /// Object: expecting a value
    ObjectValue,
    /// Array: expecting a value or `]`
    ArrayValue,
    /// A value just ended; expecting `,` or a closer
    AfterValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object(Slot),
    Array(Slot),
}

impl Frame {
    fn slot(&self) -> Slot {
        match self {
            Frame::Object(s) | Frame::Array(s) => *s,
        }
    }

    fn set(&mut self, slot: Slot) {
        match self {
            Frame::Object(s) | Frame::Array(s) => *s = slot,
        }
    }
}

struct Repairer {
    out: String,
    stack: Vec<Frame>,
    in_string: bool,
    string_is_key: bool,
    escaped: bool,
    scalar: Option<String>,
    done: bool,
}

impl Repairer {
    fn new(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity + 16),
            stack: Vec::new(),
            in_string: false,
            string_is_key: false,
            escaped: false,
            scalar: None,
            done: false,
        }
    }

    fn slot(&self) -> Option<Slot> {
        self.stack.last().map(Frame::slot)
    }

    fn set_slot(&mut self, slot: Slot) {
        if let Some(frame) = self.stack.last_mut() {
            frame.set(slot);
        }
    }

    /// Called when a complete value has been emitted at the current depth.
    fn value_done(&mut self) {
        if self.stack.is_empty() {
            self.done = true;
        } else {
            self.set_slot(Slot::AfterValue);
        }
    }

    /// Insert a comma if a value is about to follow another value.
    fn separate(&mut self) {
        if self.slot() == Some(Slot::AfterValue) {
            self.out.push(',');
            let next = match self.stack.last() {
                Some(Frame::Object(_)) => Slot::Key,
                _ => Slot::ArrayValue,
            };
            self.set_slot(next);
        }
    }

    fn push_string_char(&mut self, c: char) {
        if self.escaped {
            self.escaped = false;
            self.out.push(c);
            return;
        }
        match c {
            '\\' => {
                self.escaped = true;
                self.out.push(c);
            }
            '"' => {
                self.in_string = false;
                self.out.push(c);
                if self.string_is_key {
                    self.set_slot(Slot::Colon);
                } else {
                    self.value_done();
                }
            }
            '\n' => self.out.push_str("\\n"),
            '\r' => self.out.push_str("\\r"),
            '\t' => self.out.push_str("\\t"),
            c if (c as u32) < 0x20 => self.out.push_str(&format!("\\u{:04x}", c as u32)),
            c => self.out.push(c),
        }
    }

    fn finish_scalar(&mut self) {
        if let Some(token) = self.scalar.take() {
            self.out.push_str(&complete_scalar(&token));
            self.value_done();
        }
    }

    fn push(&mut self, c: char) {
        if self.done {
            return;
        }
        if self.in_string {
            self.push_string_char(c);
            return;
        }
        if let Some(token) = self.scalar.as_mut() {
            if is_scalar_char(c) {
                token.push(c);
                return;
            }
            self.finish_scalar();
            if self.done {
                return;
            }
        }

        match c {
            c if c.is_whitespace() => self.out.push(c),
            '{' | '[' => {
                self.separate();
                if self.slot() == Some(Slot::Colon) {
                    self.out.push(':');
                }
                self.out.push(c);
                self.stack.push(if c == '{' {
                    Frame::Object(Slot::Key)
                } else {
                    Frame::Array(Slot::ArrayValue)
                });
            }
            '}' | ']' => self.close_top(),
            '"' => {
                self.separate();
                if self.slot() == Some(Slot::Colon) {
                    // Two strings in a row where a colon belongs.
                    self.out.push(':');
                    self.set_slot(Slot::ObjectValue);
                }
                self.string_is_key = self.slot() == Some(Slot::Key);
                self.in_string = true;
                self.out.push(c);
            }
            ':' => {
                if self.slot() == Some(Slot::Colon) {
                    self.out.push(':');
                    self.set_slot(Slot::ObjectValue);
                }
            }
            ',' => {
                if self.slot() == Some(Slot::AfterValue) {
                    self.separate();
                }
            }
            c if is_scalar_char(c) => {
                self.separate();
                if self.slot() == Some(Slot::Colon) {
                    self.out.push(':');
                    self.set_slot(Slot::ObjectValue);
                }
                if self.slot() == Some(Slot::Key) {
                    // Bare words cannot be keys; drop them.
                    return;
                }
                self.scalar = Some(c.to_string());
            }
            _ => {}
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.last().copied() else {
            return;
        };
        trim_trailing_comma(&mut self.out);
        match frame {
            Frame::Object(Slot::Colon) => self.out.push_str(":null"),
            Frame::Object(Slot::ObjectValue) => self.out.push_str("null"),
            _ => {}
        }
        self.out.push(match frame {
            Frame::Object(_) => '}',
            Frame::Array(_) => ']',
        });
        self.stack.pop();
        self.value_done();
    }

    fn finish(mut self) -> String {
        if self.in_string {
            if self.escaped {
                self.out.pop();
                self.escaped = false;
            }
            self.push_string_char('"');
        }
        if !self.done {
            self.finish_scalar();
        }
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.out.trim().to_string()
    }
}

fn is_scalar_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.')
}

fn complete_scalar(token: &str) -> String {
    const LITERALS: [&str; 3] = ["true", "false", "null"];
    if let Some(lit) = LITERALS.iter().find(|lit| lit.starts_with(token)) {
        return lit.to_string();
    }
    let trimmed = token.trim_end_matches(['-', '+', '.', 'e', 'E']);
    let numeric_start = trimmed.starts_with(|c: char| c.is_ascii_digit() || c == '-');
    if numeric_start && trimmed.parse::<f64>().is_ok() {
        return trimmed.to_string();
    }
    // Unquoted word: keep it as a string.
    format!("\"{}\"", token)
}

fn trim_trailing_comma(out: &mut String) {
    let trimmed_len = out.trim_end().len();
    if out[..trimmed_len].ends_with(',') {
        out.truncate(trimmed_len - 1);
    }
}

/// Repair `input` into text that is much more likely to parse as JSON.
pub fn repair_json(input: &str) -> String {
    let mut repairer = Repairer::new(input.len());
    for c in input.trim().chars() {
        repairer.push(c);
        if repairer.done {
            break;
        }
    }
    repairer.finish()
}
