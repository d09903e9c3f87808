//! Generation record types.
//!
//! A `WorkingRecord` is what the stream parser mutates while fragments arrive.
//! It carries diagnostic fields (`raw_content`, `reply_content`) that are never
//! shown to the final consumer. [`project`] turns it into the consumer-facing
//! `GenerationRecord`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hook callback the generated contract attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookType {
    BeforeSwap,
    AfterSwap,
    BeforeInitialize,
    AfterInitialize,
    BeforeModifyPosition,
    AfterModifyPosition,
    Custom,
}

impl HookType {
    /// Wire name (camelCase), e.g. `beforeSwap`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::BeforeSwap => "beforeSwap",
            HookType::AfterSwap => "afterSwap",
            HookType::BeforeInitialize => "beforeInitialize",
            HookType::AfterInitialize => "afterInitialize",
            HookType::BeforeModifyPosition => "beforeModifyPosition",
            HookType::AfterModifyPosition => "afterModifyPosition",
            HookType::Custom => "custom",
        }
    }

    /// Lenient parse: accepts `beforeSwap`, `before_swap`, `Before Swap`, ...
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "beforeswap" => Some(HookType::BeforeSwap),
            "afterswap" => Some(HookType::AfterSwap),
            "beforeinitialize" => Some(HookType::BeforeInitialize),
            "afterinitialize" => Some(HookType::AfterInitialize),
            "beforemodifyposition" => Some(HookType::BeforeModifyPosition),
            "aftermodifyposition" => Some(HookType::AfterModifyPosition),
            "custom" => Some(HookType::Custom),
            _ => None,
        }
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough complexity rating reported by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Complexity::Low),
            "medium" => Some(Complexity::Medium),
            "high" => Some(Complexity::High),
            _ => None,
        }
    }
}

/// One `feature` block from an `implementationDetails` container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

impl FeatureDetail {
    /// Label used for the `functionalities` list: name, then description.
    pub fn label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.description.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.code_snippet.is_none()
    }
}

/// Identifies a record field, used for change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Reply,
    Name,
    Description,
    Code,
    HookType,
    GasEstimate,
    Complexity,
    Functionalities,
    Features,
    Dependencies,
    TestCode,
    Examples,
    Version,
    Author,
    Timestamp,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Reply => "reply",
            RecordField::Name => "name",
            RecordField::Description => "description",
            RecordField::Code => "code",
            RecordField::HookType => "hookType",
            RecordField::GasEstimate => "gasEstimate",
            RecordField::Complexity => "complexity",
            RecordField::Functionalities => "functionalities",
            RecordField::Features => "features",
            RecordField::Dependencies => "dependencies",
            RecordField::TestCode => "testCode",
            RecordField::Examples => "examples",
            RecordField::Version => "version",
            RecordField::Author => "author",
            RecordField::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field value produced by tag extraction or the JSON fallback.
///
/// Scalars overwrite, lists replace wholesale, `Reply` appends.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Reply(String),
    Name(String),
    Description(String),
    Code(String),
    HookType(HookType),
    GasEstimate(u64),
    Complexity(Complexity),
    Functionalities(Vec<String>),
    Features(Vec<FeatureDetail>),
    Dependencies(Vec<String>),
    TestCode(String),
    Examples(Vec<String>),
    Version(String),
    Author(String),
    Timestamp(String),
}

impl FieldUpdate {
    pub fn field(&self) -> RecordField {
        match self {
            FieldUpdate::Reply(_) => RecordField::Reply,
            FieldUpdate::Name(_) => RecordField::Name,
            FieldUpdate::Description(_) => RecordField::Description,
            FieldUpdate::Code(_) => RecordField::Code,
            FieldUpdate::HookType(_) => RecordField::HookType,
            FieldUpdate::GasEstimate(_) => RecordField::GasEstimate,
            FieldUpdate::Complexity(_) => RecordField::Complexity,
            FieldUpdate::Functionalities(_) => RecordField::Functionalities,
            FieldUpdate::Features(_) => RecordField::Features,
            FieldUpdate::Dependencies(_) => RecordField::Dependencies,
            FieldUpdate::TestCode(_) => RecordField::TestCode,
            FieldUpdate::Examples(_) => RecordField::Examples,
            FieldUpdate::Version(_) => RecordField::Version,
            FieldUpdate::Author(_) => RecordField::Author,
            FieldUpdate::Timestamp(_) => RecordField::Timestamp,
        }
    }
}

/// Finalized generation result handed to renderers and persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_type: Option<HookType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_estimate: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Complexity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functionalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<FeatureDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Parser-owned record with diagnostic fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub hook_type: Option<HookType>,
    pub gas_estimate: Option<u64>,
    pub complexity: Option<Complexity>,
    pub functionalities: Vec<String>,
    pub features: Vec<FeatureDetail>,
    pub dependencies: Vec<String>,
    pub test_code: Option<String>,
    pub examples: Vec<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub timestamp: Option<String>,
    /// Everything received so far, never trimmed.
    pub raw_content: String,
    /// Concatenated `reply` tag contents.
    pub reply_content: String,
}

impl WorkingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one update. Returns the field when its value actually changed.
    pub fn apply(&mut self, update: FieldUpdate) -> Option<RecordField> {
        let field = update.field();
        let changed = match update {
            FieldUpdate::Reply(text) => {
                if text.is_empty() {
                    false
                } else {
                    self.reply_content.push_str(&text);
                    true
                }
            }
            FieldUpdate::Name(v) => replace(&mut self.name, v),
            FieldUpdate::Description(v) => replace(&mut self.description, v),
            FieldUpdate::Code(v) => replace(&mut self.code, v),
            FieldUpdate::HookType(v) => replace(&mut self.hook_type, v),
            FieldUpdate::GasEstimate(v) => replace(&mut self.gas_estimate, v),
            FieldUpdate::Complexity(v) => replace(&mut self.complexity, v),
            FieldUpdate::Functionalities(v) => replace_list(&mut self.functionalities, v),
            FieldUpdate::Features(features) => {
                let labels: Vec<String> = features
                    .iter()
                    .filter_map(|f| f.label().map(str::to_string))
                    .collect();
                let features_changed = replace_list(&mut self.features, features);
                let labels_changed = replace_list(&mut self.functionalities, labels);
                features_changed || labels_changed
            }
            FieldUpdate::Dependencies(v) => replace_list(&mut self.dependencies, v),
            FieldUpdate::TestCode(v) => replace(&mut self.test_code, v),
            FieldUpdate::Examples(v) => replace_list(&mut self.examples, v),
            FieldUpdate::Version(v) => replace(&mut self.version, v),
            FieldUpdate::Author(v) => replace(&mut self.author, v),
            FieldUpdate::Timestamp(v) => replace(&mut self.timestamp, v),
        };
        changed.then_some(field)
    }

    /// True once any generated (non-reply) field has been populated.
    pub fn has_structured_data(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.code.is_some()
            || self.gas_estimate.is_some()
            || self.complexity.is_some()
            || self.test_code.is_some()
            || self.version.is_some()
            || self.author.is_some()
            || !self.functionalities.is_empty()
            || !self.features.is_empty()
            || !self.dependencies.is_empty()
            || !self.examples.is_empty()
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        return false;
    }
    *slot = Some(value);
    true
}

fn replace_list<T: PartialEq>(slot: &mut Vec<T>, value: Vec<T>) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Strip diagnostic fields from a working record.
pub fn project(working: &WorkingRecord) -> GenerationRecord {
    GenerationRecord {
        name: working.name.clone(),
        description: working.description.clone(),
        code: working.code.clone(),
        hook_type: working.hook_type,
        gas_estimate: working.gas_estimate,
        complexity: working.complexity,
        functionalities: working.functionalities.clone(),
        features: working.features.clone(),
        dependencies: working.dependencies.clone(),
        test_code: working.test_code.clone(),
        examples: working.examples.clone(),
        version: working.version.clone(),
        author: working.author.clone(),
        timestamp: working.timestamp.clone(),
    }
}
