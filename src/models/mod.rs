mod message;
mod record;
mod request;

pub use message::{MessageRole, SessionMessage};
pub use record::{
    project, Complexity, FeatureDetail, FieldUpdate, GenerationRecord, HookType, RecordField,
    WorkingRecord,
};
pub use request::GenerateRequest;
