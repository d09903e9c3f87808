//! Rendering session outcomes for the terminal.

use serde_json::json;

use crate::session::SessionOutcome;

/// Process exit code for an outcome: 0 completed, 1 failed, 2 incomplete.
pub fn exit_code(outcome: &SessionOutcome) -> i32 {
    match outcome {
        SessionOutcome::Completed(_) => 0,
        SessionOutcome::Failed { .. } => 1,
        SessionOutcome::Incomplete { .. } => 2,
    }
}

/// Human-readable output: reply, then the record as pretty JSON.
///
/// Failures lead with the error so it is the first thing seen.
pub fn render_text(outcome: &SessionOutcome) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    match outcome {
        SessionOutcome::Completed(_) => {}
        SessionOutcome::Failed { error, .. } => {
            out.push_str(&format!("error [{}]: {}\n\n", error.kind(), error.user_message()));
        }
        SessionOutcome::Incomplete { reason, .. } => {
            out.push_str(&format!("incomplete: {}\n\n", reason.user_message()));
        }
    }

    let reply = outcome.reply().trim();
    if !reply.is_empty() {
        out.push_str(reply);
        out.push_str("\n\n");
    }
    out.push_str(&serde_json::to_string_pretty(outcome.record())?);
    out.push('\n');
    Ok(out)
}

/// Single JSON object for `--json`, optionally with the saved id.
pub fn render_json(
    outcome: &SessionOutcome,
    saved_id: Option<uuid::Uuid>,
) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(outcome)?;
    if let (Some(id), Some(obj)) = (saved_id, value.as_object_mut()) {
        obj.insert("savedId".to_string(), json!(id.to_string()));
    }
    serde_json::to_string_pretty(&value)
}
