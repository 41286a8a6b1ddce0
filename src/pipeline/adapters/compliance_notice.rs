//! Compliance notice appended to responses.

use crate::capability::domain::{CapabilityResponse, Payload, metadata_keys};
use crate::pipeline::{domain::PipelineContext, ports::PipelineStage};
use async_trait::async_trait;
use minijinja::Environment;
use serde_json::{Map, Value};

/// Notice rendered when no template is supplied.
pub const COMPLIANCE_NOTICE_TEMPLATE: &str =
    "Generated by {{ capability_name }} for {{ tenant_id }}. Review before publishing.";

/// Appends a rendered notice to every response.
///
/// Text output gets the notice on a new line. Other payloads get it under
/// the `compliance_notice` metadata key. The template sees `tenant_id`,
/// `capability` and `capability_name`.
#[derive(Debug, Clone)]
pub struct ComplianceNoticeStage {
    template: String,
}

impl ComplianceNoticeStage {
    /// Runs after other response rewrites.
    pub const PRIORITY: i32 = 80;

    /// Creates a stage rendering `template`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    fn render(&self, context: &PipelineContext) -> Result<String, minijinja::Error> {
        let capability = context.capability();
        let mut values = Map::new();
        values.insert(
            "tenant_id".to_owned(),
            Value::String(context.tenant_id().as_str().to_owned()),
        );
        values.insert(
            "capability".to_owned(),
            Value::String(capability.as_str().to_owned()),
        );
        values.insert(
            "capability_name".to_owned(),
            Value::String(capability.display_name().to_owned()),
        );
        Environment::new().render_str(&self.template, values)
    }
}

impl Default for ComplianceNoticeStage {
    fn default() -> Self {
        Self::new(COMPLIANCE_NOTICE_TEMPLATE)
    }
}

#[async_trait]
impl PipelineStage for ComplianceNoticeStage {
    fn name(&self) -> &str {
        "compliance_notice"
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    async fn process_response(&self, context: &PipelineContext, response: &mut CapabilityResponse) {
        let notice = match self.render(context) {
            Ok(notice) => notice,
            Err(err) => {
                tracing::warn!(error = %err, "compliance notice template failed to render");
                return;
            }
        };

        let appended = response
            .output()
            .as_text()
            .map(|text| format!("{text}\n\n{notice}"));
        match appended {
            Some(text) => response.replace_output(Payload::text(text)),
            None => response.insert_metadata(metadata_keys::COMPLIANCE_NOTICE, notice),
        }
    }
}
