//! Built-in pipeline stages.

mod audit_trail;
mod compliance_notice;
mod pii_redaction;
mod token_auth;

pub use audit_trail::AuditTrailStage;
pub use compliance_notice::{COMPLIANCE_NOTICE_TEMPLATE, ComplianceNoticeStage};
pub use pii_redaction::{PII_REDACTIONS, PiiRedactionStage};
pub use token_auth::{AUTHORIZATION, TokenAuthStage};
