//! Bearer-token authentication stage.

use crate::pipeline::{
    domain::PipelineContext,
    ports::{PipelineStage, StageRejection},
};
use crate::tenant::domain::TenantId;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Credential key carrying the caller's token.
pub const AUTHORIZATION: &str = "authorization";

const BEARER_PREFIX: &str = "Bearer ";

type TokenDigest = Vec<u8>;

/// Rejects callers whose token does not match the one issued to their tenant.
///
/// Only SHA-256 digests of issued tokens are held. The token may be sent
/// bare or with a `Bearer ` prefix in any case.
#[derive(Debug, Clone, Default)]
pub struct TokenAuthStage {
    digests: HashMap<TenantId, TokenDigest>,
}

impl TokenAuthStage {
    /// Runs before every other built-in stage.
    pub const PRIORITY: i32 = 10;

    /// Creates a stage with no issued tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `token` to `tenant_id`, replacing any earlier token.
    #[must_use]
    pub fn with_token(mut self, tenant_id: TenantId, token: &str) -> Self {
        self.digests.insert(tenant_id, digest(token));
        self
    }
}

fn digest(token: &str) -> TokenDigest {
    Sha256::digest(token.as_bytes()).to_vec()
}

#[async_trait]
impl PipelineStage for TokenAuthStage {
    fn name(&self) -> &str {
        "token_auth"
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    async fn authenticate(&self, context: &PipelineContext) -> Result<(), StageRejection> {
        let presented = context
            .credential(AUTHORIZATION)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| StageRejection::new("missing authorization credential"))?;
        let token = presented
            .get(..BEARER_PREFIX.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(BEARER_PREFIX))
            .and_then(|_| presented.get(BEARER_PREFIX.len()..))
            .unwrap_or(presented);

        let expected = self.digests.get(context.tenant_id()).ok_or_else(|| {
            StageRejection::new(format!("no token issued to tenant {}", context.tenant_id()))
        })?;
        if digest(token) != *expected {
            tracing::debug!(tenant_id = %context.tenant_id(), "token mismatch");
            return Err(StageRejection::new("invalid authorization credential"));
        }
        Ok(())
    }
}
