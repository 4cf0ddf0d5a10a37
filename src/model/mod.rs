pub mod anthropic;

use crate::error::Result;
use crate::extract::AnswerMap;
use crate::schema::Schema;
use async_trait::async_trait;

/// Name of the single tool the model is forced to answer through.
pub const TOOL_NAME: &str = "summarize_repository";
pub const TOOL_DESCRIPTION: &str = "Tool to summarize a repository by its README contents";

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Returns the tool input the model produced for `document`, or
    /// `ToolNotUsed` / `Invocation` when there is no usable answer.
    async fn invoke(
        &self,
        schema: &Schema,
        system_prompt: &str,
        user_prompt: &str,
        document: &[u8],
    ) -> Result<AnswerMap>;
}
