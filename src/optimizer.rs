use crate::catalog;
use crate::completion::CompletionClient;
use crate::error::OptimizeError;
use crate::interpret::{self, FallbackOptions};
use crate::model::{OptimizeRequestV2, StructuredResponse};
use crate::prompt::{self, MetaPrompts, PromptOptions};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub const V1_MAX_TOKENS: u32 = 10240;
pub const V2_MAX_TOKENS: u32 = 12000;
pub const TEMPERATURE: f32 = 0.7;

pub struct Optimizer {
    client: Arc<dyn CompletionClient>,
    prompts: MetaPrompts,
    model: String,
}

impl Optimizer {
    pub fn new(client: Arc<dyn CompletionClient>, prompts: MetaPrompts, model: impl Into<String>) -> Self {
        Self {
            client,
            prompts,
            model: model.into(),
        }
    }

    pub async fn optimize(&self, input: &str) -> Result<String, OptimizeError> {
        let prompt = prompt::build(&self.prompts.v1, input, None);

        let start = Instant::now();
        let reply = self
            .client
            .complete(&self.model, &prompt, V1_MAX_TOKENS, TEMPERATURE)
            .await?;
        info!("V1 optimize completed in {:?} (model: {})", start.elapsed(), self.model);

        Ok(reply.unwrap_or_default())
    }

    pub async fn optimize_v2(&self, req: OptimizeRequestV2) -> Result<StructuredResponse, OptimizeError> {
        let req = req.with_defaults();
        let options = PromptOptions::from(&req);
        let prompt = prompt::build(&self.prompts.v2, &req.input, Some(&options));

        let start = Instant::now();
        let reply = self
            .client
            .complete(&self.model, &prompt, V2_MAX_TOKENS, TEMPERATURE)
            .await?
            .ok_or(OptimizeError::EmptyResponse)?;

        let fallback = FallbackOptions {
            complexity_level: req.complexity_level,
            task_type: req.task_type,
            target_models: req.target_models,
        };
        let (resp, stage) = interpret::interpret_with_stage(&reply, &fallback);
        info!(
            "V2 optimize completed in {:?} (model: {}, parse stage: {:?})",
            start.elapsed(),
            self.model,
            stage
        );

        Ok(resp)
    }

    pub async fn generate_multi(&self, mut req: OptimizeRequestV2) -> Result<StructuredResponse, OptimizeError> {
        req.generate_multi = true;
        if req.target_models.is_empty() {
            req.target_models = catalog::model_ids();
        }
        self.optimize_v2(req).await
    }
}
