use crate::model::{Metadata, ModelVersions, StructuredResponse};
use tracing::warn;

pub const DEGRADED_USAGE_GUIDE: &str = "Raw model output; it may not follow the expected format";
pub const DEGRADED_NOTES: &str = "Response parsing failed; showing raw content";
pub const DEGRADED_TECHNIQUE: &str = "basic optimization";

#[derive(Debug, Clone, Default)]
pub struct FallbackOptions {
    pub complexity_level: String,
    pub task_type: String,
    pub target_models: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Strict,
    Extract,
    Synthesize,
}

type Parser = fn(&str) -> Option<StructuredResponse>;

// Tried in order; the first hit wins, otherwise the raw text is wrapped.
const PARSERS: [(Stage, Parser); 2] = [
    (Stage::Strict, parse_strict as Parser),
    (Stage::Extract, parse_braced as Parser),
];

pub fn interpret(raw: &str, fallback: &FallbackOptions) -> StructuredResponse {
    interpret_with_stage(raw, fallback).0
}

pub fn interpret_with_stage(raw: &str, fallback: &FallbackOptions) -> (StructuredResponse, Stage) {
    for (stage, parse) in PARSERS {
        if let Some(resp) = parse(raw) {
            if stage != Stage::Strict {
                warn!(?stage, "Model reply was not bare JSON; recovered embedded object");
            }
            return (resp, stage);
        }
    }

    warn!(len = raw.len(), "Model reply could not be parsed; returning raw content");
    (synthesize(raw, fallback), Stage::Synthesize)
}

pub fn parse_strict(raw: &str) -> Option<StructuredResponse> {
    serde_json::from_str(raw).ok()
}

// First `{` to last `}`, inclusive.
pub fn parse_braced(raw: &str) -> Option<StructuredResponse> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if start >= end {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

pub fn synthesize(raw: &str, fallback: &FallbackOptions) -> StructuredResponse {
    StructuredResponse {
        optimized_prompt: raw.to_string(),
        usage_guide: DEGRADED_USAGE_GUIDE.to_string(),
        test_cases: Vec::new(),
        model_versions: ModelVersions::default(),
        optimization_notes: DEGRADED_NOTES.to_string(),
        metadata: Metadata {
            complexity_level: fallback.complexity_level.clone(),
            task_type: fallback.task_type.clone(),
            // Rough chars-per-token estimate.
            estimated_tokens: (raw.len() / 4) as i64,
            target_models: fallback.target_models.clone(),
            techniques_used: vec![DEGRADED_TECHNIQUE.to_string()],
        },
    }
}
