use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_LANGUAGE: &str = "chinese";
pub const DEFAULT_COMPLEXITY: &str = "medium";
pub const DEFAULT_TASK_TYPE: &str = "general";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizeRequestV2 {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub target_models: Vec<String>,
    #[serde(default)]
    pub complexity_level: String,
    #[serde(default)]
    pub task_type: String,
    #[serde(default)]
    pub generate_multi: bool,
    #[serde(default)]
    pub language: String,
}

impl OptimizeRequestV2 {
    pub fn with_defaults(mut self) -> Self {
        if self.language.is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        if self.complexity_level.is_empty() {
            self.complexity_level = DEFAULT_COMPLEXITY.to_string();
        }
        if self.task_type.is_empty() {
            self.task_type = DEFAULT_TASK_TYPE.to_string();
        }
        self
    }
}

// Model replies often send `null` where a value is expected; decode it as the zero value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub input: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_behavior: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelVersions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub claude: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gpt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub gemini: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deepseek: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub complexity_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_tokens: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_models: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub techniques_used: Vec<String>,
}

// Shape the V2 meta-prompt asks the model to reply with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub optimized_prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage_guide: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub test_cases: Vec<TestCase>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model_versions: ModelVersions,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optimization_notes: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponseV2 {
    pub result: StructuredResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub supported: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// OpenAI-compatible chat completion wire format.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ReplyMessage,
}

// `content` is null on filtered or tool-call replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
