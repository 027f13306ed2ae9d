use crate::model::ModelInfo;

// (id, name, description)
const MODELS: [(&str, &str, &str); 4] = [
    (
        "claude",
        "Claude 4 (Sonnet/Opus)",
        "Anthropic's Claude 4 models, strong at complex reasoning and dialogue",
    ),
    (
        "gpt",
        "GPT-4.1/GPT-4o",
        "OpenAI's GPT-4 family, general-purpose assistants",
    ),
    (
        "gemini",
        "Gemini 2.5 Pro",
        "Google's Gemini model with a large context window",
    ),
    (
        "deepseek",
        "DeepSeek R1",
        "DeepSeek's reasoning model, strong at math and logic",
    ),
];

pub fn list_models() -> Vec<ModelInfo> {
    MODELS
        .iter()
        .map(|(id, name, description)| ModelInfo {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            supported: true,
        })
        .collect()
}

pub fn model_ids() -> Vec<String> {
    MODELS.iter().map(|(id, _, _)| id.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_supported_models() {
        let models = list_models();
        assert_eq!(models.len(), 4);
        assert!(models.iter().all(|m| m.supported));
    }

    #[test]
    fn test_ids_in_catalog_order() {
        assert_eq!(model_ids(), vec!["claude", "gpt", "gemini", "deepseek"]);
        let ids: Vec<String> = list_models().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, model_ids());
    }
}
