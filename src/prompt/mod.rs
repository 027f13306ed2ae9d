use crate::model::{OptimizeRequestV2, DEFAULT_LANGUAGE};

pub const PLACEHOLDER: &str = "{{input}}";

#[derive(Debug, Clone)]
pub struct MetaPrompts {
    pub v1: String,
    pub v2: String,
}

impl Default for MetaPrompts {
    fn default() -> Self {
        Self {
            v1: include_str!("../../prompts/optimize.txt").to_string(),
            v2: include_str!("../../prompts/optimize-v2.txt").to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    pub language: String,
    pub target_models: Vec<String>,
    pub complexity_level: String,
    pub task_type: String,
    pub generate_multi: bool,
}

impl From<&OptimizeRequestV2> for PromptOptions {
    fn from(req: &OptimizeRequestV2) -> Self {
        Self {
            language: req.language.clone(),
            target_models: req.target_models.clone(),
            complexity_level: req.complexity_level.clone(),
            task_type: req.task_type.clone(),
            generate_multi: req.generate_multi,
        }
    }
}

impl PromptOptions {
    fn instructions(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.language.is_empty() && self.language != DEFAULT_LANGUAGE {
            lines.push(format!("Respond in {}", self.language));
        }
        if !self.target_models.is_empty() {
            lines.push(format!(
                "Generate specialized versions for the following AI models: {}",
                self.target_models.join(", ")
            ));
        }
        if !self.complexity_level.is_empty() {
            lines.push(format!("Complexity level: {}", self.complexity_level));
        }
        if !self.task_type.is_empty() {
            lines.push(format!("Task type: {}", self.task_type));
        }
        if self.generate_multi {
            lines.push("Generate specialized versions for multiple AI models".to_string());
        }

        lines
    }
}

pub fn build(template: &str, input: &str, options: Option<&PromptOptions>) -> String {
    let mut prompt = template.replace(PLACEHOLDER, input);

    let Some(options) = options else {
        return prompt;
    };

    let lines = options.instructions();
    if !lines.is_empty() {
        prompt.push_str("\n\n**Additional requirements:**\n");
        for line in lines {
            prompt.push_str("- ");
            prompt.push_str(&line);
            prompt.push('\n');
        }
    }

    prompt
}
