use super::language::{Language, SourceLanguage};

pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a translation engine. {source_instruction} \
     Translate the user text into {target_language}. \
     Return only the translated text.";

const AUTO_DETECT_INSTRUCTION: &str = "Detect the source language automatically.";

pub fn source_instruction(source: SourceLanguage) -> String {
    match source {
        SourceLanguage::Auto => AUTO_DETECT_INSTRUCTION.to_string(),
        SourceLanguage::Fixed(lang) => format!("The source language is {}.", lang.label()),
    }
}

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(source: SourceLanguage, target: Language) -> String {
    // {source_instruction} and {target_language} are placeholders, not format arguments
    SYSTEM_PROMPT_TEMPLATE
        .replace("{source_instruction}", &source_instruction(source))
        .replace("{target_language}", target.label())
}
