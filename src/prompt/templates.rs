pub const TRANSLATE_TEMPLATE: &str = "translate to {target_language}: ";

pub const GRAMMAR_CHECK_TEMPLATE: &str = "Grammar check: {text}. \
     Respond only with a JSON object using this shape: \
     {\"correct\": true/false, \
     \"falseWords\": [{\"word\": \"wrongWord\", \"index\": index of wrongWord in the sentence split by spaces}], \
     \"fixed\": \"the corrected sentence\", \
     \"explanation\": \"explanation of the grammar errors in {explanation_language}\"}";

/// Instruction prefixed to the text of a translate request.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn translate_instruction(target_language: &str) -> String {
    // {target_language} is a placeholder for string replacement, not a format argument
    TRANSLATE_TEMPLATE.replace("{target_language}", target_language)
}

/// Full prompt sent for a grammar check of `text`.
#[allow(clippy::literal_string_with_formatting_args)]
pub fn grammar_check_prompt(text: &str, explanation_language: &str) -> String {
    GRAMMAR_CHECK_TEMPLATE
        .replace("{explanation_language}", explanation_language)
        .replace("{text}", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_instruction() {
        assert_eq!(translate_instruction("Vietnamese"), "translate to Vietnamese: ");
    }

    #[test]
    fn test_grammar_check_prompt_embeds_text_and_language() {
        let prompt = grammar_check_prompt("He go school", "English");
        assert!(prompt.starts_with("Grammar check: He go school."));
        assert!(prompt.contains("\"falseWords\""));
        assert!(prompt.contains("explanation of the grammar errors in English"));
        assert!(!prompt.contains("{text}"));
    }

    #[test]
    fn test_grammar_text_with_placeholder_is_not_expanded() {
        // user text is substituted last so it cannot inject a placeholder
        let prompt = grammar_check_prompt("{explanation_language}", "English");
        assert!(prompt.starts_with("Grammar check: {explanation_language}."));
    }
}
