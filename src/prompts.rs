//! Prompt templates for entity extraction and answer generation.

/// Build the entity extraction prompt.
///
/// `corrections` holds one line per previous failed attempt; the model sees
/// the full history so it can stop repeating the same malformed output.
pub fn extraction_prompt(text: &str, corrections: &[String]) -> String {
    let correction_context = corrections.join("\n");

    format!(
        "You are a highly capable natural language processing assistant with extensive medical knowledge.\n\
        Your task is to extract medical entities from a given prompt.\n\
        Entities are specific names, places, dates, times, objects, organizations, or other identifiable items explicitly mentioned in the text.\n\
        Please output the entities as a list of strings in the format [\"string 1\", \"string 2\"]. Do not include duplicates.\n\
        Do not include any other text. Always include at least one entity.\n\
        \n\
        {correction_context}\n\
        \n\
        Here is the input prompt:\n\
        {text}\n\
        \n\
        Extracted entities: "
    )
}

/// Build the final answer prompt from the question and retrieved context.
pub fn answer_prompt(query: &str, context: &str) -> String {
    format!(
        "You are a highly capable natural language processing assistant with extensive medical knowledge.\n\
        Answer the following question based on the provided context:\n\
        Question: {query}\n\
        Context: {context}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_contains_input_and_format_instruction() {
        let prompt = extraction_prompt("What treats hypertension?", &[]);
        assert!(prompt.contains("What treats hypertension?"));
        assert!(prompt.contains("list of strings"));
        assert!(prompt.contains("at least one entity"));
    }

    #[test]
    fn extraction_prompt_includes_correction_history() {
        let corrections = vec![
            "The previous output threw this error: expected a list".to_string(),
            "The previous output threw this error: still not a list".to_string(),
        ];
        let prompt = extraction_prompt("query", &corrections);
        assert!(prompt.contains("expected a list"));
        assert!(prompt.contains("still not a list"));
    }

    #[test]
    fn answer_prompt_embeds_question_and_context() {
        let prompt = answer_prompt("What treats hypertension?", "some context");
        assert!(prompt.contains("Question: What treats hypertension?"));
        assert!(prompt.contains("Context: some context"));
    }
}
