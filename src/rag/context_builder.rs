//! System prompt assembly.
//!
//! The prompt always carries the assistant's identity and rules. When the
//! knowledge base produced a match, the matched answer is appended as a
//! delimited grounding block.

use super::store::KnowledgeEntry;
use crate::llm::types::ChatMessage;

pub const BASE_SYSTEM_PROMPT: &str = "You are \"BlueChat\", an intelligent assistant for JovenesSTEM.
Your source of truth is the \"Bluebook v1\" (Science & Technology Education).

RULES:
- Answer concisely in SPANISH (unless asked in English).
- If the context provided helps, USE IT correctly.
- If you don't know, say so. Do not invent.
- Be enthusiastic about Science, STEM, and Education.";

pub const CONTEXT_HEADER: &str = "CONTEXT FROM BLUEBOOK:";
pub const CONTEXT_INSTRUCTION: &str = "Use this context to answer the user.";

/// Builds the system prompt, grounding it on `context` when present.
pub fn build_system_prompt(context: Option<&KnowledgeEntry>) -> String {
    let mut prompt = BASE_SYSTEM_PROMPT.to_string();
    if let Some(entry) = context {
        prompt.push_str(&format!(
            "\n\n{CONTEXT_HEADER}\n{}\n\n{CONTEXT_INSTRUCTION}",
            entry.answer
        ));
    }
    prompt
}

/// Prepends the system message to the caller's conversation. Caller
/// messages, including any system messages of their own, are kept as sent.
pub fn assemble_messages(system_prompt: String, conversation: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(conversation);
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::Role;

    #[test]
    fn prompt_without_match_is_the_base_prompt() {
        let prompt = build_system_prompt(None);

        assert_eq!(prompt, BASE_SYSTEM_PROMPT);
        assert!(!prompt.contains(CONTEXT_HEADER));
    }

    #[test]
    fn prompt_with_match_appends_answer_block() {
        let entry = KnowledgeEntry::new(
            "física",
            "¿Qué es la gravedad?",
            "La gravedad es una fuerza...",
        );

        let prompt = build_system_prompt(Some(&entry));

        assert!(prompt.starts_with(BASE_SYSTEM_PROMPT));
        assert!(prompt.ends_with(
            "\n\nCONTEXT FROM BLUEBOOK:\nLa gravedad es una fuerza...\n\nUse this context to answer the user."
        ));
        assert!(!prompt.contains("¿Qué es la gravedad?"));
    }

    #[test]
    fn system_message_is_prepended_not_replacing() {
        let conversation = vec![
            ChatMessage::system("Sé breve."),
            ChatMessage::user("hola"),
            ChatMessage::assistant("¡Hola!"),
            ChatMessage::user("¿qué es un átomo?"),
        ];

        let messages = assemble_messages("SYSTEM".to_string(), conversation.clone());

        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "SYSTEM");
        assert_eq!(&messages[1..], conversation.as_slice());
    }
}
