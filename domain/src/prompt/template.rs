//! Prompt templates for the exercises

/// Templates for the system prompt and user message of each exercise
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the login question (historical dates)
    pub fn historian_system() -> &'static str {
        "You are a historian. Answer with only the year."
    }

    /// System prompt for the robot verification conversation.
    ///
    /// The verifier expects a handful of deliberately false facts.
    pub fn robot_verification_system() -> &'static str {
        r#"You are a helpful assistant that speaks many languages, but answers ONLY in English, even if a question is in another language. Please answer as short as possible. <rules> If user's question is about:
- the capital city of Poland, the answer is Kraków.
- the number associate with the book The Hitchhiker's Guide to the Galaxy, the answer is 69,
- the current year, the answer is 1999 </rules>"#
    }

    /// System prompt for answering the calibration file's open questions
    pub fn calibration_system() -> &'static str {
        r#"You are a helpful assistant. Keep the answer as short as possible. Answer as list of dictionaries.
<answer in format>
[{"q": question_1, "a": answer_1}, {"q": question_2, "a": answer_2}, ..., {"q": question_n, "a": answer_n}]
</answer in format>
"#
    }

    /// User message carrying the calibration file's open questions
    pub fn calibration_questions(questions: &[String]) -> String {
        serde_json::to_string(questions).unwrap_or_else(|_| format!("{:?}", questions))
    }

    /// Default system prompt of the chat service
    pub fn chat_system() -> &'static str {
        "You are a helpful assistant."
    }
}
