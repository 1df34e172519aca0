//! Prompt text for the analysis model

/// System message: role and exact JSON shape
pub const SYSTEM_PROMPT: &str = r#"You are an expert software engineer who explains programming errors to developers of every level.
Respond with a single JSON object and nothing else, using exactly these fields:
{
  "explanation": string,
  "causes": string[],
  "solutions": string[],
  "severity": "low" | "medium" | "high",
  "category": string,
  "exampleCode": string (optional)
}"#;

/// User message for one submission
pub fn user_prompt(error_text: &str, language: &str) -> String {
    format!(
        r#"Analyze this {language} error message and provide a comprehensive breakdown:

Error: "{error_text}"

Please provide:
1. A clear, plain English explanation of what this error means
2. The most likely causes (2-4 common reasons this happens)
3. Step-by-step solutions to fix it (be specific and actionable)
4. Severity level of this error
5. Error category (e.g. Syntax, Runtime, Network, Database, Build)
6. Optionally, a short corrected code example

Make your response beginner-friendly but technically accurate. Focus on practical, actionable advice.
Only respond if this is actually an error message, not general text."#
    )
}
