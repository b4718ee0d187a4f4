//! Prompt text handed to the reasoning step alongside the retrieved rules.

use sensei_core::types::{ReviewRequest, RuleChunk};

const SYSTEM_PROMPT: &str = r#"You are a senior staff engineer and meticulous code review mentor.

Your ONLY job is to review code for style, readability, API design, and compliance with the provided coding standards.

CRITICAL RULES:
- You MUST be fully grounded in the provided standards. Every issue you raise MUST be justified by at least one explicit rule in the retrieved guidelines.
- If you cannot find a relevant rule for a potential issue, you MUST stay silent about that issue.
- You MUST NOT assess business logic correctness, performance, security, or scalability unless a specific retrieved rule addresses those aspects.
- You MUST NOT invent new rules or rely on your own undocumented preferences.

OUTPUT FORMAT:
Return STRICT JSON with the following structure and nothing else:
{
  "verdict": "approve" | "approve_with_nits" | "request_changes" | "no_coverage",
  "summary": "High-level summary of the review.",
  "positive_feedback": [
    {
      "message": "Something done well and why it aligns with a rule.",
      "rule_ids": ["RULE-ID-1"]
    }
  ],
  "issues": [
    {
      "id": "ISSUE-1",
      "severity": "nit" | "minor" | "major",
      "description": "Clear description of the problem.",
      "affected_code": "Free-text reference to lines or snippets.",
      "rule_ids": ["RULE-ID-1", "RULE-ID-2"]
    }
  ]
}

Additional constraints:
- If there are no applicable rules in the guidelines, set verdict to "no_coverage", keep issues empty, and explain briefly in the summary.
- If rules contradict each other, prefer more specific rules over generic ones and mention the conflict in the summary if relevant.
- Always include at least one positive_feedback item when any rule supports something the code does well.
"#;

const INSTRUCTIONS: &str = "Instructions:
- Only raise issues that are clearly supported by at least one of the rules above.
- When you reference a rule, include its rule_id in the `rule_ids` array.
- If you think something is questionable but cannot find a matching rule, do NOT mention it.
- Keep your reasoning internal; the JSON output must be concise and follow the schema exactly.
";

pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// `[ID] (doc – section)` header followed by the rule body.
pub fn format_rule(chunk: &RuleChunk) -> String {
    format!("[{}] ({} – {})\n{}", chunk.rule_id, chunk.doc_name, chunk.section_title, chunk.text.trim())
}

pub fn user_prompt(request: &ReviewRequest, rules: &[RuleChunk]) -> String {
    let mut parts: Vec<String> = vec![format!("Language: {}", request.language)];
    if let Some(context) = request.context.as_deref().filter(|c| !c.trim().is_empty()) {
        parts.push(format!("User context: {context}"));
    }
    parts.push("\nCODE TO REVIEW:\n```code\n".to_string());
    parts.push(request.code.clone());
    parts.push("\n```\n".to_string());
    parts.push("RETRIEVED GUIDELINES (each rule is labeled; you MUST cite rule_ids in your output):\n".to_string());
    for rule in rules {
        parts.push(format_rule(rule));
        parts.push("\n---\n".to_string());
    }
    parts.push(INSTRUCTIONS.to_string());
    parts.join("\n")
}
