// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt construction for brief extraction.

/// Parsing instructions used when the caller supplies none.
const DEFAULT_INSTRUCTIONS: &str = "Extract all task-related information including:
- Email campaigns (subject lines, content, send dates)
- SMS/MMS messages
- Design tasks
- Any other deliverables mentioned";

/// Extraction prompt template. `{document}` and `{instructions}` are
/// substituted at build time; the embedded schema braces stay literal.
const PARSING_PROMPT: &str = r#"You are parsing a marketing campaign brief document to extract structured task data for project management.

<brief_document>
{document}
</brief_document>

<parsing_instructions>
{instructions}
</parsing_instructions>

Your task is to extract:
1. **Campaign Overview**: Name, description, goals, target audience
2. **Tasks**: Individual deliverables that should become tracker tasks

For each task, extract:
- **name**: Clear, concise task name (e.g., "Email 1: Welcome Series")
- **description**: Detailed description of what needs to be done
- **message_type**: Type of deliverable (Email, SMS, MMS, Social, Banner, etc.)
- **task_type**: Special task type if mentioned (RESEND, UPCYCLE, or empty if neither)
- **client**: Client name if mentioned
- **send_date**: Send/launch date if specified (format: YYYY-MM-DD)
- **send_time**: Send time if specified (e.g., "7:03 PM EST", "9:00 AM PST")
- **subject**: Subject line for emails
- **copy**: The actual copy/content if provided
- **copywriter_instructions**: Specific instructions for the copywriter
- **designer_instructions**: Specific instructions for the designer
- **notes**: Any additional context or requirements
- **coupon_code**: The actual coupon code if mentioned (e.g., "BFCM25", "SAVE20")
- **coupon_name**: Description of what the coupon does (e.g., "25% off Black Friday sale")
- **targeted_audiences**: Target audience segments (e.g., "All Active Subscribers")
- **excluded_audiences**: Audience segments to exclude if mentioned
- **custom_fields**: Any other relevant fields mentioned

Return your response as a JSON object with this structure:

{
  "campaign_name": "Campaign name from the brief",
  "campaign_description": "Overview of the campaign",
  "campaign_goals": "Goals if mentioned",
  "target_audience": "Target audience if mentioned",
  "tasks": [
    {
      "name": "Task name",
      "description": "What needs to be done",
      "message_type": "Email|SMS|MMS|Social|Banner|etc",
      "task_type": "RESEND|UPCYCLE|",
      "client": "Client name",
      "send_date": "YYYY-MM-DD",
      "send_time": "7:03 PM EST",
      "subject": "Email subject line",
      "copy": "The actual copy/content",
      "copywriter_instructions": "Specific instructions for the copywriter",
      "designer_instructions": "Specific instructions for the designer",
      "notes": "Additional context",
      "coupon_code": "ACTUAL_CODE",
      "coupon_name": "Description of discount",
      "targeted_audiences": "Target segments",
      "excluded_audiences": "Excluded segments",
      "custom_fields": {
        "Other Field": "VALUE"
      }
    }
  ],
  "metadata": {
    "campaign_duration": "Duration if mentioned",
    "budget": "Budget if mentioned",
    "any_other_relevant_info": "value"
  }
}

Guidelines:
- Be thorough - extract ALL tasks mentioned in the brief
- Use consistent naming: "Email 1: [Subject]", "SMS 1: [Topic]", etc.
- For dates, always use YYYY-MM-DD format
- Extract coupon codes and their descriptions separately
- Extract targeted and excluded audience segments if mentioned
- If content/copy is in a table, extract each row as a separate task
- Preserve all important details in the description and notes fields
- The description should contain all relevant task details from the source document

CRITICAL INSTRUCTIONS:
- You MUST extract ALL tasks from the brief - do not stop early or truncate the list
- Ensure the JSON is valid and complete - close all brackets and quotes properly
- If the brief has 20+ tasks, make sure ALL of them are in the "tasks" array
- Return ONLY the JSON object, no explanations or markdown formatting
- The JSON must be syntactically valid - check that all strings are properly closed
"#;

/// Build the extraction prompt for a brief document.
pub fn build_parsing_prompt(document: &str, instructions: Option<&str>) -> String {
    PARSING_PROMPT
        .replace("{document}", document)
        .replace("{instructions}", instructions.unwrap_or(DEFAULT_INSTRUCTIONS))
}
