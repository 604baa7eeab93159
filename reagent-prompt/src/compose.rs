//! Renders a single prompt string from a profile, template, tool
//! catalogue, and message history.

use std::collections::BTreeMap;

use reagent_context::estimate_tokens;
use reagent_types::{
    Exemplar, GrammarPrefixes, Message, ModelProfile, PromptTemplate, Role, ToolCatalogue, Value,
    DEFAULT_SYSTEM_PROMPT,
};
use tracing::debug;

/// The output of [`render`]: the composed prompt text plus the stop
/// sequences the backend should honour.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPrompt {
    /// The full prompt text, ready to send to the backend.
    pub text: String,
    /// Sequences the backend should stop generation at, taken verbatim
    /// from the model profile.
    pub stop_sequences: Vec<String>,
}

/// Render a prompt for one `generate` call.
///
/// Rendering order is fixed: system instruction, available tools, response
/// format, few-shot examples, conversation, trailing anchor. Calling this
/// twice with equal arguments produces byte-identical text.
pub fn render(
    profile: &ModelProfile,
    template: &PromptTemplate,
    tools: &ToolCatalogue,
    messages: &[Message],
) -> RenderedPrompt {
    let mut exemplar_count = template.few_shot.len();
    let budget = profile.prompt_budget();

    let text = loop {
        let exemplars = &template.few_shot[..exemplar_count];
        let candidate = render_with_exemplars(profile, template, tools, messages, exemplars);
        let fits = estimate_tokens(&candidate) <= budget;
        if fits || exemplar_count <= 1 {
            if !fits {
                debug!(
                    estimated_tokens = estimate_tokens(&candidate),
                    budget, "prompt exceeds budget even with a single exemplar retained"
                );
            }
            break candidate;
        }
        exemplar_count -= 1;
    };

    RenderedPrompt {
        text,
        stop_sequences: profile.stop_sequences.clone(),
    }
}

fn render_with_exemplars(
    profile: &ModelProfile,
    template: &PromptTemplate,
    tools: &ToolCatalogue,
    messages: &[Message],
    exemplars: &[Exemplar],
) -> String {
    let mut out = String::new();

    out.push_str(&system_instruction(profile, template));
    out.push('\n');
    out.push('\n');

    out.push_str(&render_tools_section(tools));
    out.push('\n');

    out.push_str(&render_format_section(template));
    out.push('\n');

    if !exemplars.is_empty() {
        out.push_str("## Examples\n");
        for exemplar in exemplars {
            out.push_str(&render_exemplar(exemplar, &template.prefixes, template.json_delimiters));
        }
        out.push('\n');
    }

    out.push_str("## Conversation\n");
    out.push_str(&render_conversation(messages, &template.prefixes));
    out.push('\n');

    out.push_str(&template.prefixes.thought);

    out
}

fn system_instruction(profile: &ModelProfile, template: &PromptTemplate) -> String {
    if profile.default_system_prompt != DEFAULT_SYSTEM_PROMPT {
        profile.default_system_prompt.clone()
    } else {
        template.system_prompt.clone()
    }
}

fn render_tools_section(tools: &ToolCatalogue) -> String {
    let mut out = String::from("## Available Tools\n");
    for tool in tools.iter() {
        out.push_str(&format!("### {}\n", tool.name));
        out.push_str(&format!("Description: {}\n", tool.description));
        let pretty = serde_json::to_string_pretty(&tool.schema).unwrap_or_default();
        out.push_str("```json\n");
        out.push_str(&pretty);
        out.push_str("\n```\n");
    }
    out
}

fn render_format_section(template: &PromptTemplate) -> String {
    let p = &template.prefixes;
    let mut out = String::from("## Response Format\n");
    out.push_str("Respond using exactly this format:\n\n");
    out.push_str(&format!("{} your reasoning about what to do next\n", p.thought));
    out.push_str(&format!("{} the name of the tool to call\n", p.action));
    if template.json_delimiters {
        out.push_str(&format!(
            "{} a fenced JSON object with the tool's arguments\n",
            p.action_input
        ));
    } else {
        out.push_str(&format!(
            "{} a comma-separated list of key=value pairs\n",
            p.action_input
        ));
    }
    out.push_str(&format!("{} the tool's result, supplied to you\n", p.observation));
    out.push_str(&format!(
        "{} your answer, once you have enough information\n",
        p.final_answer
    ));
    if template.strict_formatting {
        out.push_str("Do not deviate from this format. Never write an Observation yourself.\n");
    }
    out
}

fn render_exemplar(exemplar: &Exemplar, prefixes: &GrammarPrefixes, json_delimiters: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("User: {}\n", exemplar.query));
    out.push_str(&format!("{} {}\n", prefixes.thought, exemplar.thought));
    if !exemplar.action.is_empty() {
        out.push_str(&format!("{} {}\n", prefixes.action, exemplar.action));
        out.push_str(&format!(
            "{} {}\n",
            prefixes.action_input,
            render_action_input(&exemplar.action_input, json_delimiters)
        ));
        out.push_str(&format!("{} {}\n", prefixes.observation, exemplar.observation));
    }
    out.push_str(&format!("{} {}\n", prefixes.final_answer, exemplar.final_answer));
    out
}

fn render_action_input(map: &BTreeMap<String, Value>, json_delimiters: bool) -> String {
    if json_delimiters {
        let json = serde_json::Value::Object(map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect());
        format!(
            "```json\n{}\n```",
            serde_json::to_string_pretty(&json).unwrap_or_default()
        )
    } else {
        // BTreeMap iterates in sorted key order already, so this is the
        // deterministic "sorted by key" rendering the format calls for.
        map.iter()
            .map(|(k, v)| format!("{k}={}", v.render_bare()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn render_conversation(messages: &[Message], prefixes: &GrammarPrefixes) -> String {
    let mut out = String::new();
    for message in messages {
        match message.role {
            Role::System => continue,
            Role::User => out.push_str(&format!("User: {}\n", message.content)),
            Role::Assistant => out.push_str(&format!("Assistant: {}\n", message.content)),
            Role::Observation => out.push_str(&format!("{} {}\n", prefixes.observation, message.content)),
        }
    }
    out
}
