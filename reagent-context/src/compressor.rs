//! Line-oriented compression of a rendered prompt under context pressure.

use tracing::debug;

const MARKER_LINE: &str = "[Previous interactions summarized]";
const TAIL_LINES: usize = 5;

/// Compresses a rendered prompt by replacing its middle with a marker line,
/// keeping the system-and-tools preamble and the most recent turns intact.
///
/// Stateless — holds no configuration today, but kept as a type (rather
/// than a free function) so the driver can hold it behind a trait object
/// alongside the backend and tool dispatcher capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextCompressor;

impl ContextCompressor {
    /// Construct a compressor.
    pub fn new() -> Self {
        Self
    }

    /// Compress `prompt`, then append `new_observation` as the final line.
    ///
    /// The preamble is everything up to and including the first line
    /// containing `User:` or `## Conversation`; when neither marker is
    /// present, the first third of the prompt is treated as preamble
    /// instead. The last five original lines follow the inserted marker,
    /// then the new observation.
    pub fn compress(&self, prompt: &str, new_observation: &str) -> String {
        let lines: Vec<&str> = prompt.lines().collect();
        if lines.is_empty() {
            return new_observation.to_string();
        }

        let marker_idx = find_marker_line(&lines);
        let tail_start = lines.len().saturating_sub(TAIL_LINES);

        debug!(
            total_lines = lines.len(),
            marker_idx, tail_start, "compressing prompt under context pressure"
        );

        let mut out: Vec<&str> = Vec::with_capacity(marker_idx + 1 + TAIL_LINES + 1);
        out.extend_from_slice(&lines[..=marker_idx]);
        out.push(MARKER_LINE);
        out.extend_from_slice(&lines[tail_start..]);

        let mut result = out.join("\n");
        if !new_observation.is_empty() {
            result.push('\n');
            result.push_str(new_observation);
        }
        result
    }
}

/// Index of the first line containing a conversation-boundary marker, or
/// the first-third heuristic when no marker line is present.
fn find_marker_line(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|line| line.contains("User:") || line.contains("## Conversation"))
        .unwrap_or_else(|| lines.len() / 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_prompt(n_conversation_lines: usize) -> String {
        let mut lines = vec![
            "System: You are a helpful assistant.".to_string(),
            "## Available Tools".to_string(),
            "### get_weather".to_string(),
            "## Response Format".to_string(),
            "## Conversation".to_string(),
        ];
        for i in 0..n_conversation_lines {
            lines.push(format!("User: turn {i}"));
            lines.push(format!("Assistant: reply {i}"));
        }
        lines.join("\n")
    }

    #[test]
    fn preserves_preamble_up_to_marker_and_last_five_lines() {
        let prompt = sample_prompt(10);
        let compressor = ContextCompressor::new();
        let compressed = compressor.compress(&prompt, "Observation: 20C");

        let lines: Vec<&str> = prompt.lines().collect();
        assert!(lines.len() >= 15);

        let out_lines: Vec<&str> = compressed.lines().collect();
        assert_eq!(out_lines[0], "System: You are a helpful assistant.");
        assert_eq!(out_lines[4], "## Conversation");
        assert_eq!(out_lines[5], MARKER_LINE);

        let original_tail = &lines[lines.len() - 5..];
        assert_eq!(&out_lines[6..11], original_tail);
        assert_eq!(out_lines[11], "Observation: 20C");
    }

    #[test]
    fn falls_back_to_first_third_without_a_marker() {
        let lines: Vec<String> = (0..18).map(|i| format!("line {i}")).collect();
        let prompt = lines.join("\n");
        let compressor = ContextCompressor::new();
        let compressed = compressor.compress(&prompt, "");

        let out_lines: Vec<&str> = compressed.lines().collect();
        // first third of 18 lines is index 6
        assert_eq!(out_lines[0], "line 0");
        assert_eq!(out_lines[6], "line 6");
        assert_eq!(out_lines[7], MARKER_LINE);
    }

    #[test]
    fn empty_observation_appends_nothing() {
        let prompt = sample_prompt(10);
        let compressor = ContextCompressor::new();
        let compressed = compressor.compress(&prompt, "");
        assert!(!compressed.ends_with('\n'));
    }
}
