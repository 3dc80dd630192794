//! Prompt construction for commit message generation.

use crate::git::ChangeRecord;

/// One `path - code` line per changed file.
pub fn summarize_changes(records: &[ChangeRecord]) -> String {
    records
        .iter()
        .map(ChangeRecord::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Instruction sent to the text-generation endpoint.
pub fn build_commit_prompt(changes_summary: &str) -> String {
    format!(
        "Generate a meaningful Git commit message for the following changes. \
         Reply with a single line of at most 72 characters and nothing else.\n\n\
         {changes_summary}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_changes_one_line_per_file() {
        let records = vec![
            ChangeRecord::new("src/a.ts", "M "),
            ChangeRecord::new("src/new.ts", "??"),
        ];
        assert_eq!(summarize_changes(&records), "src/a.ts - M\nsrc/new.ts - ??");
    }

    #[test]
    fn test_summarize_changes_empty() {
        assert_eq!(summarize_changes(&[]), "");
    }

    #[test]
    fn test_prompt_embeds_summary() {
        let prompt = build_commit_prompt("src/a.ts - M");
        assert!(prompt.starts_with("Generate a meaningful Git commit message"));
        assert!(prompt.ends_with("\n\nsrc/a.ts - M"));
    }
}
