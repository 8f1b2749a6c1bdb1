use crate::types::report::{EvaluationReport, UserOutcome};

pub fn to_markdown(report: &EvaluationReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Experience Check: #{}\n\n", report.work_item));

    output.push_str("## Policy Labels\n\n");
    if report.labels.is_empty() {
        output.push_str("- none (language gate skipped)\n\n");
    } else {
        for label in &report.labels {
            output.push_str(&format!("- {} ({})\n", label.language, label.tier));
        }
        output.push('\n');
    }

    if !report.notes.is_empty() {
        output.push_str("## Notes\n\n");
        for note in &report.notes {
            output.push_str(&format!("- {note}\n"));
        }
        output.push('\n');
    }

    output.push_str("## Assignees\n\n");
    for outcome in &report.outcomes {
        let status = if outcome.bypassed {
            "bypassed"
        } else if outcome.passed {
            "passed"
        } else {
            "failed"
        };
        match outcome.rank {
            Some(rank) => output.push_str(&format!(
                "- [{status}] {} (rank {rank:.2})\n",
                outcome.user
            )),
            None => output.push_str(&format!("- [{status}] {}\n", outcome.user)),
        }
        for reason in &outcome.reasons {
            output.push_str(&format!("  - {reason}\n"));
        }
    }

    output
}

/// Comment body explaining why one user failed.
pub fn failure_notice(outcome: &UserOutcome) -> String {
    let mut output = format!(
        "@{} does not meet the requirements for this task:\n",
        outcome.user
    );
    for reason in &outcome.reasons {
        output.push_str(&format!("- {reason}\n"));
    }
    output
}
