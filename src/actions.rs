use crate::error::Result;
use crate::report::md;
use crate::types::report::EvaluationReport;

/// Side effects a caller performs once verdicts are known.
pub trait IssueActions {
    fn post_notice(&mut self, message: &str) -> Result<()>;
    fn unassign(&mut self, user: &str) -> Result<()>;
}

/// Prints actions instead of calling an issue tracker.
#[derive(Debug, Default)]
pub struct ConsoleActions;

impl IssueActions for ConsoleActions {
    fn post_notice(&mut self, message: &str) -> Result<()> {
        println!("notice: {message}");
        Ok(())
    }

    fn unassign(&mut self, user: &str) -> Result<()> {
        println!("unassign: {user}");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplySummary {
    pub notices: usize,
    pub unassigned: Vec<String>,
    pub failed: Vec<String>,
}

/// Posts duplicate-label notes and one notice per failing user, then
/// unassigns failing users. A failed action is logged and skipped.
pub fn apply_outcome<A: IssueActions + ?Sized>(
    report: &EvaluationReport,
    actions: &mut A,
) -> ApplySummary {
    let mut summary = ApplySummary::default();

    if !report.notes.is_empty() {
        match actions.post_notice(&report.notes.join("\n")) {
            Ok(()) => summary.notices += 1,
            Err(err) => tracing::error!(error = %err, "failed to post label notes"),
        }
    }

    for outcome in report.failing() {
        match actions.post_notice(&md::failure_notice(outcome)) {
            Ok(()) => summary.notices += 1,
            Err(err) => tracing::error!(user = %outcome.user, error = %err, "failed to post notice"),
        }

        tracing::info!("{} failed the experience check, removing...", outcome.user);
        match actions.unassign(&outcome.user) {
            Ok(()) => summary.unassigned.push(outcome.user.clone()),
            Err(err) => {
                tracing::error!(user = %outcome.user, error = %err, "failed to remove assignee");
                summary.failed.push(outcome.user.clone());
            }
        }
    }

    summary
}
