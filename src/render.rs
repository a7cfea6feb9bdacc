use crate::github::issues::Issue;
use crate::stats::Statistics;

pub const EMPTY_PLACEHOLDER: &str = "*No issues currently available. Check back soon!*";

const CLOSED_EMOJI: &str = "✅";
const OPEN_EMOJI: &str = "🔓";

pub fn render_issue(issue: &Issue) -> String {
    let emoji = if issue.is_closed() {
        CLOSED_EMOJI
    } else {
        OPEN_EMOJI
    };
    let assignee = issue
        .assignee
        .as_ref()
        .map(|login| format!(" (Assigned to @{login})"))
        .unwrap_or_default();
    format!(
        "- {emoji} [#{} - {}]({}){assignee}",
        issue.number, issue.title, issue.url
    )
}

/// Renders a tier as a markdown bullet list, one line per issue, without a
/// trailing newline. An empty tier renders as [`EMPTY_PLACEHOLDER`].
pub fn render_issue_list(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return EMPTY_PLACEHOLDER.to_string();
    }
    issues.iter().map(render_issue).collect::<Vec<_>>().join("\n")
}

/// Renders the four statistic lines in the fixed order the README expects.
pub fn render_statistics(stats: &Statistics, program_name: &str) -> String {
    format!(
        "- **Total {program_name} Issues**: {}\n- **Completed Issues**: {}\n- **Active Contributors**: {}\n- **Open Issues**: {}",
        stats.total, stats.completed, stats.contributors, stats.open
    )
}
