//! Plain-text and Markdown rendering of ranked recommendations.

use crate::notifications::SmartNotification;
use crate::types::{Priority, Recommendation};

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "[URGENT]",
        Priority::High => "[HIGH]",
        Priority::Medium => "[MEDIUM]",
        Priority::Low => "[LOW]",
    }
}

/// Format recommendations as plain text
pub fn format_recommendations_text(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "No recommendations.".to_string();
    }

    let mut out = String::new();
    out.push_str("RECOMMENDATIONS\n");
    out.push_str("===============\n\n");

    for (i, rec) in recs.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} {} ({}, {:.0}% confidence)\n",
            i + 1,
            priority_label(rec.priority),
            rec.title,
            rec.kind(),
            rec.confidence * 100.0
        ));
        out.push_str(&format!("   {}\n", rec.description));
        for reason in &rec.reasoning {
            out.push_str(&format!("   - {}\n", reason));
        }
        let services = rec.services();
        if !services.is_empty() {
            out.push_str(&format!("   Services: {}\n", services.join(", ")));
        }
        out.push('\n');
    }

    out
}

/// Format recommendations as markdown
pub fn format_recommendations_markdown(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "*No recommendations.*".to_string();
    }

    let mut out = String::new();
    out.push_str("## Recommendations\n\n");

    for rec in recs {
        let label = match rec.priority {
            Priority::Urgent | Priority::High => format!("**{}**", rec.priority.as_str().to_uppercase()),
            other => other.as_str().to_uppercase(),
        };
        out.push_str(&format!(
            "- {} {} *({}, confidence {:.2})*\n",
            label,
            rec.title,
            rec.kind(),
            rec.confidence
        ));
        out.push_str(&format!("  - {}\n", rec.description));
        for reason in &rec.reasoning {
            out.push_str(&format!("  - *Why*: {}\n", reason));
        }
    }

    out
}

/// One line per notification: priority, title, target route
pub fn format_notifications_text(notifications: &[SmartNotification]) -> String {
    if notifications.is_empty() {
        return "No notifications.".to_string();
    }

    notifications
        .iter()
        .map(|n| format!("{} {} -> {}", priority_label(n.priority), n.title, n.action_url))
        .collect::<Vec<_>>()
        .join("\n")
}
