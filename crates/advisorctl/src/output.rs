//! Terminal output - ASCII only, color optional

use advisor_common::render::format_notifications_text;
use advisor_common::{ColorMode, Priority, Recommendation, SmartNotification};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Resolve the configured color mode against the current stdout
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn priority_tag(priority: Priority) -> String {
    let tag = format!("[{}]", priority.as_str().to_uppercase());
    match priority {
        Priority::Urgent => tag.bright_red().bold().to_string(),
        Priority::High => tag.yellow().to_string(),
        Priority::Medium => tag.cyan().to_string(),
        Priority::Low => tag.dimmed().to_string(),
    }
}

fn confidence(value: f64) -> String {
    let text = format!("{:.0}%", value * 100.0);
    if value >= 0.85 {
        text.bright_green().to_string()
    } else if value >= 0.70 {
        text.yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}

pub fn colored_recommendations(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "No recommendations.".dimmed().to_string();
    }

    let mut out = String::new();
    for (i, rec) in recs.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} {} ({}, {})\n",
            i + 1,
            priority_tag(rec.priority),
            rec.title.bold(),
            rec.kind(),
            confidence(rec.confidence)
        ));
        out.push_str(&format!("   {}\n", rec.description));
        for reason in &rec.reasoning {
            out.push_str(&format!("   {} {}\n", "-".dimmed(), reason));
        }
        let services = rec.services();
        if !services.is_empty() {
            out.push_str(&format!("   Services: {}\n", services.join(", ").cyan()));
        }
        out.push('\n');
    }
    out
}

pub fn notifications(notifications: &[SmartNotification], color: bool) -> String {
    if !color {
        return format_notifications_text(notifications);
    }
    if notifications.is_empty() {
        return "No notifications.".dimmed().to_string();
    }
    notifications
        .iter()
        .map(|n| {
            format!(
                "{} {} {} {}",
                priority_tag(n.priority),
                n.title.bold(),
                "->".dimmed(),
                n.action_url.cyan()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_ignore_terminal() {
        assert!(use_color(ColorMode::Always));
        assert!(!use_color(ColorMode::Never));
    }

    #[test]
    fn plain_notifications_have_no_escape_codes() {
        assert_eq!(notifications(&[], false), "No notifications.");
        assert!(!notifications(&[], false).contains('\u{1b}'));
    }
}
