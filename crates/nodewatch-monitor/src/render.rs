//! Notification text. Minimal Telegram-flavoured Markdown, one message per alert.

use nodewatch_core::models::{Alert, AlertKind};

/// Render a duration as its largest whole unit: `Nd`, else `Nh`, else `Nm`.
pub fn format_duration(d: chrono::Duration) -> String {
    let days = d.num_days();
    if days > 0 {
        return format!("{days}d");
    }
    let hours = d.num_hours();
    if hours > 0 {
        return format!("{hours}h");
    }
    format!("{}m", d.num_minutes().max(0))
}

/// Message body for `alert`.
pub fn render_alert(alert: &Alert) -> String {
    let elapsed = alert
        .unhealthy_for
        .map(format_duration)
        .unwrap_or_else(|| "unknown".to_string());
    match alert.kind {
        AlertKind::Degraded => format!(
            "*ALERT: Node Down*\nNode: `{}`\nDowntime: {}\nStatus: Not Ready",
            alert.node, elapsed
        ),
        AlertKind::Missing => format!(
            "*CRITICAL: Node Missing*\nNode: `{}`\nMissing for: {}",
            alert.node, elapsed
        ),
        AlertKind::Recovered => format!(
            "*RECOVERY: Node Back Online*\nNode: `{}`\nStatus: Ready",
            alert.node
        ),
    }
}

/// One-off message sent when the poll loop starts.
pub fn render_startup(check_interval: chrono::Duration, alert_threshold: chrono::Duration) -> String {
    format!(
        "Node health monitor started: polling every {}, alerting after {}",
        format_duration(check_interval),
        format_duration(alert_threshold)
    )
}
