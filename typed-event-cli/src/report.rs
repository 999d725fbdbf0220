//! Report generation
//!
//! Collects what the login listeners did and renders it as plain text or JSON.

use crate::config::OutputFormat;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Everything recorded while dispatching logins
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginReport {
    pub entries: Vec<ReportEntry>,
    pub rejections: Vec<Rejection>,
}

/// One line written by a listener
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub listener: ListenerKind,
    pub username: String,
    pub user_id: u64,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// A login that a listener refused, stopping the dispatch
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub username: String,
    pub user_id: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListenerKind {
    Welcome,
    Audit,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerKind::Welcome => f.pad("welcome"),
            ListenerKind::Audit => f.pad("audit"),
        }
    }
}

impl LoginReport {
    pub fn record(&mut self, listener: ListenerKind, username: &str, user_id: u64, message: String) {
        self.entries.push(ReportEntry {
            listener,
            username: username.to_string(),
            user_id,
            message,
            at: Utc::now(),
        });
    }

    pub fn reject(&mut self, username: &str, user_id: u64, reason: String) {
        self.rejections.push(Rejection {
            username: username.to_string(),
            user_id,
            reason,
        });
    }

    /// Entries for a single user, in the order the listeners ran
    pub fn entries_for<'a>(&'a self, username: &'a str) -> impl Iterator<Item = &'a ReportEntry> {
        self.entries.iter().filter(move |e| e.username == username)
    }
}

/// Render the report in the requested format
pub fn render(report: &LoginReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_txt(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn render_txt(report: &LoginReport) -> String {
    let mut lines = Vec::with_capacity(report.entries.len() + report.rejections.len() + 2);

    for entry in &report.entries {
        lines.push(format!(
            "[{}] {:<8} {}",
            entry.at.format("%H:%M:%S%.3f"),
            entry.listener,
            entry.message
        ));
    }

    if !report.rejections.is_empty() {
        lines.push(String::new());
        lines.push(format!("Rejected logins: {}", report.rejections.len()));
        for rejection in &report.rejections {
            lines.push(format!(
                "  {} (ID {}): {}",
                rejection.username, rejection.user_id, rejection.reason
            ));
        }
    }

    lines.join("\n")
}
