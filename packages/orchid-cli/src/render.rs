//! Terminal rendering for the three views.

use colored::Colorize;
use console::Term;
use orchid_core::domains::analysis::models::{CompanyRecord, Outcome, ProgressEvent, Relevance};
use tracing::debug;

use crate::progress::{ProgressModel, ViewState};
use crate::session::ProgressView;

pub fn elapsed_line(secs: u64) -> String {
    if secs >= 60 {
        format!("Elapsed: {}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("Elapsed: {}s", secs)
    }
}

/// One line per label: done, active or pending.
pub fn step_lines(labels: &[&str], model: &ProgressModel) -> Vec<String> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            if model.completed_steps.contains(&i) {
                format!("  {} {}", "✓".green(), label.dimmed())
            } else if i == model.current_step && model.is_running() {
                format!("  {} {}", "▸".yellow(), label.bold())
            } else {
                format!("  {} {}", "○".dimmed(), label.dimmed())
            }
        })
        .collect()
}

pub fn results_header(count: usize) -> String {
    format!("Found {} matches", count)
}

pub fn table_header() -> String {
    format!(
        "     {:<28} {:<20} {:<22} {:<26} {}",
        "Company", "Revenue", "Size", "Industry", "Readiness"
    )
}

/// One table row per company.
pub fn company_rows(companies: &[CompanyRecord]) -> Vec<String> {
    companies
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{:>2}. {} {:<25} {:<20} {:<22} {:<26} {}",
                i + 1,
                c.logo,
                truncate(&c.name, 25),
                format!("{} ({})", c.revenue, c.growth),
                format!("{} employees", c.employees),
                truncate(&format!("{} · {}", c.industry, c.location), 26),
                readiness_badge(&c.readiness),
            )
        })
        .collect()
}

fn readiness_badge(readiness: &str) -> String {
    let score: u32 = readiness.trim_end_matches('%').trim().parse().unwrap_or(0);
    if score >= 90 {
        readiness.green().bold().to_string()
    } else if score >= 80 {
        readiness.yellow().to_string()
    } else {
        readiness.to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Expanded view of a single company: sources, reasoning, tags, CRM history
/// and buyers.
pub fn detail_panel(company: &CompanyRecord) -> String {
    let mut lines = vec![
        format!("{} {}", company.logo, company.name.bold()),
        format!(
            "   {} · {} · {} employees",
            company.location, company.industry, company.employees
        ),
        String::new(),
        format!("   {} ({})", "Sources".bold(), company.sources.count),
    ];

    for source in &company.sources.details {
        lines.push(format!(
            "     [{}] {} {}",
            source.kind,
            source.url,
            format!("({})", source.date).dimmed()
        ));
    }

    lines.push(String::new());
    lines.push(format!("   {}", "Why this company".bold()));
    lines.push(format!("     {}", company.reasoning));

    if !company.tags.is_empty() {
        lines.push(format!("     {}", company.tags.join(" · ").cyan()));
    }

    if !company.interactions.is_empty() {
        lines.push(String::new());
        lines.push(format!("   {}", "CRM history".bold()));
        for interaction in &company.interactions {
            let outcome = match interaction.outcome {
                Outcome::Positive => "Positive".green(),
                Outcome::Neutral => "Neutral".normal(),
                Outcome::Pending => "Pending".yellow(),
            };
            lines.push(format!(
                "     {} {}: {} [{}]",
                interaction.date, interaction.kind, interaction.details, outcome
            ));
        }
    }

    if !company.buyers.is_empty() {
        lines.push(String::new());
        lines.push(format!("   {}", "Buyers".bold()));
        for buyer in &company.buyers {
            let relevance = match buyer.relevance {
                Relevance::High => "High".green(),
                Relevance::Medium => "Medium".yellow(),
                Relevance::Low => "Low".dimmed(),
            };
            let mut line = format!(
                "     {}, {} ({}) relevance {} · {}",
                buyer.name, buyer.title, buyer.role, relevance, buyer.timing
            );
            if let Some(influence) = buyer.influence {
                line.push_str(&format!(" · {}", influence.label()));
            }
            lines.push(line);
            if let Some(url) = buyer.linkedin_url() {
                lines.push(format!("       {}", url.dimmed()));
            }
        }
    }

    lines.join("\n")
}

pub fn progress_notes(events: &[ProgressEvent]) -> Vec<String> {
    events
        .iter()
        .map(|e| format!("  [{}] {}", e.step, e.info))
        .collect()
}

pub fn error_banner(message: &str) -> String {
    format!("{} {}", " Search failed ".on_red().white().bold(), message.red())
}

/// Redraws the in-progress view in place; other views are left to the caller.
pub struct TerminalView {
    term: Term,
    labels: Vec<&'static str>,
    drawn: usize,
}

impl TerminalView {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            term: Term::stdout(),
            labels: labels.to_vec(),
            drawn: 0,
        }
    }

    fn clear(&mut self) {
        if self.drawn > 0 {
            if let Err(e) = self.term.clear_last_lines(self.drawn) {
                debug!(error = %e, lines = self.drawn, "Failed to clear progress view");
            }
            self.drawn = 0;
        }
    }
}

impl ProgressView for TerminalView {
    fn update(&mut self, model: &ProgressModel) {
        self.clear();

        if model.state != ViewState::Running {
            return;
        }

        let mut lines = vec![format!("Analyzing: {}", model.query.bold())];
        lines.extend(step_lines(&self.labels, model));
        lines.push(elapsed_line(model.elapsed_secs).dimmed().to_string());

        for line in &lines {
            if let Err(e) = self.term.write_line(line) {
                debug!(error = %e, "Failed to draw progress view");
            }
        }
        self.drawn = lines.len();
    }
}
