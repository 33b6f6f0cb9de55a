use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use orchid_cli::fixtures::{ANALYSIS_STEPS, LIVE_PHASES};
use orchid_cli::render::{
    company_rows, detail_panel, error_banner, progress_notes, results_header, table_header,
    TerminalView,
};
use orchid_cli::{OrchidApi, RetryPolicy, Session, ViewState, DEFAULT_SERVER_URL, MAX_RETRIES};
use orchid_core::domains::analysis::models::{AnalysisRequest, CompanyRecord};

#[derive(Parser)]
#[command(name = "orchid")]
#[command(about = "Find prospect companies from a free-text query")]
#[command(version)]
struct Cli {
    /// Run this search once and exit
    query: Option<String>,

    /// Orchid API base URL
    #[arg(long, env = "ORCHID_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Extra attempts for a failed analysis request
    #[arg(long, default_value_t = MAX_RETRIES)]
    max_retries: u32,

    /// Simulate the analysis with sample companies; no network calls
    #[arg(long)]
    demo: bool,

    /// Fetch and show the search plan before running the analysis
    #[arg(long)]
    plan_first: bool,
}

struct App {
    api: OrchidApi,
    policy: RetryPolicy,
    demo: bool,
    plan_first: bool,
    session: Session<TerminalView>,
}

enum AfterResults {
    NewSearch,
    Quit,
}

impl App {
    /// Returns `false` when the query was rejected before anything ran.
    async fn search(&mut self, query: &str) -> bool {
        println!();

        if self.demo {
            return self.session.run_demo(query).await;
        }

        let mut request = AnalysisRequest::new(query);
        if self.plan_first && !query.trim().is_empty() {
            match self.api.plan(query).await {
                Ok(steps) => {
                    println!("{}", "Search plan".bold());
                    for step in &steps {
                        println!("  {}. {}", step.step, step.step_title);
                    }
                    println!();
                    request = request.with_steps(steps);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Plan request failed");
                    println!("{}", format!("Plan unavailable ({}), continuing", e).dimmed());
                }
            }
        }

        self.session.run_live(&self.api, request, &self.policy).await
    }

    fn print_outcome(&self) {
        let model = self.session.model();

        match &model.state {
            ViewState::Done => {
                let Some(results) = &model.results else {
                    return;
                };

                if !results.partial_results.is_empty() {
                    for note in progress_notes(&results.partial_results) {
                        println!("{}", note.dimmed());
                    }
                    println!();
                }

                println!("{}", "Companies Found".bold());
                println!("{}", results_header(results.companies.len()).dimmed());
                println!();
                println!("{}", table_header().dimmed());
                for row in company_rows(&results.companies) {
                    println!("{}", row);
                }
                println!(
                    "{}",
                    format!("Completed in {}s", model.elapsed_secs).dimmed()
                );
            }
            ViewState::Idle {
                error: Some(message),
                ..
            } => {
                println!("{}", error_banner(message));
            }
            ViewState::Idle { error: None, .. } => {
                println!("{}", "Enter a search query to begin.".yellow());
            }
            ViewState::Running => {}
        }
    }
}

fn browse_results(theme: &ColorfulTheme, companies: &[CompanyRecord]) -> Result<AfterResults> {
    let mut items = company_rows(companies);
    items.push("New search".to_string());
    items.push("Quit".to_string());

    loop {
        let selection = Select::with_theme(theme)
            .with_prompt("Show details for")
            .items(&items)
            .default(0)
            .interact()?;

        match selection {
            i if i < companies.len() => {
                println!();
                println!("{}", detail_panel(&companies[i]));
                println!();
            }
            i if i == companies.len() => return Ok(AfterResults::NewSearch),
            _ => return Ok(AfterResults::Quit),
        }
    }
}

async fn interactive(app: &mut App) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut next_query: Option<String> = None;

    loop {
        let query = match next_query.take() {
            Some(query) => query,
            None => Input::with_theme(&theme)
                .with_prompt("Search companies")
                .allow_empty(true)
                .interact_text()?,
        };

        if !app.search(&query).await {
            println!("{}", "Enter a search query to begin.".yellow());
            continue;
        }
        app.print_outcome();

        let model = app.session.model();
        match &model.state {
            ViewState::Done => {
                let companies = model
                    .results
                    .as_ref()
                    .map(|r| r.companies.clone())
                    .unwrap_or_default();
                if let AfterResults::Quit = browse_results(&theme, &companies)? {
                    break;
                }
            }
            ViewState::Idle {
                error: Some(_),
                retry_query,
            } => {
                let retry_query = retry_query.clone();
                let retry = Confirm::with_theme(&theme)
                    .with_prompt("Retry this search?")
                    .default(true)
                    .interact()?;
                if retry {
                    next_query = retry_query;
                }
            }
            _ => {}
        }
    }

    println!("{}", "👋 Goodbye!".bright_blue());
    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!("{}", "╔════════════════════════════════════════╗".bright_magenta());
    println!("{}", "║   Orchid · sales intelligence          ║".bright_magenta());
    println!("{}", "╚════════════════════════════════════════╝".bright_magenta());
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let labels: &[&'static str] = if cli.demo { &ANALYSIS_STEPS[..] } else { &LIVE_PHASES[..] };
    let mut app = App {
        api: OrchidApi::new(&cli.server),
        policy: RetryPolicy::new(cli.max_retries),
        demo: cli.demo,
        plan_first: cli.plan_first,
        session: Session::new(TerminalView::new(labels)),
    };

    if !app.demo {
        match app.api.health().await {
            Ok(true) => tracing::debug!(server = %app.api.base_url(), "Server healthy"),
            _ => println!(
                "{}",
                format!("Orchid server at {} is not responding", app.api.base_url()).yellow()
            ),
        }
    }

    if let Some(query) = cli.query {
        if !app.search(&query).await {
            println!("{}", "Enter a search query to begin.".yellow());
            return Ok(ExitCode::FAILURE);
        }
        app.print_outcome();

        return Ok(match app.session.model().state {
            ViewState::Done => ExitCode::SUCCESS,
            _ => ExitCode::FAILURE,
        });
    }

    print_banner(&Term::stdout())?;
    interactive(&mut app).await?;
    Ok(ExitCode::SUCCESS)
}
