//! CLI entry point for the lalin reporting tool.
//!
//! Provides subcommands for the daily dashboard summary, the paginated
//! traffic report, CSV export, and gerbang master-data maintenance, all
//! driven against the backend REST API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lalin_reporter::export::export_records;
use lalin_reporter::format::{format_golongan, format_number, format_percentage, format_shift};
use lalin_reporter::infra::api::ApiClient;
use lalin_reporter::pagination::{PageToken, PagedLalin};
use lalin_reporter::report;
use lalin_reporter::services::gerbang::{GerbangApi, GerbangForm, GerbangQuery};
use lalin_reporter::services::lalin::{
    DASHBOARD_FETCH_LIMIT, LalinApi, LalinQuery, dashboard_summary_for_date,
};
use lalin_reporter::validate::validate_gerbang_form;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "lalin_reporter")]
#[command(about = "Toll-road traffic reporting against the lalin backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard summary for one day: traffic grouped by
    /// payment method, gate, shift, and road segment
    Dashboard {
        /// Traffic date (yyyy-mm-dd)
        #[arg(value_name = "DATE")]
        tanggal: NaiveDate,
    },
    /// Show one page of the traffic report
    Report {
        /// Traffic date (yyyy-mm-dd)
        #[arg(value_name = "DATE")]
        tanggal: NaiveDate,

        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Rows per page
        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        /// Free-text filter passed to the backend
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Export a day's records to a CSV file
    Export {
        /// Traffic date (yyyy-mm-dd)
        #[arg(value_name = "DATE")]
        tanggal: NaiveDate,

        /// Free-text filter passed to the backend
        #[arg(short, long)]
        search: Option<String>,

        /// Directory the CSV artifact is written to
        #[arg(short, long, default_value = "exports")]
        output_dir: String,
    },
    /// Maintain gerbang master records
    Gerbang {
        #[command(subcommand)]
        action: GerbangCommands,
    },
}

#[derive(Subcommand)]
enum GerbangCommands {
    /// List gates, paginated and optionally filtered
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short, long, default_value_t = 10)]
        limit: u32,

        #[arg(short, long)]
        search: Option<String>,
    },
    /// Add a gate
    Add {
        #[arg(long)]
        nama_gerbang: String,

        #[arg(long)]
        nama_cabang: String,

        #[arg(long)]
        id_cabang: u32,
    },
    /// Update a gate
    Update {
        #[arg(long)]
        id: u32,

        #[arg(long)]
        nama_gerbang: String,

        #[arg(long)]
        nama_cabang: String,

        #[arg(long)]
        id_cabang: u32,
    },
    /// Delete a gate
    Delete {
        #[arg(long)]
        id: u32,

        #[arg(long)]
        id_cabang: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/lalin_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("lalin_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::from_env()?;

    match cli.command {
        Commands::Dashboard { tanggal } => {
            show_dashboard(&client, tanggal).await?;
        }
        Commands::Report {
            tanggal,
            page,
            limit,
            search,
        } => {
            show_report(client, tanggal, page, limit, search).await?;
        }
        Commands::Export {
            tanggal,
            search,
            output_dir,
        } => {
            let mut query = LalinQuery::for_date(tanggal)
                .with_page(1)
                .with_limit(DASHBOARD_FETCH_LIMIT);
            if let Some(search) = search {
                query = query.with_search(search);
            }

            let page = client.fetch_lalins(&query).await?;
            let prefix = format!("lalin_data_{tanggal}");
            let path = export_records(Path::new(&output_dir), &prefix, &page.rows)?;

            info!(path = %path.display(), rows = page.rows.len(), "Export complete");
        }
        Commands::Gerbang { action } => {
            run_gerbang(&client, action).await?;
        }
    }

    Ok(())
}

/// Fetches all records for the day and logs the four chart series.
async fn show_dashboard(client: &ApiClient, tanggal: NaiveDate) -> Result<()> {
    let summary = dashboard_summary_for_date(client, tanggal).await?;

    info!(date = %tanggal, records = summary.total_records, "Dashboard summary");

    let grand_total: u64 = summary.gerbangs.iter().map(|e| e.value).sum();

    for entry in &summary.payment_methods {
        info!(
            method = %entry.label,
            total = %format_number(entry.value),
            "Payment method"
        );
    }
    for entry in &summary.gerbangs {
        info!(
            gerbang = %entry.label,
            total = %format_number(entry.value),
            share = %format_percentage(entry.value, grand_total),
            "Gate traffic"
        );
    }
    for entry in &summary.shifts {
        info!(shift = %entry.label, total = %format_number(entry.value), "Shift traffic");
    }
    for entry in &summary.ruas {
        info!(ruas = %entry.label, total = %format_number(entry.value), "Segment traffic");
    }

    Ok(())
}

/// Drives the server-paginated fetcher the way the report table does:
/// land on page 1 with the chosen page size, then jump to the requested
/// page once the server has reported how many pages exist.
async fn show_report(
    client: ApiClient,
    tanggal: NaiveDate,
    page: u32,
    limit: u32,
    search: Option<String>,
) -> Result<()> {
    let mut query = LalinQuery::for_date(tanggal);
    if let Some(search) = search {
        query = query.with_search(search);
    }

    let mut paged = PagedLalin::new(client);
    let mut rows = paged.change_page_size(limit, &query).await?;
    if page > 1 {
        rows = paged.go_to_page(page, &query).await?;
    }

    let view = paged.view();
    info!(
        date = %tanggal,
        page = view.current_page,
        total_pages = view.total_pages,
        showing = %format!("{}-{} of {}", view.start_index, view.end_index, view.total_count),
        "Traffic report"
    );

    for record in &rows {
        info!(
            id = record.id,
            gerbang = record.id_gerbang,
            shift = %format_shift(record.shift),
            golongan = %format_golongan(record.golongan),
            total = %format_number(record.traffic_total()),
            "Row"
        );
    }

    let totals = report::payment_totals(&rows);
    info!(
        tunai = %format_number(totals.total_tunai),
        e_toll = %format_number(totals.total_e_toll),
        flo = %format_number(totals.total_flo),
        keseluruhan = %format_number(totals.total_keseluruhan),
        "Page totals"
    );

    info!(pager = %render_pager(&paged.page_numbers(), view.current_page), "Pages");

    Ok(())
}

async fn run_gerbang(client: &ApiClient, action: GerbangCommands) -> Result<()> {
    match action {
        GerbangCommands::List {
            page,
            limit,
            search,
        } => {
            let query = GerbangQuery {
                page: Some(page),
                limit: Some(limit),
                search,
            };
            let listing = client.list_gerbangs(&query).await?;

            for gerbang in &listing.rows {
                info!(
                    id = gerbang.id,
                    id_cabang = gerbang.id_cabang,
                    name = %gerbang.display_name(),
                    "Gerbang"
                );
            }
            info!(
                page = listing.current_page,
                total_pages = listing.total_pages,
                count = listing.count,
                "Gerbang list"
            );
        }
        GerbangCommands::Add {
            nama_gerbang,
            nama_cabang,
            id_cabang,
        } => {
            let form = GerbangForm {
                nama_gerbang,
                nama_cabang,
                id_cabang,
            };
            check_form(&form)?;

            let id = client.create_gerbang(&form).await?;
            info!(id, "Gerbang created");
        }
        GerbangCommands::Update {
            id,
            nama_gerbang,
            nama_cabang,
            id_cabang,
        } => {
            let form = GerbangForm {
                nama_gerbang,
                nama_cabang,
                id_cabang,
            };
            check_form(&form)?;

            client.update_gerbang(id, &form).await?;
            info!(id, "Gerbang updated");
        }
        GerbangCommands::Delete { id, id_cabang } => {
            client.delete_gerbang(id, id_cabang).await?;
            info!(id, "Gerbang deleted");
        }
    }

    Ok(())
}

fn check_form(form: &GerbangForm) -> Result<()> {
    if let Err(errors) = validate_gerbang_form(form) {
        for (field, message) in &errors {
            error!(field, message = %message, "Invalid gerbang form field");
        }
        anyhow::bail!("Gerbang form validation failed");
    }
    Ok(())
}

/// `1 ... 8 [9] 10 ... 20` — the current page bracketed, ellipses
/// standing in for the collapsed ranges.
fn render_pager(tokens: &[PageToken], current: u32) -> String {
    tokens
        .iter()
        .map(|token| match token {
            PageToken::Page(n) if *n == current => format!("[{n}]"),
            PageToken::Page(n) => n.to_string(),
            PageToken::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
