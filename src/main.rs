use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use reqwest::Client;
use scraper::Html;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use yfscrape::{
    fetch,
    output::{emit, OutputConfig, Sink},
    process::{self, convert, reshape, DEFAULT_MISSING_TOLERANCE},
    report::ReportType,
};

/// General purpose Yahoo! Finance scraper.
#[derive(Parser, Debug)]
#[command(name = "yfscrape", version, about = "General purpose Yahoo! Finance scraper")]
#[command(group(
    ArgGroup::new("report")
        .required(true)
        .args(["income_statement", "balance_sheet", "cash_flow", "summary"])
))]
#[command(group(ArgGroup::new("output").args(["excel", "json"])))]
struct Cli {
    /// Ticker symbol(s)
    #[arg(value_name = "symbol", required = true)]
    symbols: Vec<String>,

    /// Transpose rows and columns
    #[arg(short, long)]
    transpose: bool,

    /// Print record N only
    #[arg(short, long, value_name = "N")]
    record: Option<usize>,

    /// Write an Excel workbook instead of STDOUT
    #[arg(short = 'x', long)]
    excel: bool,

    /// Print JSON to STDOUT
    #[arg(short, long)]
    json: bool,

    /// Parse the income statement
    #[arg(short, long)]
    income_statement: bool,

    /// Parse the balance sheet
    #[arg(short, long)]
    balance_sheet: bool,

    /// Parse the cash flow statement
    #[arg(short, long)]
    cash_flow: bool,

    /// Parse the summary page
    #[arg(short, long)]
    summary: bool,

    /// Drop rows with at least this many missing cells
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MISSING_TOLERANCE)]
    missing_tolerance: usize,
}

impl Cli {
    fn report(&self) -> ReportType {
        if self.income_statement {
            ReportType::IncomeStatement
        } else if self.balance_sheet {
            ReportType::BalanceSheet
        } else if self.cash_flow {
            ReportType::CashFlow
        } else {
            ReportType::Summary
        }
    }

    fn sink(&self) -> Sink {
        if self.excel {
            Sink::Excel
        } else if self.json {
            Sink::Json
        } else {
            Sink::Text
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let report = cli.report();
    let cfg = OutputConfig {
        record: cli.record,
        transpose: cli.transpose,
        sink: cli.sink(),
    };
    let client = fetch::build_client()?;

    // Strictly sequential: a failed symbol is logged and skipped, the rest
    // of the batch continues.
    for symbol in cli.symbols.iter().map(|s| s.to_uppercase()) {
        if let Err(e) = scrape_symbol(&client, &symbol, report, cli.missing_tolerance, &cfg).await {
            error!("{symbol} ({report}): {e:#}");
        }
    }
    Ok(())
}

async fn scrape_symbol(
    client: &Client,
    symbol: &str,
    report: ReportType,
    tolerance: usize,
    cfg: &OutputConfig,
) -> Result<()> {
    let url = report.page_url(symbol);
    info!(%symbol, %report, "fetching {url}");
    let page = fetch::fetch_page(client, &url).await?;
    let doc = Html::parse_document(&page.body);

    let table = if report.is_summary() {
        let summary = process::extract_summary(&doc)?;
        reshape::reshape_summary(summary, &page.timestamp)
    } else {
        let raw = process::extract_statement_rows(&doc, tolerance)?;
        let mut table = reshape::reshape_statement(raw);
        if cfg.sink.needs_numeric() {
            convert::coerce_numeric(&mut table)?;
        }
        table
    };

    if cfg.sink == Sink::Text {
        if let Some(title) = process::page_title(&doc) {
            println!("{title}");
        }
    }

    emit(table, report, symbol, &page.timestamp, cfg)
        .with_context(|| format!("output failed for {symbol}"))?;
    Ok(())
}
