use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Local, Months, NaiveDate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{
    ChartDataset, IndexKey, InterestType, ProjectionConfig, ProjectionResult, ReturnMode,
    SummaryLine, TaxJurisdiction, chart_dataset, default_date_range, index_returns, project,
    summary_lines,
};

const MAX_RANGE_MONTHS: u32 = 100 * 12;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliIndex {
    Sp500,
    Stoxx600,
    Nikkei225,
    MsciWorld,
    Nasdaq,
    Russell2000,
    Custom,
}

impl From<CliIndex> for IndexKey {
    fn from(value: CliIndex) -> Self {
        match value {
            CliIndex::Sp500 => IndexKey::Sp500,
            CliIndex::Stoxx600 => IndexKey::Stoxx600,
            CliIndex::Nikkei225 => IndexKey::Nikkei225,
            CliIndex::MsciWorld => IndexKey::MsciWorld,
            CliIndex::Nasdaq => IndexKey::Nasdaq,
            CliIndex::Russell2000 => IndexKey::Russell2000,
            CliIndex::Custom => IndexKey::Custom,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliMode {
    Past,
    Future,
}

impl From<CliMode> for ReturnMode {
    fn from(value: CliMode) -> Self {
        match value {
            CliMode::Past => ReturnMode::Past,
            CliMode::Future => ReturnMode::Future,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliInterest {
    Simple,
    Compound,
}

impl From<CliInterest> for InterestType {
    fn from(value: CliInterest) -> Self {
        match value {
            CliInterest::Simple => InterestType::Simple,
            CliInterest::Compound => InterestType::Compound,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTax {
    None,
    Us,
    Germany,
}

impl From<CliTax> for TaxJurisdiction {
    fn from(value: CliTax) -> Self {
        match value {
            CliTax::None => TaxJurisdiction::None,
            CliTax::Us => TaxJurisdiction::Us,
            CliTax::Germany => TaxJurisdiction::Germany,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
enum ApiIndex {
    #[serde(rename = "SP500", alias = "sp500")]
    Sp500,
    #[serde(rename = "STOXX600", alias = "stoxx600")]
    Stoxx600,
    #[serde(rename = "NIKKEI225", alias = "nikkei225")]
    Nikkei225,
    #[serde(rename = "MSCIWORLD", alias = "msciWorld", alias = "msci-world")]
    MsciWorld,
    #[serde(rename = "NASDAQ", alias = "nasdaq")]
    Nasdaq,
    #[serde(rename = "RUSSELL2000", alias = "russell2000")]
    Russell2000,
    #[serde(rename = "CUSTOM", alias = "custom")]
    Custom,
}

impl From<ApiIndex> for CliIndex {
    fn from(value: ApiIndex) -> Self {
        match value {
            ApiIndex::Sp500 => CliIndex::Sp500,
            ApiIndex::Stoxx600 => CliIndex::Stoxx600,
            ApiIndex::Nikkei225 => CliIndex::Nikkei225,
            ApiIndex::MsciWorld => CliIndex::MsciWorld,
            ApiIndex::Nasdaq => CliIndex::Nasdaq,
            ApiIndex::Russell2000 => CliIndex::Russell2000,
            ApiIndex::Custom => CliIndex::Custom,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiMode {
    Past,
    Future,
}

impl From<ApiMode> for CliMode {
    fn from(value: ApiMode) -> Self {
        match value {
            ApiMode::Past => CliMode::Past,
            ApiMode::Future => CliMode::Future,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiInterest {
    Simple,
    Compound,
}

impl From<ApiInterest> for CliInterest {
    fn from(value: ApiInterest) -> Self {
        match value {
            ApiInterest::Simple => CliInterest::Simple,
            ApiInterest::Compound => CliInterest::Compound,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiTax {
    None,
    Us,
    Germany,
}

impl From<ApiTax> for CliTax {
    fn from(value: ApiTax) -> Self {
        match value {
            ApiTax::None => CliTax::None,
            ApiTax::Us => CliTax::Us,
            ApiTax::Germany => CliTax::Germany,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    monthly_investment: Option<f64>,
    index: Option<ApiIndex>,
    mode: Option<ApiMode>,
    #[serde(alias = "interest")]
    interest_type: Option<ApiInterest>,
    #[serde(alias = "customRatePercent")]
    custom_rate: Option<f64>,
    #[serde(alias = "inflationRatePercent")]
    inflation_rate: Option<f64>,
    #[serde(alias = "taxOption")]
    tax: Option<ApiTax>,
    goal_amount: Option<f64>,
}

#[derive(Parser, Debug)]
#[command(
    name = "projector",
    about = "Projects a recurring monthly investment under return, inflation and tax assumptions"
)]
struct Cli {
    #[arg(long, help = "First contribution date (YYYY-MM-DD); defaults to the 1st of this month")]
    start_date: Option<NaiveDate>,
    #[arg(
        long,
        help = "Last date in range (YYYY-MM-DD); defaults to the end of the 12-month window"
    )]
    end_date: Option<NaiveDate>,
    #[arg(long, default_value_t = 500.0)]
    monthly_investment: f64,
    #[arg(long, value_enum, default_value_t = CliIndex::Sp500)]
    index: CliIndex,
    #[arg(long, value_enum, default_value_t = CliMode::Future)]
    mode: CliMode,
    #[arg(long, value_enum, default_value_t = CliInterest::Compound)]
    interest: CliInterest,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Annual return in percent, used with --index custom"
    )]
    custom_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual inflation in percent")]
    inflation_rate: f64,
    #[arg(long, value_enum, default_value_t = CliTax::None)]
    tax: CliTax,
    #[arg(long, default_value_t = 0.0, help = "Target portfolio value; 0 disables")]
    goal: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    summary: Vec<SummaryLine>,
    result: ProjectionResult,
    chart: ChartDataset,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexEntry {
    index: &'static str,
    past: f64,
    future: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_config(cli: Cli, today: NaiveDate) -> Result<ProjectionConfig, String> {
    let (default_start, default_end) = default_date_range(today)
        .ok_or_else(|| format!("cannot derive a default date range from {today}"))?;
    let start_date = cli.start_date.unwrap_or(default_start);
    let end_date = cli.end_date.unwrap_or(default_end);

    if end_date < start_date {
        return Err("--end-date must be on or after --start-date".to_string());
    }

    if start_date
        .checked_add_months(Months::new(MAX_RANGE_MONTHS))
        .is_some_and(|limit| end_date > limit)
    {
        return Err("--end-date must be within 100 years of --start-date".to_string());
    }

    if !cli.monthly_investment.is_finite() || cli.monthly_investment < 0.0 {
        return Err("--monthly-investment must be >= 0".to_string());
    }

    if cli.index == CliIndex::Custom {
        if !cli.custom_rate.is_finite() {
            return Err("--custom-rate must be a number when --index custom".to_string());
        }
        if cli.custom_rate <= -100.0 {
            return Err("--custom-rate must be > -100".to_string());
        }
    }

    if !cli.inflation_rate.is_finite() || cli.inflation_rate < 0.0 {
        return Err("--inflation-rate must be >= 0".to_string());
    }

    if !cli.goal.is_finite() || cli.goal < 0.0 {
        return Err("--goal must be >= 0".to_string());
    }

    Ok(ProjectionConfig {
        start_date,
        end_date,
        monthly_investment: cli.monthly_investment,
        index: cli.index.into(),
        mode: cli.mode.into(),
        interest_type: cli.interest.into(),
        custom_annual_rate_percent: cli.custom_rate,
        inflation_rate_percent: cli.inflation_rate,
        tax_jurisdiction: cli.tax.into(),
        goal_amount: cli.goal,
    })
}

fn render_report(cli: Cli, today: NaiveDate) -> Result<String, String> {
    let config = build_config(cli, today)?;
    let result = project(&config).map_err(|e| e.to_string())?;

    let mut out = String::new();
    for line in summary_lines(&result) {
        out.push_str(&format!("{}: {}\n", line.label, line.value));
    }
    Ok(out)
}

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    let report = render_report(cli, Local::now().date_naive())?;
    print!("{report}");
    Ok(())
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/indexes", get(indexes_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "projection HTTP API listening");
    info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn indexes_handler() -> Response {
    let entries: Vec<IndexEntry> = IndexKey::ALL
        .into_iter()
        .filter(|key| *key != IndexKey::Custom)
        .map(|key| {
            let returns = index_returns(key, 0.0);
            IndexEntry {
                index: key.code(),
                past: returns.past,
                future: returns.future,
            }
        })
        .collect();
    json_response(StatusCode::OK, entries)
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload, Local::now().date_naive()).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload, Local::now().date_naive()).await
}

async fn project_handler_impl(payload: ProjectPayload, today: NaiveDate) -> Response {
    let config = match config_from_payload(payload, today) {
        Ok(config) => config,
        Err(msg) => {
            warn!(error = %msg, "rejected projection request");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match project(&config) {
        Ok(result) => json_response(StatusCode::OK, build_project_response(result)),
        Err(e) => {
            warn!(error = %e, "projection failed validation");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

fn build_project_response(result: ProjectionResult) -> ProjectResponse {
    ProjectResponse {
        summary: summary_lines(&result),
        chart: chart_dataset(&result),
        result,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn config_from_json(json: &str, today: NaiveDate) -> Result<ProjectionConfig, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    config_from_payload(payload, today)
}

fn config_from_payload(
    payload: ProjectPayload,
    today: NaiveDate,
) -> Result<ProjectionConfig, String> {
    let mut cli = default_cli_for_api();

    if payload.start_date.is_some() {
        cli.start_date = payload.start_date;
    }
    if payload.end_date.is_some() {
        cli.end_date = payload.end_date;
    }
    if let Some(v) = payload.monthly_investment {
        cli.monthly_investment = v;
    }
    if let Some(v) = payload.index {
        cli.index = v.into();
    }
    if let Some(v) = payload.mode {
        cli.mode = v.into();
    }
    if let Some(v) = payload.interest_type {
        cli.interest = v.into();
    }
    if let Some(v) = payload.custom_rate {
        cli.custom_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.tax {
        cli.tax = v.into();
    }
    if let Some(v) = payload.goal_amount {
        cli.goal = v;
    }

    build_config(cli, today)
}

fn default_cli_for_api() -> Cli {
    Cli {
        start_date: None,
        end_date: None,
        monthly_investment: 500.0,
        index: CliIndex::Sp500,
        mode: CliMode::Future,
        interest: CliInterest::Compound,
        custom_rate: 0.0,
        inflation_rate: 0.0,
        tax: CliTax::None,
        goal: 0.0,
    }
}
