mod error;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::str::FromStr;
use tokio::net::TcpListener;

use crate::core::{
    DownPaymentField, ForwardCalculator, ForwardEdit, ForwardSummary, ReverseCalculator,
    ReverseEdit, ReverseSummary, clamp_non_negative, format_currency, format_percent,
    parse_amount,
};

pub use error::ApiError;
use error::ErrorResponse;

/// A field value as the presentation layer sends it: a JSON number, or
/// whatever text the user typed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub fn value(&self) -> f64 {
        match self {
            RawNumber::Number(v) => clamp_non_negative(*v),
            RawNumber::Text(s) => parse_amount(s),
        }
    }
}

impl FromStr for RawNumber {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RawNumber::Text(s.to_string()))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliDownPaymentField {
    Amount,
    Percent,
}

impl From<CliDownPaymentField> for DownPaymentField {
    fn from(value: CliDownPaymentField) -> Self {
        match value {
            CliDownPaymentField::Amount => DownPaymentField::Amount,
            CliDownPaymentField::Percent => DownPaymentField::Percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiDownPaymentField {
    #[serde(alias = "downPaymentAmount", alias = "down-payment-amount")]
    Amount,
    #[serde(
        alias = "downPaymentPercent",
        alias = "down-payment-percent",
        alias = "percentage"
    )]
    Percent,
}

impl From<ApiDownPaymentField> for CliDownPaymentField {
    fn from(value: ApiDownPaymentField) -> Self {
        match value {
            ApiDownPaymentField::Amount => CliDownPaymentField::Amount,
            ApiDownPaymentField::Percent => CliDownPaymentField::Percent,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Parser, Debug)]
#[command(
    name = "mortgage",
    about = "Mortgage calculator: monthly payment from price, or affordable price from payment"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monthly payment and totals for a given house price
    Forward {
        #[command(flatten)]
        args: ForwardArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Affordable house price for a given monthly payment
    Reverse {
        #[command(flatten)]
        args: ReverseArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Serve the JSON calculation API
    Serve {
        #[arg(default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug, Default)]
struct ForwardArgs {
    #[arg(long, allow_hyphen_values = true, help = "House price, e.g. 500000 or $500,000")]
    house_price: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true, help = "Down payment as a percent of the house price")]
    down_payment_percent: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true, help = "Down payment as a currency amount")]
    down_payment_amount: Option<RawNumber>,
    #[arg(
        long,
        value_enum,
        help = "Which down-payment field drives the other when both are given"
    )]
    down_payment_edited: Option<CliDownPaymentField>,
    #[arg(long, allow_hyphen_values = true, help = "Annual interest rate in percent, e.g. 7")]
    interest_rate: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true)]
    loan_term_years: Option<RawNumber>,
}

#[derive(Args, Debug, Default)]
struct ReverseArgs {
    #[arg(long, allow_hyphen_values = true, help = "Target monthly payment")]
    monthly_payment: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true)]
    down_payment: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true, help = "Extra cash added on top of the down payment")]
    additional_down_payment: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true, help = "Annual interest rate in percent, e.g. 7")]
    interest_rate: Option<RawNumber>,
    #[arg(long, allow_hyphen_values = true)]
    loan_term_years: Option<RawNumber>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ForwardPayload {
    house_price: Option<RawNumber>,
    down_payment_percent: Option<RawNumber>,
    down_payment_amount: Option<RawNumber>,
    down_payment_edited: Option<ApiDownPaymentField>,
    #[serde(alias = "annualRatePercent")]
    interest_rate: Option<RawNumber>,
    #[serde(alias = "termYears")]
    loan_term_years: Option<RawNumber>,
}

impl From<ForwardPayload> for ForwardArgs {
    fn from(payload: ForwardPayload) -> Self {
        ForwardArgs {
            house_price: payload.house_price,
            down_payment_percent: payload.down_payment_percent,
            down_payment_amount: payload.down_payment_amount,
            down_payment_edited: payload.down_payment_edited.map(Into::into),
            interest_rate: payload.interest_rate,
            loan_term_years: payload.loan_term_years,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReversePayload {
    monthly_payment: Option<RawNumber>,
    down_payment: Option<RawNumber>,
    additional_down_payment: Option<RawNumber>,
    #[serde(alias = "annualRatePercent")]
    interest_rate: Option<RawNumber>,
    #[serde(alias = "termYears")]
    loan_term_years: Option<RawNumber>,
}

impl From<ReversePayload> for ReverseArgs {
    fn from(payload: ReversePayload) -> Self {
        ReverseArgs {
            monthly_payment: payload.monthly_payment,
            down_payment: payload.down_payment,
            additional_down_payment: payload.additional_down_payment,
            interest_rate: payload.interest_rate,
            loan_term_years: payload.loan_term_years,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForwardFormatted {
    house_price: String,
    down_payment_amount: String,
    down_payment_percent: String,
    loan_amount: String,
    monthly_payment: String,
    total_paid: String,
    total_interest: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ForwardResponse {
    #[serde(flatten)]
    summary: ForwardSummary,
    formatted: ForwardFormatted,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReverseFormatted {
    monthly_payment: String,
    total_down_payment: String,
    loan_amount: String,
    house_price: String,
    down_payment_percentage: String,
    total_amount_paid: String,
    total_interest_paid: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReverseResponse {
    #[serde(flatten)]
    summary: ReverseSummary,
    formatted: ReverseFormatted,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Orders the edits so the down payment is resolved against the final house
/// price.
fn forward_edits(args: &ForwardArgs) -> Result<Vec<ForwardEdit>, ApiError> {
    let mut edits = Vec::new();

    if let Some(v) = &args.house_price {
        edits.push(ForwardEdit::HousePrice(v.value()));
    }
    if let Some(v) = &args.interest_rate {
        edits.push(ForwardEdit::InterestRate(v.value()));
    }
    if let Some(v) = &args.loan_term_years {
        edits.push(ForwardEdit::LoanTermYears(v.value()));
    }

    let down_payment = match (
        &args.down_payment_percent,
        &args.down_payment_amount,
        args.down_payment_edited,
    ) {
        (None, None, None) => None,
        (Some(_), Some(_), None) => return Err(ApiError::AmbiguousDownPayment),
        (Some(percent), _, None | Some(CliDownPaymentField::Percent)) => {
            Some((DownPaymentField::Percent, percent.value()))
        }
        (_, Some(amount), None | Some(CliDownPaymentField::Amount)) => {
            Some((DownPaymentField::Amount, amount.value()))
        }
        (None, _, Some(CliDownPaymentField::Percent)) => {
            return Err(ApiError::MissingDownPayment {
                edited: "percent",
                field: "downPaymentPercent",
            });
        }
        (_, None, Some(CliDownPaymentField::Amount)) => {
            return Err(ApiError::MissingDownPayment {
                edited: "amount",
                field: "downPaymentAmount",
            });
        }
    };
    if let Some((field, value)) = down_payment {
        edits.push(ForwardEdit::DownPayment { field, value });
    }

    Ok(edits)
}

fn build_forward(args: &ForwardArgs) -> Result<ForwardCalculator, ApiError> {
    let edits = forward_edits(args)?;
    tracing::debug!(?edits, "applying forward edits");

    let mut calc = ForwardCalculator::default();
    for edit in edits {
        calc.apply(edit);
    }
    Ok(calc)
}

fn reverse_edits(args: &ReverseArgs) -> Vec<ReverseEdit> {
    let mut edits = Vec::new();
    if let Some(v) = &args.monthly_payment {
        edits.push(ReverseEdit::MonthlyPayment(v.value()));
    }
    if let Some(v) = &args.down_payment {
        edits.push(ReverseEdit::DownPayment(v.value()));
    }
    if let Some(v) = &args.additional_down_payment {
        edits.push(ReverseEdit::AdditionalDownPayment(v.value()));
    }
    if let Some(v) = &args.interest_rate {
        edits.push(ReverseEdit::InterestRate(v.value()));
    }
    if let Some(v) = &args.loan_term_years {
        edits.push(ReverseEdit::LoanTermYears(v.value()));
    }
    edits
}

fn build_reverse(args: &ReverseArgs) -> ReverseCalculator {
    let edits = reverse_edits(args);
    tracing::debug!(?edits, "applying reverse edits");

    let mut calc = ReverseCalculator::default();
    for edit in edits {
        calc.apply(edit);
    }
    calc
}

fn build_forward_response(summary: ForwardSummary) -> ForwardResponse {
    ForwardResponse {
        formatted: ForwardFormatted {
            house_price: format_currency(summary.house_price),
            down_payment_amount: format_currency(summary.down_payment_amount),
            down_payment_percent: format_percent(summary.down_payment_percent),
            loan_amount: format_currency(summary.loan_amount),
            monthly_payment: format_currency(summary.monthly_payment),
            total_paid: format_currency(summary.total_paid),
            total_interest: format_currency(summary.total_interest),
        },
        summary,
    }
}

fn build_reverse_response(summary: ReverseSummary) -> ReverseResponse {
    ReverseResponse {
        formatted: ReverseFormatted {
            monthly_payment: format_currency(summary.monthly_payment),
            total_down_payment: format_currency(summary.total_down_payment),
            loan_amount: format_currency(summary.loan_amount),
            house_price: format_currency(summary.house_price),
            down_payment_percentage: format_percent(summary.down_payment_percentage),
            total_amount_paid: format_currency(summary.total_amount_paid),
            total_interest_paid: format_currency(summary.total_interest_paid),
        },
        summary,
    }
}

fn render_rows(rows: &[(&str, String)]) -> String {
    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<22}{value:>14}\n"));
    }
    out
}

fn render_forward_text(summary: &ForwardSummary) -> String {
    render_rows(&[
        ("House price", format_currency(summary.house_price)),
        ("Down payment", format_currency(summary.down_payment_amount)),
        ("Down payment %", format_percent(summary.down_payment_percent)),
        ("Loan amount", format_currency(summary.loan_amount)),
        ("Interest rate", format_percent(summary.interest_rate)),
        ("Loan term (years)", summary.loan_term_years.to_string()),
        ("Monthly payment", format_currency(summary.monthly_payment)),
        ("Total paid", format_currency(summary.total_paid)),
        ("Total interest", format_currency(summary.total_interest)),
    ])
}

fn render_reverse_text(summary: &ReverseSummary) -> String {
    render_rows(&[
        ("Monthly payment", format_currency(summary.monthly_payment)),
        ("Total down payment", format_currency(summary.total_down_payment)),
        ("Interest rate", format_percent(summary.interest_rate)),
        ("Loan term (years)", summary.loan_term_years.to_string()),
        ("Loan amount", format_currency(summary.loan_amount)),
        ("House price", format_currency(summary.house_price)),
        ("Down payment %", format_percent(summary.down_payment_percentage)),
        ("Total paid", format_currency(summary.total_amount_paid)),
        ("Total interest", format_currency(summary.total_interest_paid)),
    ])
}

/// Runs one parsed command line. `serve` blocks until the server stops.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    match cli.command {
        Command::Forward { args, format } => {
            let summary = build_forward(&args)?.summary();
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&build_forward_response(summary))?
                ),
                OutputFormat::Text => print!("{}", render_forward_text(&summary)),
            }
            Ok(())
        }
        Command::Reverse { args, format } => {
            let summary = build_reverse(&args).summary();
            match format {
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&build_reverse_response(summary))?
                ),
                OutputFormat::Text => print!("{}", render_reverse_text(&summary)),
            }
            Ok(())
        }
        Command::Serve { port } => run_http_server(port).await,
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route(
            "/api/forward",
            get(forward_get_handler).post(forward_post_handler),
        )
        .route(
            "/api/reverse",
            get(reverse_get_handler).post(reverse_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> Result<(), ApiError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "mortgage API listening");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/forward");

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_handler() -> Response {
    json_response(
        StatusCode::OK,
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
        },
    )
}

async fn forward_get_handler(Query(payload): Query<ForwardPayload>) -> Response {
    forward_handler_impl(payload)
}

async fn forward_post_handler(Json(payload): Json<ForwardPayload>) -> Response {
    forward_handler_impl(payload)
}

fn forward_handler_impl(payload: ForwardPayload) -> Response {
    let args = ForwardArgs::from(payload);
    match build_forward(&args) {
        Ok(calc) => json_response(StatusCode::OK, build_forward_response(calc.summary())),
        Err(err) => err.into_response(),
    }
}

async fn reverse_get_handler(Query(payload): Query<ReversePayload>) -> Response {
    reverse_handler_impl(payload)
}

async fn reverse_post_handler(Json(payload): Json<ReversePayload>) -> Response {
    reverse_handler_impl(payload)
}

fn reverse_handler_impl(payload: ReversePayload) -> Response {
    let args = ReverseArgs::from(payload);
    let summary = build_reverse(&args).summary();
    json_response(StatusCode::OK, build_reverse_response(summary))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
