use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use coop_lending_core::amortization::{
    self, AmortizationInput, AmortizationRequest, LoanTerms,
};

use crate::input;
use crate::settings::Settings;

/// Loan term flags shared by the amortization commands.
#[derive(Args)]
pub struct TermsArgs {
    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6 = 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months, grace periods included
    #[arg(long)]
    pub term: Option<u32>,

    /// Interest-only grace months at the start of the term
    #[arg(long, default_value_t = 0)]
    pub grace: u32,

    /// Anchor date (YYYY-MM-DD); period n falls due n months later
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

impl TermsArgs {
    fn into_terms(self, settings: &Settings) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        Ok(LoanTerms {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate_pct: self
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: self.term.ok_or("--term is required (or provide --input)")?,
            grace_months: self.grace,
            start_date: self
                .start_date
                .ok_or("--start-date is required (or provide --input)")?,
            currency: settings.currency.clone(),
        })
    }
}

/// Arguments for schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file `{terms, request}` (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: TermsArgs,

    /// Flat installment per amortizing period
    #[arg(long)]
    pub payment: Option<Decimal>,
}

/// Arguments for payment quotes
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to JSON file holding loan terms (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub terms: TermsArgs,
}

pub fn run_schedule(
    args: ScheduleArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let piped: Option<Value> = if let Some(ref path) = args.input {
        Some(input::file::read_json(path)?)
    } else {
        input::stdin::read_stdin()?
    };

    let am_input: AmortizationInput = match piped {
        Some(mut data) => {
            if let Some(terms) = data.get_mut("terms") {
                settings.apply_default_currency(terms);
            }
            serde_json::from_value(data)?
        }
        None => AmortizationInput {
            request: AmortizationRequest {
                periodic_payment: args
                    .payment
                    .ok_or("--payment is required (or provide --input)")?,
            },
            terms: args.terms.into_terms(settings)?,
        },
    };

    let result = amortization::amortize(&am_input.terms, &am_input.request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_quote(args: QuoteArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let piped: Option<Value> = if let Some(ref path) = args.input {
        Some(input::file::read_json(path)?)
    } else {
        input::stdin::read_stdin()?
    };

    let terms: LoanTerms = match piped {
        Some(mut data) => {
            settings.apply_default_currency(&mut data);
            serde_json::from_value(data)?
        }
        None => args.terms.into_terms(settings)?,
    };

    let result = amortization::quote_payments(&terms)?;
    Ok(serde_json::to_value(result)?)
}
