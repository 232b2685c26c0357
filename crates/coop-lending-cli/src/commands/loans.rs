use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use coop_lending_core::loans::{self, LoanScheduleInput};

use crate::input;
use crate::settings::Settings;

/// Arguments for creating a loan's schedule
#[derive(Args)]
pub struct LoanScheduleArgs {
    /// Path to JSON input file `{loan, amortization, existing_schedule?}`
    #[arg(long)]
    pub input: Option<String>,

    /// Installment amount (overrides `amortization` in the input)
    #[arg(long)]
    pub amortization: Option<Decimal>,
}

pub fn run_loan_schedule(
    args: LoanScheduleArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut data: Value = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for loan schedule".into());
    };

    let ls_input = prepare_input(&mut data, args.amortization, settings)?;
    let schedule = loans::schedule_loan(&ls_input)?;
    Ok(serde_json::to_value(schedule)?)
}

fn prepare_input(
    data: &mut Value,
    amortization: Option<Decimal>,
    settings: &Settings,
) -> Result<LoanScheduleInput, Box<dyn std::error::Error>> {
    if let Some(loan) = data.get_mut("loan") {
        settings.apply_default_currency(loan);
    }
    if let (Some(amount), Value::Object(map)) = (amortization, &mut *data) {
        map.insert("amortization".to_string(), Value::String(amount.to_string()));
    }
    if data.get("amortization").is_none() {
        return Err("Amortization value required (--amortization or input field)".into());
    }
    Ok(serde_json::from_value(data.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coop_lending_core::Currency;
    use rust_decimal_macros::dec;

    fn settings() -> Settings {
        Settings {
            currency: Currency::PHP,
            log_filter: "warn".into(),
        }
    }

    fn loan_json() -> Value {
        serde_json::json!({
            "loan": {
                "id": 11,
                "member_id": 2,
                "loan_type": "emergency",
                "loan_amount": "12000",
                "interest": "6",
                "term": 12,
                "payment_start_date": "2024-01-15",
                "status": "released"
            }
        })
    }

    #[test]
    fn test_flag_supplies_amortization() {
        let mut data = loan_json();
        let input = prepare_input(&mut data, Some(dec!(1100)), &settings()).unwrap();
        assert_eq!(input.amortization, dec!(1100));
        assert_eq!(input.loan.currency, Currency::PHP);
        assert!(input.existing_schedule.is_empty());

        let schedule = loans::schedule_loan(&input).unwrap();
        assert_eq!(schedule.len(), 12);
    }

    #[test]
    fn test_missing_amortization_rejected() {
        let mut data = loan_json();
        let err = prepare_input(&mut data, None, &settings()).unwrap_err();
        assert!(err.to_string().contains("Amortization value required"));
    }
}
