use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// `{terms, request}` in, array of schedule rows out.
#[napi]
pub fn generate_schedule(input_json: String) -> NapiResult<String> {
    let input: coop_lending_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        coop_lending_core::amortization::generate_schedule(&input.terms, &input.request)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let input: coop_lending_core::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = coop_lending_core::amortization::amortize(&input.terms, &input.request)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quote_payments(input_json: String) -> NapiResult<String> {
    let terms: coop_lending_core::amortization::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        coop_lending_core::amortization::quote_payments(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

/// `{loan, amortization, existing_schedule?}` in, array of schedule rows out.
#[napi]
pub fn schedule_loan(input_json: String) -> NapiResult<String> {
    let input: coop_lending_core::loans::LoanScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = coop_lending_core::loans::schedule_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
