//! Per-loan schedule registry.
//!
//! A loan gets at most one schedule. Once stored it is never recomputed: a
//! second request for the same loan fails with `ScheduleExists` whatever the
//! installment asked for.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::info;

use super::record::{CreateScheduleRequest, Loan, LoanScheduleInput, LoanStatus};
use crate::amortization::{generate_schedule, AmortizationRequest, ScheduleEntry};
use crate::error::LendingError;
use crate::LendingResult;

#[derive(Debug, Default)]
pub struct ScheduleBook {
    schedules: HashMap<u64, Vec<ScheduleEntry>>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schedule that was generated and persisted earlier.
    pub fn load(&mut self, loan_id: u64, schedule: Vec<ScheduleEntry>) -> LendingResult<()> {
        match self.schedules.entry(loan_id) {
            Entry::Occupied(_) => Err(LendingError::ScheduleExists { loan_id }),
            Entry::Vacant(slot) => {
                slot.insert(schedule);
                Ok(())
            }
        }
    }

    /// Generate and store the schedule for a released loan.
    pub fn create_schedule(
        &mut self,
        loan: &Loan,
        request: &CreateScheduleRequest,
    ) -> LendingResult<&[ScheduleEntry]> {
        if loan.status != LoanStatus::Released {
            return Err(LendingError::LoanNotReleased {
                loan_id: loan.id,
                status: loan.status.to_string(),
            });
        }

        match self.schedules.entry(loan.id) {
            Entry::Occupied(_) => Err(LendingError::ScheduleExists { loan_id: loan.id }),
            Entry::Vacant(slot) => {
                let schedule = generate_schedule(&loan.terms(), &AmortizationRequest::from(request))?;
                info!(
                    loan_id = loan.id,
                    periods = schedule.len(),
                    "stored amortization schedule"
                );
                Ok(slot.insert(schedule).as_slice())
            }
        }
    }

    pub fn schedule(&self, loan_id: u64) -> Option<&[ScheduleEntry]> {
        self.schedules.get(&loan_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

/// One-shot "create schedule" for a single loan, honouring any schedule already on file.
pub fn schedule_loan(input: &LoanScheduleInput) -> LendingResult<Vec<ScheduleEntry>> {
    let mut book = ScheduleBook::new();
    if !input.existing_schedule.is_empty() {
        book.load(input.loan.id, input.existing_schedule.clone())?;
    }
    let request = CreateScheduleRequest {
        amortization: input.amortization,
    };
    Ok(book.create_schedule(&input.loan, &request)?.to_vec())
}
