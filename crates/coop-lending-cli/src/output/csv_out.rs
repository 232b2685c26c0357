use serde_json::Value;
use std::io::{self, Write};

use super::{cell, schedule_rows};

/// Column order of a schedule row, matching the loan-ledger layout.
pub const SCHEDULE_COLUMNS: [&str; 6] = [
    "seq",
    "due_date",
    "amortization",
    "principal",
    "interest",
    "remaining_balance",
];

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let _ = write_csv(stdout.lock(), value);
}

pub(crate) fn write_csv<W: Write>(out: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    if let Some(rows) = schedule_rows(value) {
        write_rows(&mut wtr, rows)?;
    } else {
        let fields = value
            .as_object()
            .and_then(|m| m.get("result"))
            .and_then(Value::as_object)
            .or_else(|| value.as_object());
        match fields {
            Some(map) => {
                wtr.write_record(["field", "value"])?;
                for (key, val) in map {
                    wtr.write_record([key.as_str(), &cell(val)])?;
                }
            }
            None => wtr.write_record([&cell(value)])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    wtr.write_record(SCHEDULE_COLUMNS)?;
    for row in rows {
        let record: Vec<String> = SCHEDULE_COLUMNS
            .iter()
            .map(|c| row.get(*c).map(cell).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_schedule_rows_in_ledger_order() {
        let value = serde_json::json!([{
            "seq": 1,
            "due_date": "2024-02-15",
            "amortization": "1100.00",
            "principal": "1040.00",
            "interest": "60.00",
            "remaining_balance": "10960.00"
        }]);
        let text = render(&value);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "seq,due_date,amortization,principal,interest,remaining_balance"
        );
        assert_eq!(
            lines.next().unwrap(),
            "1,2024-02-15,1100.00,1040.00,60.00,10960.00"
        );
    }

    #[test]
    fn test_result_fields_as_pairs() {
        let value = serde_json::json!({"result": {"level_payment": "1032.80"}, "warnings": []});
        let text = render(&value);
        assert!(text.starts_with("field,value"));
        assert!(text.contains("level_payment,1032.80"));
    }
}
