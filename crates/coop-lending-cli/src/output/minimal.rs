use serde_json::Value;

use super::cell;

/// Priority list of key output fields
const PRIORITY_KEYS: [&str; 5] = [
    "level_payment",
    "total_interest",
    "final_installment",
    "minimum_payment",
    "periods",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

pub(crate) fn minimal_line(value: &Value) -> String {
    if let Value::Array(rows) = value {
        return format!("{} periods", rows.len());
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in &PRIORITY_KEYS {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    return cell(val);
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, cell(val));
        }
    }

    cell(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_prefers_level_payment() {
        let v = serde_json::json!({"result": {"minimum_payment": "60.01", "level_payment": "1032.80"}});
        assert_eq!(minimal_line(&v), "1032.80");
    }

    #[test]
    fn test_schedule_summary_prefers_total_interest() {
        let v = serde_json::json!({"result": {"periods": 12, "total_interest": "393.56", "schedule": []}});
        assert_eq!(minimal_line(&v), "393.56");
    }

    #[test]
    fn test_bare_rows_counted() {
        let v = serde_json::json!([{"seq": 1}, {"seq": 2}, {"seq": 3}]);
        assert_eq!(minimal_line(&v), "3 periods");
    }
}
