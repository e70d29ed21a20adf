use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Categories offered by the expense row selector. An empty selection means
/// "Auto" and leaves categorization to the backend.
pub const CATEGORY_OPTIONS: &[&str] = &[
    "Housing",
    "Utilities",
    "Groceries",
    "Transport",
    "Dining",
    "Insurance",
    "Healthcare",
    "Education",
    "Entertainment",
    "Personal",
    "Debt",
    "Misc",
];

/// One editable expense row. The row list (not the DOM) is the source of
/// truth; `id` stays unique for the lifetime of the page so removals and
/// edits address the right row.
#[derive(Clone, PartialEq)]
pub struct RowDraft {
    pub id: usize,
    pub name: String,
    pub amount: String,
    pub category: String,
}

impl RowDraft {
    pub fn blank(id: usize) -> Self {
        Self {
            id,
            name: String::new(),
            amount: String::new(),
            category: String::new(),
        }
    }

    fn seeded(id: usize, name: &str, amount: &str, category: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
        }
    }
}

/// Starter rows shown on first load so the form is not empty.
pub fn seed_rows() -> Vec<RowDraft> {
    vec![
        RowDraft::seeded(0, "Rent", "15000", "Housing"),
        RowDraft::seeded(1, "Groceries", "6000", "Groceries"),
        RowDraft::seeded(2, "Internet", "1000", "Utilities"),
        RowDraft::seeded(3, "Dining out", "1500", "Dining"),
    ]
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub name: String,
    pub amount: f64,
    pub category: Option<String>,
}

#[derive(Clone, PartialEq, Serialize)]
pub struct AnalyzePayload {
    pub income: f64,
    pub expenses: Vec<Expense>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct Summary {
    pub income: f64,
    pub needs_current: f64,
    pub wants_current: f64,
    pub suggested_savings: f64,
}

/// Live market quotes the backend attaches to every analysis.
#[derive(Clone, PartialEq, Deserialize, Default)]
pub struct Prices {
    #[serde(default)]
    pub stocks: BTreeMap<String, f64>,
    #[serde(default)]
    pub crypto: BTreeMap<String, f64>,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub advice: Option<String>,
    /// Category totals in the order the server produced them.
    #[serde(default)]
    pub categories: serde_json::Map<String, serde_json::Value>,
    pub summary: Summary,
    #[serde(default)]
    pub prices: Option<Prices>,
}

/// Blank or unparseable numeric input counts as zero. Negative or absurd
/// values pass through uncorrected.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Snapshot the income field and the current rows into a request payload.
/// Pure read: blank name becomes "Unnamed", empty category becomes None so
/// the backend auto-detects.
pub fn collect_payload(income: &str, rows: &[RowDraft]) -> AnalyzePayload {
    let expenses = rows
        .iter()
        .map(|row| Expense {
            name: if row.name.trim().is_empty() {
                "Unnamed".to_string()
            } else {
                row.name.clone()
            },
            amount: parse_amount(&row.amount),
            category: if row.category.is_empty() {
                None
            } else {
                Some(row.category.clone())
            },
        })
        .collect();

    AnalyzePayload {
        income: parse_amount(income),
        expenses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_default_to_zero_and_unnamed() {
        let rows = vec![RowDraft::blank(0)];
        let payload = collect_payload("", &rows);

        assert_eq!(payload.income, 0.0);
        assert_eq!(payload.expenses.len(), 1);
        assert_eq!(payload.expenses[0].name, "Unnamed");
        assert_eq!(payload.expenses[0].amount, 0.0);
        assert_eq!(payload.expenses[0].category, None);
    }

    #[test]
    fn filled_row_collects_verbatim() {
        let rows = vec![RowDraft {
            id: 7,
            name: "Takeout".to_string(),
            amount: "1500.5".to_string(),
            category: "Dining".to_string(),
        }];
        let payload = collect_payload("50000", &rows);

        assert_eq!(payload.income, 50000.0);
        assert_eq!(payload.expenses[0].name, "Takeout");
        assert_eq!(payload.expenses[0].amount, 1500.5);
        assert_eq!(payload.expenses[0].category.as_deref(), Some("Dining"));
    }

    #[test]
    fn garbage_amount_defaults_to_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("-250"), -250.0);
    }

    #[test]
    fn payload_order_follows_row_order() {
        let rows = vec![
            RowDraft::seeded(0, "Rent", "15000", "Housing"),
            RowDraft::seeded(1, "Bus pass", "800", "Transport"),
        ];
        let payload = collect_payload("40000", &rows);
        let names: Vec<&str> = payload.expenses.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Bus pass"]);
    }

    #[test]
    fn add_then_remove_keeps_row_count_consistent() {
        let mut rows = seed_rows();
        assert_eq!(rows.len(), 4);

        rows.push(RowDraft::blank(4));
        rows.push(RowDraft::blank(5));
        assert_eq!(rows.len(), 6);

        rows.retain(|r| r.id != 4);
        assert_eq!(rows.len(), 5);

        // Removing an id that is already gone is a no-op.
        rows.retain(|r| r.id != 4);
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn payload_serializes_with_null_category() {
        let payload = collect_payload("0", &[RowDraft::blank(0)]);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["expenses"][0]["category"], serde_json::Value::Null);
    }

    #[test]
    fn result_deserializes_without_optional_fields() {
        let raw = r#"{"summary":{"income":50000,"needs_current":15000,"wants_current":1500,"suggested_savings":33500}}"#;
        let result: AnalysisResult = serde_json::from_str(raw).unwrap();
        assert!(result.advice.is_none());
        assert!(result.categories.is_empty());
        assert!(result.prices.is_none());
        assert_eq!(result.summary.suggested_savings, 33500.0);
    }
}
