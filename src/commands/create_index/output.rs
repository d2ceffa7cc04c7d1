//! Output formatting for create-index command results.

use super::execute::CreateIndexResult;
use crate::output::Outputable;

impl Outputable for CreateIndexResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Create indexes: {} on {} ({})",
            self.database, self.connection, self.backend
        ));
        lines.push(String::new());

        if self.collections.is_empty() {
            lines.push("No indexable collections.".to_string());
            return lines.join("\n");
        }

        for outcome in &self.collections {
            match &outcome.error {
                None => lines.push(format!("  [ok] {} ({} indexes)", outcome.collection, outcome.index_count)),
                Some(error) => lines.push(format!("  [failed] {}: {}", outcome.collection, error)),
            }
        }

        lines.push(String::new());
        lines.push(format!("Succeeded: {}, Failed: {}", self.succeeded, self.failed));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CollectionIndexOutcome;
    use rstest::{fixture, rstest};

    #[fixture]
    fn mixed_result() -> CreateIndexResult {
        CreateIndexResult {
            connection: "mongodb://***@db.example.com".to_string(),
            database: "itembank".to_string(),
            backend: "flaky".to_string(),
            collections: vec![
                CollectionIndexOutcome {
                    collection: "ExportTasks".to_string(),
                    index_count: 4,
                    success: true,
                    error: None,
                },
                CollectionIndexOutcome {
                    collection: "Subjects".to_string(),
                    index_count: 3,
                    success: false,
                    error: Some("Query failed: timeout".to_string()),
                },
            ],
            succeeded: 1,
            failed: 1,
        }
    }

    #[fixture]
    fn empty_result() -> CreateIndexResult {
        CreateIndexResult {
            connection: ":memory:".to_string(),
            database: "itembank".to_string(),
            backend: "cozo-mem".to_string(),
            collections: vec![],
            succeeded: 0,
            failed: 0,
        }
    }

    const MIXED_TABLE_OUTPUT: &str = "\
Create indexes: itembank on mongodb://***@db.example.com (flaky)

  [ok] ExportTasks (4 indexes)
  [failed] Subjects: Query failed: timeout

Succeeded: 1, Failed: 1";

    crate::output_table_test! {
        test_name: test_to_table_mixed,
        fixture: mixed_result,
        fixture_type: CreateIndexResult,
        expected: MIXED_TABLE_OUTPUT,
    }

    crate::output_table_test! {
        test_name: test_to_table_empty,
        fixture: empty_result,
        fixture_type: CreateIndexResult,
        contains: ["No indexable collections."],
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: mixed_result,
        fixture_type: CreateIndexResult,
        fields: {
            "database": "itembank",
            "succeeded": 1,
            "failed": 1,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: mixed_result,
        fixture_type: CreateIndexResult,
        contains: ["database: itembank", "succeeded: 1"],
    }

    #[rstest]
    fn test_json_omits_error_on_success(mixed_result: CreateIndexResult) {
        use crate::output::OutputFormat;
        let parsed: serde_json::Value = serde_json::from_str(&mixed_result.format(OutputFormat::Json)).unwrap();
        assert!(parsed["collections"][0].get("error").is_none());
        assert_eq!(parsed["collections"][1]["error"], "Query failed: timeout");
    }
}
