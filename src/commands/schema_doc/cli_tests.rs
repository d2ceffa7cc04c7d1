//! CLI parsing tests for the schema-doc command.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use clap::Parser;
    use rstest::rstest;
    use std::path::PathBuf;

    crate::cli_parse_test! {
        test_name: test_schema_doc_defaults,
        args: ["schema-doc"],
        variant: SchemaDoc,
        fields: {
            format: None::<String>,
            output: None::<PathBuf>,
        },
    }

    crate::cli_parse_test! {
        test_name: test_schema_doc_with_format,
        args: ["schema-doc", "--format", "md"],
        variant: SchemaDoc,
        fields: { format: Some("md".to_string()) },
    }

    crate::cli_parse_test! {
        test_name: test_schema_doc_with_short_flags,
        args: ["schema-doc", "-f", "yml", "-o", "docs/schema.yaml"],
        variant: SchemaDoc,
        fields: {
            format: Some("yml".to_string()),
            output: Some(PathBuf::from("docs/schema.yaml")),
        },
    }

    crate::cli_rejects_test! {
        test_name: test_schema_doc_output_needs_value,
        args: ["schema-doc", "--output"],
        mentions: "--output",
    }

    #[rstest]
    fn test_schema_doc_with_global_config() {
        let args = Args::try_parse_from(["doc_schema", "schema-doc", "--config", "custom.json"]).unwrap();
        assert_eq!(args.config, PathBuf::from("custom.json"));
    }
}
