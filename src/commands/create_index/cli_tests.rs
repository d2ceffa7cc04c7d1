//! CLI parsing tests for the create-index command.

#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::output::OutputFormat;
    use clap::Parser;
    use rstest::rstest;

    crate::cli_parse_test! {
        test_name: test_create_index_defaults,
        args: ["create-index", "-c", ":memory:", "-d", "itembank"],
        variant: CreateIndex,
        fields: {
            connection: ":memory:",
            database: "itembank",
            format: OutputFormat::Table,
        },
    }

    crate::cli_parse_test! {
        test_name: test_create_index_long_flags,
        args: ["create-index", "--connection", "sqlite://./catalog.sqlite", "--database", "app"],
        variant: CreateIndex,
        fields: {
            connection: "sqlite://./catalog.sqlite",
            database: "app",
        },
    }

    crate::cli_parse_test! {
        test_name: test_create_index_json_format,
        args: ["create-index", "-c", ":memory:", "-d", "app", "--format", "json"],
        variant: CreateIndex,
        fields: { format: OutputFormat::Json },
    }

    crate::cli_rejects_test! {
        test_name: test_create_index_requires_connection,
        args: ["create-index", "-d", "app"],
        mentions: "--connection",
    }

    crate::cli_rejects_test! {
        test_name: test_create_index_requires_database,
        args: ["create-index", "-c", ":memory:"],
        mentions: "--database",
    }

    crate::cli_rejects_test! {
        test_name: test_create_index_rejects_unknown_format,
        args: ["create-index", "-c", ":memory:", "-d", "app", "--format", "xml"],
    }

    #[rstest]
    fn test_create_index_with_log_level() {
        let args = Args::try_parse_from([
            "doc_schema",
            "--log-level",
            "debug",
            "create-index",
            "-c",
            ":memory:",
            "-d",
            "app",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
