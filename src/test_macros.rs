//! Test DSL for the `doc_schema` command line and command results.
//!
//! CLI cases list the arguments after the binary name and the fields they
//! should leave on the parsed subcommand. Output cases take an rstest
//! fixture and check one output format.

/// Parse a `doc_schema` invocation and check fields of the subcommand.
///
/// ```ignore
/// cli_parse_test! {
///     test_name: test_create_index_json_format,
///     args: ["create-index", "-c", ":memory:", "-d", "app", "--format", "json"],
///     variant: CreateIndex,
///     fields: { format: OutputFormat::Json },
/// }
/// ```
#[macro_export]
macro_rules! cli_parse_test {
    (
        test_name: $test_name:ident,
        args: [$($arg:literal),+ $(,)?],
        variant: $variant:ident,
        fields: { $($field:ident : $expected:expr),+ $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let args = Args::try_parse_from(["doc_schema", $($arg),+]).unwrap();
            let crate::commands::Command::$variant(cmd) = args.command else {
                panic!(concat!("expected the ", stringify!($variant), " subcommand"));
            };
            $(
                assert_eq!(cmd.$field, $expected, concat!("--", stringify!($field), " parsed wrong"));
            )+
        }
    };
}

/// Check that an invocation is refused, optionally naming the offending flag.
///
/// ```ignore
/// cli_rejects_test! {
///     test_name: test_create_index_requires_connection,
///     args: ["create-index", "-d", "app"],
///     mentions: "--connection",
/// }
/// ```
#[macro_export]
macro_rules! cli_rejects_test {
    (
        test_name: $test_name:ident,
        args: [$($arg:literal),+ $(,)?]
        $(, mentions: $flag:literal)? $(,)?
    ) => {
        #[rstest]
        fn $test_name() {
            let result = Args::try_parse_from(["doc_schema", $($arg),+]);
            let Err(err) = result else {
                panic!("invocation should have been refused");
            };
            $(
                assert!(err.to_string().contains($flag), concat!("error should name ", $flag));
            )?
            let _ = err;
        }
    };
}

/// Check the table rendering of a command result, exactly or by fragments.
#[macro_export]
macro_rules! output_table_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        expected: $expected:expr $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::Outputable;
            assert_eq!($fixture.to_table(), $expected);
        }
    };
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        contains: [$($needle:literal),+ $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::Outputable;
            let table = $fixture.to_table();
            $(
                assert!(table.contains($needle), concat!("table should contain: ", $needle));
            )+
        }
    };
}

/// Check top-level fields of a result's `--format json` rendering.
#[macro_export]
macro_rules! output_json_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        fields: { $($key:literal : $expected:expr),+ $(,)? } $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{OutputFormat, Outputable};
            let json: serde_json::Value =
                serde_json::from_str(&$fixture.format(OutputFormat::Json)).unwrap();
            $(
                assert_eq!(json[$key], $expected, concat!("json field ", $key));
            )+
        }
    };
}

/// Check fragments of a result's `--format toon` rendering.
#[macro_export]
macro_rules! output_toon_test {
    (
        test_name: $test_name:ident,
        fixture: $fixture:ident,
        fixture_type: $fixture_type:ty,
        contains: [$($needle:literal),+ $(,)?] $(,)?
    ) => {
        #[rstest]
        fn $test_name($fixture: $fixture_type) {
            use crate::output::{OutputFormat, Outputable};
            let toon = $fixture.format(OutputFormat::Toon);
            $(
                assert!(toon.contains($needle), concat!("toon should contain: ", $needle));
            )+
        }
    };
}
