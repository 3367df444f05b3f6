mod common;

use assert2::{check, let_assert};
use common::{TempDocRoot, sample_table, temp_root};
use rstest::rstest;
use rustdoc_implementors::cli::{execute_check, execute_list, execute_show};
use rustdoc_implementors::error::LoadError;
use rustdoc_implementors::types::ImplementorTable;

// --- List ---

/// Test: list shows each trait with its counts.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_shows_traits_with_counts(temp_root: TempDocRoot) {
    temp_root.create_artifact("core::ops::arith::SubAssign", &sample_table());
    temp_root.create_artifact("core::cmp::PartialOrd", &ImplementorTable::new());

    let output = execute_list(&temp_root.doc_root(), false).await.unwrap();

    check!(output.contains("Documented traits (2):"));
    check!(output.contains("core::ops::arith::SubAssign (2 crates, 3 impls)"));
    check!(output.contains("core::cmp::PartialOrd (0 crates, 0 impls)"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_of_an_empty_root_says_so(temp_root: TempDocRoot) {
    let output = execute_list(&temp_root.doc_root(), false).await.unwrap();
    check!(output == "No implementors artifacts found.\n");
}

/// Test: list --json emits one entry per trait.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_json_emits_one_entry_per_trait(temp_root: TempDocRoot) {
    temp_root.create_artifact("core::ops::arith::SubAssign", &sample_table());

    let output = execute_list(&temp_root.doc_root(), true).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    check!(
        value
            == serde_json::json!([{
                "trait_path": "core::ops::arith::SubAssign",
                "crate_count": 2,
                "record_count": 3,
            }])
    );
}

// --- Show ---

/// Test: show renders plain-text impl lines grouped by crate.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn show_renders_plain_text_groups(temp_root: TempDocRoot) {
    temp_root.create_artifact("core::ops::arith::SubAssign", &sample_table());

    let output = execute_show(&temp_root.doc_root(), "core::ops::arith::SubAssign", false)
        .await
        .unwrap();

    check!(output.starts_with("core::ops::arith::SubAssign\n"));
    check!(output.contains("2 crate(s), 3 implementation(s)"));
    check!(output.contains("cgmath (2):"));
    check!(output.contains("  impl<S: BaseFloat> SubAssign<Rad<S>> for Rad<S>\n"));
    check!(output.contains("nix (1):"));
    check!(output.contains("  impl SubAssign<Mode> for Mode  [synthetic]\n"));
    check!(!output.contains("<a "), "Markup should be stripped: {}", output);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn show_json_is_the_table_serialization(temp_root: TempDocRoot) {
    temp_root.create_artifact("core::ops::arith::SubAssign", &sample_table());

    let output = execute_show(&temp_root.doc_root(), "core::ops::arith::SubAssign", true)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    check!(value["cgmath"].as_array().map(Vec::len) == Some(2));
    check!(value["nix"][0]["synthetic"] == serde_json::json!(true));
}

/// Test: show on an undocumented trait reports which artifact was expected.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn show_of_a_missing_trait_is_not_found(temp_root: TempDocRoot) {
    let result = execute_show(&temp_root.doc_root(), "core::fmt::Debug", false).await;

    let_assert!(Err(error) = result);
    let_assert!(Some(LoadError::NotFound { trait_path, path }) = error.downcast_ref::<LoadError>());
    check!(trait_path == "core::fmt::Debug");
    check!(path.ends_with("implementors/core/fmt/trait.Debug.js"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn show_of_a_corrupt_artifact_is_malformed(temp_root: TempDocRoot) {
    temp_root.create_file("implementors/core/fmt/trait.Debug.js", "garbage");

    let result = execute_show(&temp_root.doc_root(), "core::fmt::Debug", false).await;

    let_assert!(Err(error) = result);
    let_assert!(Some(LoadError::Malformed { trait_path, .. }) = error.downcast_ref::<LoadError>());
    check!(trait_path == "core::fmt::Debug");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn show_rejects_a_malformed_trait_path(temp_root: TempDocRoot) {
    check!(
        execute_show(&temp_root.doc_root(), "core::::Debug", false)
            .await
            .is_err()
    );
}

// --- Check ---

/// Test: check passes on a healthy root.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn check_reports_every_artifact_ok(temp_root: TempDocRoot) {
    temp_root.create_artifact("core::ops::arith::SubAssign", &sample_table());
    temp_root.create_artifact("core::cmp::PartialOrd", &ImplementorTable::new());

    let output = execute_check(&temp_root.doc_root()).await.unwrap();

    check!(output.contains("OK   core::cmp::PartialOrd (0 crates, 0 impls)"));
    check!(output.contains("OK   core::ops::arith::SubAssign (2 crates, 3 impls)"));
    check!(output.contains("2 artifact(s) checked, 0 failed"));
}

/// Test: check fails when any artifact does not parse, keeping the report.
#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn check_fails_on_a_malformed_artifact(temp_root: TempDocRoot) {
    temp_root.create_artifact("core::ops::arith::SubAssign", &sample_table());
    temp_root.create_file(
        "implementors/core/fmt/trait.Debug.js",
        "(function() {var implementors = {};",
    );

    let_assert!(Err(error) = execute_check(&temp_root.doc_root()).await);
    let message = format!("{}", error);
    check!(message.contains("FAIL core::fmt::Debug"));
    check!(message.contains("OK   core::ops::arith::SubAssign"));
    check!(message.contains("2 artifact(s) checked, 1 failed"));
}
