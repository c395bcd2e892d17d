//! Tests for accelerator selection in the session options panel.

#![allow(clippy::expect_used)]

use kaggle_ssh::application::services::hardware::select_hardware;
use kaggle_ssh::domain::{Accelerator, NotebookError, UiTarget};

use crate::mocks::{FakePage, RecordingReporter};

#[tokio::test]
async fn switching_to_gpu_turns_it_on_and_runs_cell() {
    let page = FakePage::new()
        .with_accelerator("None")
        .with_quota(&["29 hrs"]);
    let reporter = RecordingReporter::new();

    let change = select_hardware(&page, Accelerator::GpuT4x2, &reporter)
        .await
        .expect("selected");

    assert_eq!(change.previous, Accelerator::None);
    assert_eq!(change.selected, Accelerator::GpuT4x2);
    assert_eq!(
        page.actions(),
        vec![
            "click None",
            "click GPU T4 x2",
            "click Turn on GPU T4 x2",
            "click Run current cell",
        ]
    );
    assert!(reporter.saw("info", "Quota remaining: 29 hrs"));
}

#[tokio::test]
async fn same_accelerator_is_not_turned_on_again() {
    let page = FakePage::new().with_accelerator("GPU P100");
    let reporter = RecordingReporter::new();

    let change = select_hardware(&page, Accelerator::GpuP100, &reporter)
        .await
        .expect("selected");

    assert_eq!(change.previous, Accelerator::GpuP100);
    assert!(!page.clicked("Turn on GPU P100"));
    assert!(page.clicked("Run current cell"));
    assert!(
        !reporter.saw("info", "Quota"),
        "empty quota text is not reported"
    );
}

#[tokio::test]
async fn cpu_only_skips_quota_and_turn_on() {
    let page = FakePage::new()
        .with_accelerator("GPU T4 x2")
        .with_quota(&["12 hrs"]);
    let reporter = RecordingReporter::new();

    let change = select_hardware(&page, Accelerator::None, &reporter)
        .await
        .expect("selected");

    assert_eq!(change.previous, Accelerator::GpuT4x2);
    assert_eq!(
        page.actions(),
        vec!["click GPU T4 x2", "click None", "click Run current cell"]
    );
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn collapsed_panel_is_expanded_first() {
    let options = UiTarget::text("Session optionskeyboard_arrow_down");
    let page = FakePage::new()
        .with_visible(&options)
        .with_accelerator("None");

    select_hardware(&page, Accelerator::None, &RecordingReporter::new())
        .await
        .expect("selected");

    assert_eq!(
        page.actions().first().map(String::as_str),
        Some("click Session optionskeyboard_arrow_down")
    );
}

#[tokio::test]
async fn ambiguous_selection_is_an_error() {
    let page = FakePage::new()
        .with_accelerator("None")
        .with_accelerator("GPU P100");

    let err = select_hardware(&page, Accelerator::TpuV38, &RecordingReporter::new())
        .await
        .expect_err("two options visible");

    assert!(matches!(
        err.downcast_ref::<NotebookError>(),
        Some(NotebookError::HardwareNotUnique { visible: 2 })
    ));
    assert!(page.actions().is_empty(), "nothing clicked");
}

#[tokio::test]
async fn missing_selection_is_an_error() {
    let page = FakePage::new();
    let err = select_hardware(&page, Accelerator::None, &RecordingReporter::new())
        .await
        .expect_err("nothing visible");
    assert!(matches!(
        err.downcast_ref::<NotebookError>(),
        Some(NotebookError::HardwareNotUnique { visible: 0 })
    ));
}
