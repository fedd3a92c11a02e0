use std::sync::atomic::Ordering;
use std::time::Duration;

use super::*;
use crate::test_support::{adapter_for_tests, FakePage};

#[tokio::test]
async fn terminates_when_growth_stalls() {
    let page = FakePage::builder()
        .extents(vec![100, 200, 300, 300])
        .build();
    let adapter = adapter_for_tests();
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    // Growth stops after the third measurement; one extra iteration detects
    // the stall and the loop is done.
    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn stall_tolerance_rechecks_before_terminating() {
    let page = FakePage::builder().extents(vec![100, 100, 100]).build();
    let mut adapter = adapter_for_tests();
    adapter.stall_tolerance = 1;
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    // One stalled measurement is re-checked; the second ends the loop.
    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn zero_stall_tolerance_terminates_on_first_stall() {
    let page = FakePage::builder().extents(vec![100, 100]).build();
    let adapter = adapter_for_tests();
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn shrinking_extent_counts_as_a_stall() {
    // Transiently lower measurements must not loop or lower the high-water
    // mark.
    let page = FakePage::builder().extents(vec![300, 250]).build();
    let adapter = adapter_for_tests();
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn wall_clock_budget_cuts_off_a_growing_page() {
    let page = FakePage::builder().growing_forever(100).build();
    let mut adapter = adapter_for_tests();
    adapter.session_budget = Duration::ZERO;
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(
        page.scroll_calls.load(Ordering::SeqCst),
        0,
        "budget exhaustion wins over continued growth"
    );
}

#[tokio::test]
async fn iteration_budget_cuts_off_a_growing_page() {
    let page = FakePage::builder().growing_forever(100).build();
    let mut adapter = adapter_for_tests();
    adapter.max_iterations = 3;
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn visible_load_more_control_is_clicked_and_the_loop_continues() {
    let page = FakePage::builder()
        .extents(vec![100, 100])
        .visible_button(vec![200, 200])
        .build();
    let mut adapter = adapter_for_tests();
    adapter.strategy = PaginationStrategy::ScrollThenClickMore { button: "#more" };
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(page.click_calls.load(Ordering::SeqCst), 1);
    // Stall, click, growth to 200, second stall with the button now hidden.
    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn hidden_load_more_control_terminates() {
    let page = FakePage::builder().extents(vec![100, 100]).build();
    let mut adapter = adapter_for_tests();
    adapter.strategy = PaginationStrategy::ScrollThenClickMore { button: "#more" };
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(page.click_calls.load(Ordering::SeqCst), 0);
    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failing_click_terminates_instead_of_erroring() {
    let page = FakePage::builder()
        .extents(vec![100, 100])
        .failing_button()
        .build();
    let mut adapter = adapter_for_tests();
    adapter.strategy = PaginationStrategy::ScrollThenClickMore { button: "#more" };
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("a dead load-more control ends the session cleanly");

    assert_eq!(page.click_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn incremental_walk_covers_the_measured_extent() {
    let page = FakePage::builder().extents(vec![5000]).build();
    let mut adapter = adapter_for_tests();
    adapter.strategy = PaginationStrategy::ScrollByIncrement { step: 2000 };
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    // 2000, 4000, 6000 >= 5000: three steps cover the panel.
    assert_eq!(page.scroll_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn missing_required_container_is_selector_not_found() {
    let page = FakePage::builder().container_missing().build();
    let mut adapter = adapter_for_tests();
    adapter.await_container = true;
    let mut accumulator = ResultAccumulator::new();

    let error = ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect_err("container never appears");

    assert!(
        matches!(&error, ScrapeError::SelectorNotFound { selector, .. }
            if selector == adapter.scroll_container)
    );
}

#[tokio::test]
async fn result_set_grows_monotonically_across_iterations() {
    let page = FakePage::builder()
        .extents(vec![100, 200, 300, 300])
        .batches(vec![
            vec!["114;1;2;50.00".to_owned()],
            vec!["114;1;2;50.00".to_owned(), "114;2;2;55.00".to_owned()],
            vec![
                "114;1;2;50.00".to_owned(),
                "114;2;2;55.00".to_owned(),
                "115;1;4;60.00".to_owned(),
            ],
        ])
        .build();
    let adapter = adapter_for_tests();
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    // Re-extracted rows deduplicate; only the three distinct records remain.
    assert_eq!(accumulator.len(), 3);
}

#[tokio::test]
async fn final_pass_catches_rows_rendered_after_the_last_scroll() {
    let page = FakePage::builder()
        .extents(vec![100, 100])
        .batches(vec![vec![], vec![], vec!["114;9;2;75.00".to_owned()]])
        .build();
    let adapter = adapter_for_tests();
    let mut accumulator = ResultAccumulator::new();

    ScrollDriver::new(&page, &adapter)
        .run(&mut accumulator)
        .await
        .expect("driver run");

    assert_eq!(accumulator.len(), 1);
}
