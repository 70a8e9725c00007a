//! Drives the app-side session the way the event pump does: a
//! submission produces a request, the engine runs against the scripted
//! chain, and the staged outcomes are applied back under the same
//! sequence numbers the worker would tag them with.

use scry::app::{App, SearchPhase};
use scry::domain::block::BlockId;
use scry::infrastructure::chain::{ChainClient, MockChain};
use scry::search;

/// Run one submission through the same stages as the async worker,
/// feeding each outcome back into the session.
async fn run_submission(app: &mut App, chain: &dyn ChainClient) {
    let request = app.take_search_request().expect("a request was submitted");

    let id = match BlockId::parse(request.mode, &request.param) {
        Ok(id) => id,
        Err(err) => {
            app.search.apply_failed(request.seq, &err.to_string());
            return;
        }
    };
    let found = match search::resolve(chain, &id).await {
        Ok(found) => found,
        Err(err) => {
            app.search.apply_failed(request.seq, &err.to_string());
            return;
        }
    };
    app.search.apply_resolved(request.seq, found.status_line());
    match search::build_report(chain, &found).await {
        Ok(report) => app.search.apply_completed(request.seq, report),
        Err(err) => app.search.apply_failed(request.seq, &err.to_string()),
    }
}

#[tokio::test]
async fn successful_height_search_fills_status_and_report() {
    let chain = MockChain::development();
    let mut app = App::new();

    app.search.param_text = "1".to_string();
    app.submit_search();
    run_submission(&mut app, &chain).await;

    assert_eq!(app.search.phase, SearchPhase::Done);
    assert_eq!(
        app.search.status.as_deref(),
        Some(
            format!(
                "[ Development ] : found block #1 has hash {}",
                MockChain::hash_for(1)
            )
            .as_str()
        )
    );
    let report = app.search.report.as_deref().unwrap();
    assert!(report.contains("balances.transfer:: balances.Transfer, system.ExtrinsicSuccess"));
    assert!(app.search.param_text.is_empty());
}

#[tokio::test]
async fn failed_hash_search_keeps_the_previous_report() {
    let chain = MockChain::development();
    let mut app = App::new();

    app.search.param_text = "0".to_string();
    app.submit_search();
    run_submission(&mut app, &chain).await;
    let kept = app.search.report.clone().expect("first search succeeded");

    app.search.toggle_mode();
    app.search.param_text = format!("0x{:064x}", 0xbad_c0deu64);
    app.submit_search();
    run_submission(&mut app, &chain).await;

    assert_eq!(app.search.phase, SearchPhase::Failed);
    assert_eq!(app.search.report.as_deref(), Some(kept.as_str()));
    let status = app.search.status.as_deref().unwrap();
    assert!(status.starts_with("ERROR: not found:"), "{status}");
}

#[tokio::test]
async fn invalid_input_fails_without_touching_the_chain() {
    // An empty chain would make any lookup explode loudly
    let chain = MockChain::named("Empty");
    let mut app = App::new();

    app.search.param_text = "not a number".to_string();
    app.submit_search();
    run_submission(&mut app, &chain).await;

    assert_eq!(app.search.phase, SearchPhase::Failed);
    let status = app.search.status.as_deref().unwrap();
    assert!(status.starts_with("ERROR: invalid input:"), "{status}");
}

#[tokio::test]
async fn mode_switch_after_a_result_keeps_it_on_screen() {
    let chain = MockChain::development();
    let mut app = App::new();

    app.search.param_text = "1".to_string();
    app.submit_search();
    run_submission(&mut app, &chain).await;
    assert!(app.search.report.is_some());

    app.search.toggle_mode();
    assert!(app.search.param_text.is_empty());
    assert!(app.search.report.is_some());
    assert!(app.search.status.is_some());
}

#[tokio::test]
async fn overlapping_submissions_settle_on_the_latest() {
    let chain = MockChain::development();
    let mut app = App::new();

    app.search.param_text = "0".to_string();
    app.submit_search();
    let stale = app.take_search_request().unwrap();

    app.search.param_text = "1".to_string();
    app.submit_search();
    run_submission(&mut app, &chain).await;

    // The stale outcome lands after the fresh one and must be dropped
    app.search.apply_resolved(stale.seq, "stale".to_string());
    app.search.apply_completed(stale.seq, "stale report".to_string());

    assert_eq!(app.search.phase, SearchPhase::Done);
    let report = app.search.report.as_deref().unwrap();
    assert!(report.contains("balances.transfer"), "{report}");
}
