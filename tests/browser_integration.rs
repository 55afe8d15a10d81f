//! Integration tests that drive a real Chrome instance against data: URLs.
//!
//! All tests are ignored by default; run with: cargo test -- --ignored

use slidecap::browser::{BrowserSession, LaunchOptions};
use slidecap::capture::{capture_slide, SettleDelays, SlideNavigator};
use slidecap::discover;
use slidecap::locator::{locate, strategies_for, Located, Target};
use std::time::Duration;

fn launch() -> BrowserSession {
    BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser")
}

fn open(session: &BrowserSession, html: &str) {
    session
        .navigate(&format!("data:text/html,{}", html))
        .expect("Failed to navigate");
    std::thread::sleep(Duration::from_millis(500));
}

fn element_id(located: &Located) -> String {
    match located {
        Located::Element(element) => element
            .call_js_fn("function() { return this.id; }", vec![], false)
            .expect("id lookup failed")
            .value
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_default(),
        Located::Coordinates { .. } => panic!("expected an element, got coordinate fallback"),
    }
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_strategy_priority_outranks_document_order() {
    let session = launch();

    // The plain div comes first in the DOM, but the role-scoped strategy
    // ranks higher, so the role='button' entry must win.
    open(
        &session,
        "<html><body>\
         <div id='plain'>Q3 Roadmap Deck</div>\
         <div role='button' id='entry'>Q3 Roadmap Deck</div>\
         </body></html>",
    );

    let target = Target::document("q3 roadmap");
    let located = locate(session.tab(), &target, &strategies_for(&target), Duration::from_secs(2))
        .expect("locate failed");

    assert_eq!(element_id(&located), "entry");
    session.close();
}

#[test]
#[ignore]
fn test_locate_never_returns_invisible_element() {
    let session = launch();

    open(
        &session,
        "<html><body>\
         <div role='button' style='display:none'>Hidden Deck</div>\
         </body></html>",
    );

    let target = Target::document("Hidden Deck");
    let result = locate(session.tab(), &target, &strategies_for(&target), Duration::from_millis(600));

    assert!(result.is_err(), "invisible element must not be located");
    session.close();
}

#[test]
#[ignore]
fn test_capture_isolates_slide_element() {
    let session = launch();

    open(
        &session,
        "<html><body>\
         <img class='slide-image' style='width:120px;height:80px;background:%23c00'>\
         </body></html>",
    );

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("captures").join("slide.png");

    let outcome = capture_slide(session.tab(), &output).expect("capture failed");

    assert!(outcome.isolated);
    assert_eq!(outcome.path, output);
    assert!(output.is_file());
    session.close();
}

#[test]
#[ignore]
fn test_capture_degrades_to_viewport() {
    let session = launch();

    open(&session, "<html><body><p>No slide here</p></body></html>");

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("viewport.png");

    let outcome = capture_slide(session.tab(), &output).expect("capture failed");

    assert!(!outcome.isolated);
    assert!(output.is_file());
    session.close();
}

#[test]
#[ignore]
fn test_discovery_scan_filters_and_absolutizes() {
    let session = launch();

    open(
        &session,
        "<html><body>\
         <div role='listitem'><h2>Alpha</h2><a href='/notebook/a'>open</a></div>\
         <div role='listitem'><h2>Beta Plan</h2><a href='/notebook/b'>open</a></div>\
         <div role='listitem'><h2>Gamma</h2><a href='/notebook/c'>open</a></div>\
         </body></html>",
    );

    let entries = discover::scan(session.tab(), Some("plan")).expect("scan failed");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Beta Plan");
    assert_eq!(entries[0].url, "https://notebooklm.google.com/notebook/b");
    session.close();
}

#[test]
#[ignore]
fn test_discovery_title_fallback_chain() {
    let session = launch();

    open(
        &session,
        "<html><body>\
         <div role='listitem'><span class='notebook-title'>From Class</span></div>\
         <div role='listitem'><span>no title markup at all</span></div>\
         </body></html>",
    );

    let entries = discover::scan(session.tab(), None).expect("scan failed");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "From Class");
    assert_eq!(entries[1].title, "Unknown Title");
    session.close();
}

#[test]
#[ignore]
fn test_advance_issues_expected_signals() {
    let session = launch();

    open(&session, "<html><body><p>slideshow stand-in</p></body></html>");

    let mut navigator = SlideNavigator::new(session.tab()).with_delays(SettleDelays::none());
    navigator.advance_to_page(4).expect("advance failed");

    assert_eq!(navigator.state().advances_issued(), 3);
    assert_eq!(navigator.state().current_index(), 4);
    session.close();
}
