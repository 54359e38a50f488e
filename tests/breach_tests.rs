//! Integration tests for the breach checker, using a recording lookup.

use std::cell::RefCell;

use secura::breach::{sha1_hex, BreachChecker, HttpRangeLookup, RangeLookup, PREFIX_LEN};
use secura::errors::{Result, SecuraError};

/// Answers with a canned body and remembers every prefix it was asked for.
struct RecordingLookup {
    body: String,
    seen: RefCell<Vec<String>>,
}

impl RecordingLookup {
    fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl RangeLookup for &RecordingLookup {
    fn range(&self, prefix: &str) -> Result<String> {
        self.seen.borrow_mut().push(prefix.to_string());
        Ok(self.body.clone())
    }
}

struct FailingLookup;

impl RangeLookup for FailingLookup {
    fn range(&self, _prefix: &str) -> Result<String> {
        Err(SecuraError::Breach("network unreachable".into()))
    }
}

#[test]
fn only_the_prefix_leaves_the_process() {
    let digest = sha1_hex("password");
    let suffix = &digest[PREFIX_LEN..];
    let body = format!("0000000000000000000000000000000000A:0\r\n{suffix}:42\r\n");
    let lookup = RecordingLookup::new(&body);

    let report = BreachChecker::new(&lookup).check("password").unwrap();
    assert!(report.breached);
    assert_eq!(report.count, 42);

    let seen = lookup.seen.borrow();
    assert_eq!(seen.as_slice(), [digest[..PREFIX_LEN].to_string()]);
    assert_eq!(seen[0].len(), 5);
}

#[test]
fn padding_rows_do_not_count() {
    let digest = sha1_hex("correct horse battery staple");
    let suffix = &digest[PREFIX_LEN..];
    let lookup = RecordingLookup::new(&format!("{suffix}:0\n"));

    let report = BreachChecker::new(&lookup)
        .check("correct horse battery staple")
        .unwrap();
    assert!(!report.breached);
    assert_eq!(report.count, 0);
}

#[test]
fn absent_suffix_is_clean() {
    let lookup = RecordingLookup::new("ABCDEF:3\n");
    let report = BreachChecker::new(&lookup).check("x").unwrap();
    assert!(!report.breached);
}

#[test]
fn lowercase_listing_still_matches() {
    let digest = sha1_hex("letmein");
    let suffix = digest[PREFIX_LEN..].to_lowercase();
    let lookup = RecordingLookup::new(&format!("{suffix}:7"));
    assert_eq!(BreachChecker::new(&lookup).check("letmein").unwrap().count, 7);
}

#[test]
fn empty_candidate_is_rejected_before_lookup() {
    let lookup = RecordingLookup::new("");
    let err = BreachChecker::new(&lookup).check("").unwrap_err();
    assert!(matches!(err, SecuraError::Validation(_)));
    assert!(lookup.seen.borrow().is_empty());
}

#[test]
fn lookup_failure_is_reported() {
    let err = BreachChecker::new(FailingLookup).check("pw").unwrap_err();
    assert!(matches!(err, SecuraError::Breach(_)));
}

#[test]
fn unreachable_api_is_a_breach_error() {
    let lookup = HttpRangeLookup::new("http://127.0.0.1:9", std::time::Duration::from_secs(2));
    let err = BreachChecker::new(lookup).check("pw").unwrap_err();
    assert!(matches!(err, SecuraError::Breach(_)));
}
