// src/checker/report.rs
// =============================================================================
// Maps a probe result to a diagnostic, or to nothing when the link is fine.
//
// Dead links get a plain message; redirected links additionally carry a fix
// that swaps the original URI text for the redirect's final destination.
// =============================================================================

use crate::document::{Diagnostic, Fix};

use super::extract::UriOccurrence;
use super::probe::ProbeResult;

/// Turns one probe result into at most one diagnostic.
pub fn verdict(occurrence: &UriOccurrence, result: &ProbeResult) -> Option<Diagnostic> {
    if !result.ok {
        return Some(Diagnostic {
            node: occurrence.node,
            message: format!("{} is dead. ({})", occurrence.uri, result.message),
            offset: occurrence.offset,
            fix: None,
        });
    }

    if let (true, Some(target)) = (result.redirected, result.redirect_target.as_deref()) {
        return Some(Diagnostic {
            node: occurrence.node,
            message: format!(
                "{} is redirected to {}. ({})",
                occurrence.uri, target, result.message
            ),
            offset: occurrence.offset,
            fix: Some(Fix::replace_range(
                occurrence.offset,
                occurrence.offset + occurrence.uri.len(),
                target,
            )),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(uri: &str, offset: usize) -> UriOccurrence {
        UriOccurrence {
            node: 1,
            uri: uri.to_string(),
            offset,
        }
    }

    fn result(ok: bool, redirected: bool, target: Option<&str>, message: &str) -> ProbeResult {
        ProbeResult {
            ok,
            redirected,
            redirect_target: target.map(str::to_string),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_dead_link_message() {
        let diag = verdict(
            &occurrence("https://example.com/404", 7),
            &result(false, false, None, "404 Not Found"),
        )
        .unwrap();
        assert_eq!(
            diag.message,
            "https://example.com/404 is dead. (404 Not Found)"
        );
        assert_eq!(diag.offset, 7);
        assert!(diag.fix.is_none());
    }

    #[test]
    fn test_redirect_message_and_fix_range() {
        let uri = "http://old.example.com";
        let diag = verdict(
            &occurrence(uri, 10),
            &result(true, true, Some("https://new.example.com/"), "301 Moved Permanently"),
        )
        .unwrap();
        assert_eq!(
            diag.message,
            "http://old.example.com is redirected to https://new.example.com/. (301 Moved Permanently)"
        );
        let fix = diag.fix.unwrap();
        assert_eq!(fix.start, 10);
        assert_eq!(fix.end, 10 + uri.len());
        assert_eq!(fix.text, "https://new.example.com/");
    }

    #[test]
    fn test_dead_redirect_reports_dead_without_fix() {
        let diag = verdict(
            &occurrence("http://old.example.com", 0),
            &result(false, true, Some("http://gone.example.com/"), "302 Found"),
        )
        .unwrap();
        assert!(diag.message.contains("is dead"));
        assert!(diag.message.contains("302"));
        assert!(diag.fix.is_none());
    }

    #[test]
    fn test_alive_link_emits_nothing() {
        assert!(verdict(
            &occurrence("https://example.com", 0),
            &result(true, false, None, "200 OK")
        )
        .is_none());
    }
}
