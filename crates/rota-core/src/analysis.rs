//! Boundary to the workload-analysis collaborator.
//!
//! The collaborator is total by contract: an [`Analyst`] always returns
//! text, never an error, so no caller above this seam needs failure
//! handling. The zero-selection case is answered locally without invoking
//! the collaborator at all.

use crate::calendar::YearMonth;
use crate::datekey::DateKey;
use crate::history::Snapshot;
use crate::locale::Locale;

/// Produces free-text commentary for one month of duty days.
///
/// Implementations must convert every internal failure (missing
/// credentials, transport, malformed response) into fallback text.
pub trait Analyst {
    fn analyze(&self, month_label: &str, dates: &[DateKey]) -> String;
}

/// Keys from `snapshot` that fall inside `ym`, sorted ascending.
#[must_use]
pub fn month_selection(snapshot: &Snapshot, ym: YearMonth) -> Vec<DateKey> {
    let mut keys: Vec<DateKey> = snapshot
        .keys()
        .iter()
        .filter(|k| ym.contains(k))
        .cloned()
        .collect();
    keys.sort_unstable();
    keys
}

/// Summarize the duty days of `ym`.
///
/// Returns the fixed localized no-duty message when nothing in the snapshot
/// falls inside the month; otherwise forwards the filtered, sorted keys and
/// the localized month label to the analyst.
pub fn summarize_month(
    analyst: &dyn Analyst,
    locale: Locale,
    ym: YearMonth,
    snapshot: &Snapshot,
) -> String {
    let dates = month_selection(snapshot, ym);
    if dates.is_empty() {
        return locale.no_duty_message().to_string();
    }
    analyst.analyze(&locale.month_label(ym), &dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records calls instead of talking to anything external.
    struct RecordingAnalyst {
        calls: RefCell<Vec<(String, Vec<DateKey>)>>,
    }

    impl RecordingAnalyst {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Analyst for RecordingAnalyst {
        fn analyze(&self, month_label: &str, dates: &[DateKey]) -> String {
            self.calls
                .borrow_mut()
                .push((month_label.to_string(), dates.to_vec()));
            format!("analysis of {month_label}")
        }
    }

    fn key(s: &str) -> DateKey {
        s.parse().expect("valid key")
    }

    #[test]
    fn forwards_only_same_month_keys() {
        let snapshot: Snapshot = [key("2024-05-01"), key("2024-06-01")].into_iter().collect();
        let ym: YearMonth = "2024-05".parse().expect("month");
        let analyst = RecordingAnalyst::new();

        let text = summarize_month(&analyst, Locale::En, ym, &snapshot);
        assert_eq!(text, "analysis of May 2024");

        let calls = analyst.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "May 2024");
        assert_eq!(calls[0].1, vec![key("2024-05-01")]);
    }

    #[test]
    fn zero_selection_skips_the_analyst() {
        let snapshot: Snapshot = [key("2024-06-01")].into_iter().collect();
        let ym: YearMonth = "2024-05".parse().expect("month");
        let analyst = RecordingAnalyst::new();

        let text = summarize_month(&analyst, Locale::En, ym, &snapshot);
        assert_eq!(text, Locale::En.no_duty_message());
        assert!(analyst.calls.borrow().is_empty());

        let text = summarize_month(&analyst, Locale::Tr, ym, &snapshot);
        assert_eq!(text, Locale::Tr.no_duty_message());
    }

    #[test]
    fn month_selection_sorts_ascending() {
        let snapshot: Snapshot = [key("2024-05-20"), key("2024-05-03"), key("2024-05-11")]
            .into_iter()
            .collect();
        let ym: YearMonth = "2024-05".parse().expect("month");
        assert_eq!(
            month_selection(&snapshot, ym),
            vec![key("2024-05-03"), key("2024-05-11"), key("2024-05-20")]
        );
    }
}
