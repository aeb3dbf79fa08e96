//! Price timeline resolution
//!
//! Given one material's append-only price history and an optional
//! reference date, resolve exactly one applicable unit price. Never a
//! list, never an error: coverage gaps and empty histories come back as 0.

use chrono::NaiveDate;
use tracing::debug;

use crate::entities::price::PriceRecord;

/// Resolve the unit price applicable on `reference`.
///
/// - No reference date: the record with the latest `effective_start`
///   wins, regardless of its end date (best current guess).
/// - Reference date inside one or more effective ranges: the containing
///   record with the latest `effective_start` wins. Histories are not
///   guaranteed overlap-free at write time, so ties resolve toward the
///   most recently effective price; among records sharing a start date,
///   the last appended wins.
/// - Reference date in a coverage gap: the latest record that started on
///   or before the date wins.
/// - Reference date before all history: 0. Prices are never extrapolated
///   backward past the first known record.
pub fn resolve_unit_price(history: &[PriceRecord], reference: Option<NaiveDate>) -> f64 {
    let Some(date) = reference else {
        return history
            .iter()
            .max_by_key(|r| r.effective_start)
            .map(|r| r.unit_price)
            .unwrap_or(0.0);
    };

    if let Some(rec) = history
        .iter()
        .filter(|r| r.covers(date))
        .max_by_key(|r| r.effective_start)
    {
        return rec.unit_price;
    }

    match history
        .iter()
        .filter(|r| r.effective_start <= date)
        .max_by_key(|r| r.effective_start)
    {
        Some(rec) => {
            debug!(%date, price = rec.unit_price, "reference date in coverage gap, using latest earlier price");
            rec.unit_price
        }
        None => {
            if !history.is_empty() {
                debug!(%date, "reference date precedes all price history");
            }
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{EntityId, EntityPrefix};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// The two-record history used across these tests: a closed Q3 price
    /// overlapping an open-ended November revision.
    fn history() -> Vec<PriceRecord> {
        let mat = EntityId::new(EntityPrefix::Mat);
        vec![
            PriceRecord::new(mat.clone(), 25.5, date("2025-06-07"), "test")
                .until(date("2025-12-31")),
            PriceRecord::new(mat, 22.6, date("2025-11-24"), "test"),
        ]
    }

    #[test]
    fn test_date_within_single_range() {
        assert_eq!(resolve_unit_price(&history(), Some(date("2025-08-15"))), 25.5);
    }

    #[test]
    fn test_overlap_resolves_to_latest_start() {
        assert_eq!(resolve_unit_price(&history(), Some(date("2025-11-25"))), 22.6);
    }

    #[test]
    fn test_no_reference_date_uses_latest_start() {
        assert_eq!(resolve_unit_price(&history(), None), 22.6);
    }

    #[test]
    fn test_date_before_all_history() {
        assert_eq!(resolve_unit_price(&history(), Some(date("2025-01-01"))), 0.0);
    }

    #[test]
    fn test_boundary_dates_inclusive() {
        let h = history();
        assert_eq!(resolve_unit_price(&h, Some(date("2025-06-07"))), 25.5);
        assert_eq!(resolve_unit_price(&h, Some(date("2025-11-24"))), 22.6);
        assert_eq!(resolve_unit_price(&h, Some(date("2025-12-31"))), 22.6);
    }

    #[test]
    fn test_coverage_gap_uses_latest_earlier_record() {
        let mat = EntityId::new(EntityPrefix::Mat);
        let h = vec![
            PriceRecord::new(mat.clone(), 18.0, date("2025-01-01"), "test")
                .until(date("2025-03-31")),
            PriceRecord::new(mat, 21.0, date("2025-07-01"), "test"),
        ];
        // May sits in the gap between the two ranges
        assert_eq!(resolve_unit_price(&h, Some(date("2025-05-10"))), 18.0);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(resolve_unit_price(&[], None), 0.0);
        assert_eq!(resolve_unit_price(&[], Some(date("2025-08-15"))), 0.0);
    }

    #[test]
    fn test_equal_starts_last_appended_wins() {
        let mat = EntityId::new(EntityPrefix::Mat);
        let h = vec![
            PriceRecord::new(mat.clone(), 10.0, date("2025-06-01"), "test"),
            PriceRecord::new(mat, 11.0, date("2025-06-01"), "test"),
        ];
        assert_eq!(resolve_unit_price(&h, Some(date("2025-06-15"))), 11.0);
        assert_eq!(resolve_unit_price(&h, None), 11.0);
    }
}
