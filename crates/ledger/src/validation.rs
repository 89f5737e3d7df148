//! Availability validation results.

use serde::{Deserialize, Serialize};

use stockline_core::ProductId;

/// Requested vs available quantities for one line item at validation time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAvailability {
    pub product_id: ProductId,
    pub requested: i64,
    pub available: i64,
}

impl LineAvailability {
    pub fn is_satisfiable(&self) -> bool {
        self.requested <= self.available
    }
}

/// Snapshot of availability for every line item of an order, taken in one
/// read-only pass. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    lines: Vec<LineAvailability>,
}

impl ValidationReport {
    pub fn new(lines: Vec<LineAvailability>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[LineAvailability] {
        &self.lines
    }

    pub fn is_satisfiable(&self) -> bool {
        self.lines.iter().all(LineAvailability::is_satisfiable)
    }

    /// Every unsatisfiable line, not just the first: the caller gets the
    /// whole list in one round trip.
    pub fn shortfalls(&self) -> Vec<Shortfall> {
        self.lines
            .iter()
            .filter(|l| !l.is_satisfiable())
            .map(|l| Shortfall {
                product_id: l.product_id,
                requested: l.requested,
                available: l.available,
            })
            .collect()
    }
}

/// One line item whose requested quantity exceeds availability.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub product_id: ProductId,
    pub requested: i64,
    pub available: i64,
}

impl core::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "product {}: requested {}, available {}",
            self.product_id, self.requested, self.available
        )
    }
}

/// Caller-facing shortfall list with a joined human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortfallList(Vec<Shortfall>);

impl ShortfallList {
    pub fn new(shortfalls: Vec<Shortfall>) -> Self {
        Self(shortfalls)
    }

    pub fn entries(&self) -> &[Shortfall] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<&ValidationReport> for ShortfallList {
    fn from(report: &ValidationReport) -> Self {
        Self(report.shortfalls())
    }
}

impl core::fmt::Display for ShortfallList {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, shortfall) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            core::fmt::Display::fmt(shortfall, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(requested: i64, available: i64) -> LineAvailability {
        LineAvailability {
            product_id: ProductId::new(),
            requested,
            available,
        }
    }

    #[test]
    fn report_with_all_satisfiable_lines_has_no_shortfalls() {
        let report = ValidationReport::new(vec![line(3, 5), line(1, 1)]);
        assert!(report.is_satisfiable());
        assert!(report.shortfalls().is_empty());
    }

    #[test]
    fn shortfalls_list_every_failing_line() {
        let ok = line(1, 10);
        let bad_a = line(5, 2);
        let bad_b = line(7, 0);
        let report = ValidationReport::new(vec![bad_a, ok, bad_b]);

        assert!(!report.is_satisfiable());
        let shortfalls = report.shortfalls();
        assert_eq!(shortfalls.len(), 2);
        assert_eq!(shortfalls[0].product_id, bad_a.product_id);
        assert_eq!(shortfalls[0].requested, 5);
        assert_eq!(shortfalls[0].available, 2);
        assert_eq!(shortfalls[1].product_id, bad_b.product_id);
    }

    #[test]
    fn shortfall_list_joins_human_readable_entries() {
        let report = ValidationReport::new(vec![line(5, 2), line(7, 0)]);
        let list = ShortfallList::from(&report);
        let msg = list.to_string();
        assert!(msg.contains("requested 5, available 2"));
        assert!(msg.contains("; "));
        assert!(msg.contains("requested 7, available 0"));
    }
}
