use std::fmt;

use serde::Serialize;

/// Point-in-time gold level of one mine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MineStatus {
    /// Mine name.
    pub name: String,
    /// Gold available, interpolated if an extraction is running.
    pub available: i64,
    /// Mine capacity.
    pub capacity: i64,
}

impl fmt::Display for MineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}/{} available", self.name, self.available, self.capacity)
    }
}

/// All mines ordered by descending capacity, ties by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatusReport {
    mines: Vec<MineStatus>,
}

impl StatusReport {
    /// Wrap an already ordered list of mine statuses.
    pub fn new(mines: Vec<MineStatus>) -> Self {
        Self { mines }
    }

    /// The mine entries in report order.
    pub fn mines(&self) -> &[MineStatus] {
        &self.mines
    }

    /// Look up one mine's entry.
    pub fn get(&self, name: &str) -> Option<&MineStatus> {
        self.mines.iter().find(|m| m.name == name)
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mine) in self.mines.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mine}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, available: i64, capacity: i64) -> MineStatus {
        MineStatus {
            name: name.into(),
            available,
            capacity,
        }
    }

    #[test]
    fn display_lists_mines_in_order() {
        let report = StatusReport::new(vec![status("clan_a", 17, 20), status("clan_b", 10, 10)]);
        assert_eq!(
            report.to_string(),
            "clan_a: 17/20 available clan_b: 10/10 available"
        );
    }

    #[test]
    fn empty_report_displays_nothing() {
        assert_eq!(StatusReport::default().to_string(), "");
    }

    #[test]
    fn get_finds_by_name() {
        let report = StatusReport::new(vec![status("clan_a", 1, 2)]);
        assert_eq!(report.get("clan_a").map(|m| m.available), Some(1));
        assert!(report.get("clan_b").is_none());
    }
}
