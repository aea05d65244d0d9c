//! Per-tick and per-run population statistics.

use serde::{Deserialize, Serialize};

/// What happened during a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// 1-based tick number
    pub tick: u64,
    /// Animals whose upkeep ran this tick
    pub visited: u32,
    /// Offspring placed on the grid
    pub births: u32,
    /// Predators removed because their hunger ran out
    pub starved: u32,
    /// Prey consumed by predators
    pub eaten: u32,
    pub moves: u32,
    pub idles: u32,
    /// Population before the tick, as (predators, prey)
    pub before: (usize, usize),
    /// Population after the tick, as (predators, prey)
    pub after: (usize, usize),
}

impl TickReport {
    pub fn new(tick: u64, before: (usize, usize)) -> Self {
        Self {
            tick,
            before,
            after: before,
            ..Default::default()
        }
    }

    /// True when the population change is fully explained by births and deaths
    pub fn is_conserved(&self) -> bool {
        let before = self.before.0 + self.before.1;
        let after = self.after.0 + self.after.1;
        before + self.births as usize == after + self.starved as usize + self.eaten as usize
    }
}

/// Totals across a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks_run: u64,
    pub total_births: u64,
    pub total_starved: u64,
    pub total_eaten: u64,
    pub peak_predators: usize,
    pub peak_prey: usize,
    pub final_predators: usize,
    pub final_prey: usize,
}

impl RunSummary {
    pub fn new(initial: (usize, usize)) -> Self {
        Self {
            peak_predators: initial.0,
            peak_prey: initial.1,
            final_predators: initial.0,
            final_prey: initial.1,
            ..Default::default()
        }
    }

    /// Fold a finished tick into the totals
    pub fn record(&mut self, report: &TickReport) {
        self.ticks_run += 1;
        self.total_births += u64::from(report.births);
        self.total_starved += u64::from(report.starved);
        self.total_eaten += u64::from(report.eaten);
        self.peak_predators = self.peak_predators.max(report.after.0);
        self.peak_prey = self.peak_prey.max(report.after.1);
        self.final_predators = report.after.0;
        self.final_prey = report.after.1;
    }

    pub fn is_extinct(&self) -> bool {
        self.final_predators == 0 && self.final_prey == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservation_check() {
        let mut report = TickReport::new(1, (3, 4));
        report.births = 2;
        report.starved = 1;
        report.eaten = 1;
        report.after = (3, 4);
        assert!(report.is_conserved());

        report.after = (4, 4);
        assert!(!report.is_conserved());
    }

    #[test]
    fn test_run_summary_update() {
        let mut summary = RunSummary::new((2, 2));

        let mut first = TickReport::new(1, (2, 2));
        first.births = 3;
        first.after = (3, 4);
        summary.record(&first);

        let mut second = TickReport::new(2, (3, 4));
        second.eaten = 2;
        second.starved = 1;
        second.after = (2, 2);
        summary.record(&second);

        assert_eq!(summary.ticks_run, 2);
        assert_eq!(summary.total_births, 3);
        assert_eq!(summary.total_eaten, 2);
        assert_eq!(summary.total_starved, 1);
        assert_eq!(summary.peak_predators, 3);
        assert_eq!(summary.peak_prey, 4);
        assert_eq!((summary.final_predators, summary.final_prey), (2, 2));
        assert!(!summary.is_extinct());
    }
}
