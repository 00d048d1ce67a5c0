//! # Frequency Classes
//!
//! Buckets a cluster by the fraction of strains possessing it. Intervals are
//! half-open on the right:
//!
//! | class     | fraction             |
//! |-----------|----------------------|
//! | Core      | `[core, 1.01)`       |
//! | Soft core | `[soft_core, core)`  |
//! | Shell     | `[shell, soft_core)` |
//! | Cloud     | `[0.0, shell)`       |
//!
//! Default lower cutoffs are 0.99, 0.95 and 0.15.

use std::fmt;

use crate::error::{ParamergeError, Result};

/// Upper bound of the core interval, above any reachable fraction
const CORE_UPPER: f64 = 1.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrequencyClass {
    Core,
    SoftCore,
    Shell,
    Cloud,
}

impl FrequencyClass {
    /// Report order
    pub const ALL: [FrequencyClass; 4] = [
        FrequencyClass::Core,
        FrequencyClass::SoftCore,
        FrequencyClass::Shell,
        FrequencyClass::Cloud,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FrequencyClass::Core => "Core genes",
            FrequencyClass::SoftCore => "Soft core genes",
            FrequencyClass::Shell => "Shell genes",
            FrequencyClass::Cloud => "Cloud genes",
        }
    }
}

impl fmt::Display for FrequencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lower cutoffs of the Core, Soft core and Shell classes, as fractions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyCutoffs {
    pub core: f64,
    pub soft_core: f64,
    pub shell: f64,
}

impl Default for FrequencyCutoffs {
    fn default() -> Self {
        Self {
            core: 0.99,
            soft_core: 0.95,
            shell: 0.15,
        }
    }
}

impl FrequencyCutoffs {
    /// Require `0 < shell < soft_core < core <= 1`
    pub fn validate(&self) -> Result<()> {
        let ordered = 0.0 < self.shell
            && self.shell < self.soft_core
            && self.soft_core < self.core
            && self.core <= 1.0;
        if !ordered {
            return Err(ParamergeError::config(format!(
                "frequency cutoffs must satisfy 0 < shell ({}) < soft core ({}) < core ({}) <= 1",
                self.shell, self.soft_core, self.core
            )));
        }
        Ok(())
    }

    /// Class of a cluster present in `count` of `n_strains` strains
    pub fn classify(&self, count: usize, n_strains: usize) -> FrequencyClass {
        if n_strains == 0 {
            return FrequencyClass::Cloud;
        }
        let fraction = count as f64 / n_strains as f64;
        if fraction >= self.core && fraction < CORE_UPPER {
            FrequencyClass::Core
        } else if fraction >= self.soft_core && fraction < self.core {
            FrequencyClass::SoftCore
        } else if fraction >= self.shell && fraction < self.soft_core {
            FrequencyClass::Shell
        } else {
            FrequencyClass::Cloud
        }
    }

    /// Range text for the summary report, e.g. `99% <= strains <= 100%`
    pub fn describe(&self, class: FrequencyClass) -> String {
        match class {
            FrequencyClass::Core => format!("{}% <= strains <= 100%", percent(self.core)),
            FrequencyClass::SoftCore => format!(
                "{}% <= strains < {}%",
                percent(self.soft_core),
                percent(self.core)
            ),
            FrequencyClass::Shell => format!(
                "{}% <= strains < {}%",
                percent(self.shell),
                percent(self.soft_core)
            ),
            FrequencyClass::Cloud => format!("0% <= strains < {}%", percent(self.shell)),
        }
    }
}

/// Fraction as a percentage with at most two decimals and no trailing zeros
fn percent(fraction: f64) -> String {
    let value = (fraction * 10_000.0).round() / 100.0;
    format!("{}", value)
}

/// Number of clusters in each class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrequencyCounts {
    pub core: usize,
    pub soft_core: usize,
    pub shell: usize,
    pub cloud: usize,
}

impl FrequencyCounts {
    /// Tally presence counts against the cutoffs
    pub fn tally(
        counts: impl IntoIterator<Item = usize>,
        n_strains: usize,
        cutoffs: &FrequencyCutoffs,
    ) -> Self {
        let mut tally = Self::default();
        for count in counts {
            *tally.get_mut(cutoffs.classify(count, n_strains)) += 1;
        }
        tally
    }

    pub fn get(&self, class: FrequencyClass) -> usize {
        match class {
            FrequencyClass::Core => self.core,
            FrequencyClass::SoftCore => self.soft_core,
            FrequencyClass::Shell => self.shell,
            FrequencyClass::Cloud => self.cloud,
        }
    }

    fn get_mut(&mut self, class: FrequencyClass) -> &mut usize {
        match class {
            FrequencyClass::Core => &mut self.core,
            FrequencyClass::SoftCore => &mut self.soft_core,
            FrequencyClass::Shell => &mut self.shell,
            FrequencyClass::Cloud => &mut self.cloud,
        }
    }

    pub fn total(&self) -> usize {
        self.core + self.soft_core + self.shell + self.cloud
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cutoffs = FrequencyCutoffs::default();
        assert_eq!(cutoffs.classify(99, 100), FrequencyClass::Core);
        assert_eq!(cutoffs.classify(100, 100), FrequencyClass::Core);
        assert_eq!(cutoffs.classify(989, 1000), FrequencyClass::SoftCore);
        assert_eq!(cutoffs.classify(95, 100), FrequencyClass::SoftCore);
        assert_eq!(cutoffs.classify(15, 100), FrequencyClass::Shell);
        assert_eq!(cutoffs.classify(14, 100), FrequencyClass::Cloud);
        assert_eq!(cutoffs.classify(0, 100), FrequencyClass::Cloud);
    }

    #[test]
    fn test_small_strain_counts() {
        let cutoffs = FrequencyCutoffs::default();
        assert_eq!(cutoffs.classify(3, 3), FrequencyClass::Core);
        assert_eq!(cutoffs.classify(2, 3), FrequencyClass::Shell);
        assert_eq!(cutoffs.classify(0, 0), FrequencyClass::Cloud);
    }

    #[test]
    fn test_tally() {
        let counts = FrequencyCounts::tally(vec![4, 4, 3, 1, 0], 4, &FrequencyCutoffs::default());
        assert_eq!(counts.core, 2);
        assert_eq!(counts.shell, 2);
        assert_eq!(counts.cloud, 1);
        assert_eq!(counts.soft_core, 0);
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(FrequencyClass::Core), 2);
    }

    #[test]
    fn test_validate() {
        assert!(FrequencyCutoffs::default().validate().is_ok());
        let bad = FrequencyCutoffs {
            core: 0.9,
            soft_core: 0.95,
            shell: 0.15,
        };
        assert!(matches!(bad.validate(), Err(ParamergeError::Config { .. })));
    }

    #[test]
    fn test_describe() {
        let cutoffs = FrequencyCutoffs::default();
        assert_eq!(cutoffs.describe(FrequencyClass::Core), "99% <= strains <= 100%");
        assert_eq!(cutoffs.describe(FrequencyClass::SoftCore), "95% <= strains < 99%");
        assert_eq!(cutoffs.describe(FrequencyClass::Shell), "15% <= strains < 95%");
        assert_eq!(cutoffs.describe(FrequencyClass::Cloud), "0% <= strains < 15%");
        assert_eq!(FrequencyClass::SoftCore.to_string(), "Soft core genes");
    }
}
