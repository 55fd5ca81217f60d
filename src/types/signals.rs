use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributorLedger {
    counts: HashMap<String, u64>,
}

impl ContributorLedger {
    pub fn record(&mut self, login: &str) {
        *self.counts.entry(login.to_string()).or_insert(0) += 1;
    }

    pub fn record_many(&mut self, login: &str, commits: u64) {
        *self.counts.entry(login.to_string()).or_insert(0) += commits;
    }

    pub fn contributors(&self) -> usize {
        self.counts.len()
    }

    pub fn total_commits(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts_descending(&self) -> Vec<u64> {
        let mut counts: Vec<u64> = self.counts.values().copied().collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        counts
    }

    pub fn commits_by(&self, login: &str) -> u64 {
        self.counts.get(login).copied().unwrap_or(0)
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for ContributorLedger {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut ledger = Self::default();
        for (login, commits) in iter {
            ledger.record_many(login.as_ref(), commits);
        }
        ledger
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueLedger {
    pub open: u64,
    pub closed: u64,
    pub close_durations: Vec<f64>,
}

impl IssueLedger {
    pub fn record_open(&mut self) {
        self.open += 1;
    }

    pub fn record_closed(&mut self, days: f64) {
        self.closed += 1;
        self.close_durations.push(days);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPull {
    pub number: u64,
    pub reviewed: bool,
    pub changed_lines: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewStats {
    Unavailable,
    Collected {
        pulls: Vec<MergedPull>,
        skipped: usize,
    },
}

impl Default for ReviewStats {
    fn default() -> Self {
        Self::Collected {
            pulls: Vec::new(),
            skipped: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub optional_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .values()
            .chain(self.dev_dependencies.values())
            .chain(self.peer_dependencies.values())
            .chain(self.optional_dependencies.values())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RepositorySignals {
    pub readme: Option<String>,
    pub license: Option<String>,
    pub manifest: Option<PackageManifest>,
    pub contributors: ContributorLedger,
    pub issues: IssueLedger,
    pub reviews: ReviewStats,
}
