use crate::aggregate;
use crate::collect::checkout::{CheckoutProvider, GitCheckout};
use crate::collect::Collector;
use crate::error::{Result, ScoreError};
use crate::http::{HttpClient, UreqTransport};
use crate::locate;
use crate::metrics;
use crate::types::config::RepotrustConfig;
use crate::types::scoring::{RepoDataResult, RunClock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    ResolveUrl,
    CollectSignals,
    ComputeMetrics,
    Aggregate,
    Done,
    Failed,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ResolveUrl => "resolve_url",
            Self::CollectSignals => "collect_signals",
            Self::ComputeMetrics => "compute_metrics",
            Self::Aggregate => "aggregate",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Self::Start => Some(Self::ResolveUrl),
            Self::ResolveUrl => Some(Self::CollectSignals),
            Self::CollectSignals => Some(Self::ComputeMetrics),
            Self::ComputeMetrics => Some(Self::Aggregate),
            Self::Aggregate => Some(Self::Done),
            Self::Done | Self::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug)]
pub(crate) struct StageTracker<'a> {
    url: &'a str,
    history: Vec<Stage>,
}

impl<'a> StageTracker<'a> {
    pub(crate) fn new(url: &'a str) -> Self {
        Self {
            url,
            history: vec![Stage::Start],
        }
    }

    pub(crate) fn current(&self) -> Stage {
        self.history.last().copied().unwrap_or(Stage::Start)
    }

    pub(crate) fn advance(&mut self) -> Stage {
        let from = self.current();
        if let Some(to) = from.next() {
            debug!(url = self.url, from = %from, to = %to, "stage transition");
            self.history.push(to);
        }
        self.current()
    }

    pub(crate) fn fail(&mut self, err: &ScoreError) {
        let from = self.current();
        if from.is_terminal() {
            return;
        }
        warn!(url = self.url, stage = %from, error = %err, "scoring failed");
        self.history.push(Stage::Failed);
    }

    #[cfg(test)]
    pub(crate) fn history(&self) -> &[Stage] {
        &self.history
    }
}

pub struct Scorer {
    collector: Collector,
    checkout: Box<dyn CheckoutProvider>,
}

impl Scorer {
    pub fn new(collector: Collector, checkout: Box<dyn CheckoutProvider>) -> Self {
        Self {
            collector,
            checkout,
        }
    }

    pub fn from_config(config: &RepotrustConfig) -> Self {
        let collector_config = config.collector();
        let transport = Arc::new(UreqTransport::new(config.http_timeout()));
        let client = HttpClient::new(
            transport,
            config.retry_policy(),
            collector_config.token.clone(),
        );
        let checkout = GitCheckout::new(config.checkout_directory());
        Self::new(Collector::new(collector_config, client), Box::new(checkout))
    }

    /// Scores `url`, or `None` when no result could be produced. The cause
    /// is logged.
    pub fn score(&self, url: &str) -> Option<RepoDataResult> {
        self.try_score(url).ok()
    }

    pub fn try_score(&self, url: &str) -> Result<RepoDataResult> {
        let clock = RunClock::start();
        let mut tracker = StageTracker::new(url);
        let outcome = self.run_stages(url, &clock, &mut tracker);
        match &outcome {
            Ok(result) => {
                tracker.advance();
                info!(
                    url,
                    net_score = result.net_score,
                    admissible = result.is_admissible(),
                    elapsed_ms = clock.elapsed().as_millis() as u64,
                    "scored repository"
                );
            }
            Err(err) => tracker.fail(err),
        }
        outcome
    }

    fn run_stages(
        &self,
        url: &str,
        clock: &RunClock,
        tracker: &mut StageTracker<'_>,
    ) -> Result<RepoDataResult> {
        tracker.advance();
        let repo = locate::resolve_package_url(
            self.collector.client(),
            &self.collector.config().npm_url,
            url,
        )?;

        tracker.advance();
        let signals = self.collector.collect(&repo, self.checkout.as_ref())?;

        tracker.advance();
        let metrics = metrics::compute_metrics(&signals)?;

        tracker.advance();
        Ok(aggregate::aggregate(url, &metrics, clock))
    }
}
