//! Named-case accounting for conformance runs.
//!
//! A [`Suite`] collects [`Verdict`]s under case names as the driver works
//! through a scenario, logging each as it lands, and finishes into a
//! [`RunReport`] with pass/fail/pending totals. Cases record outcomes —
//! they do not execute anything themselves, so a failed case never stops
//! the cases after it.

/// Outcome of a single named case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The assertion held.
    Passed,
    /// The assertion did not hold.
    Failed {
        /// What went wrong, e.g. a rendered shape mismatch.
        reason: String,
    },
    /// The case could not run in this environment (e.g. no live
    /// provider credentials) and counts neither way.
    Pending {
        /// Why the case was skipped.
        reason: String,
    },
}

impl Verdict {
    /// Whether the case passed.
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Build a failed verdict from any displayable reason.
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }

    /// Build a pending verdict from any displayable reason.
    pub fn pending(reason: impl std::fmt::Display) -> Self {
        Self::Pending {
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            Self::Pending { reason } => write!(f, "pending: {reason}"),
        }
    }
}

/// A recorded case: name plus verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    /// The case name, e.g. `"#voxcloud_create formats server"`.
    pub name: String,
    /// The recorded outcome.
    pub verdict: Verdict,
}

/// An in-progress conformance run.
#[derive(Debug)]
pub struct Suite {
    name: String,
    records: Vec<CaseRecord>,
}

impl Suite {
    /// Start a suite under the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::info!(suite = %name, "starting conformance suite");
        Self {
            name,
            records: Vec::new(),
        }
    }

    /// Record a case verdict, logging it as it lands.
    pub fn case(&mut self, name: impl Into<String>, verdict: Verdict) {
        let name = name.into();
        match &verdict {
            Verdict::Passed => tracing::info!(suite = %self.name, case = %name, "passed"),
            Verdict::Failed { reason } => {
                tracing::error!(suite = %self.name, case = %name, %reason, "failed")
            }
            Verdict::Pending { reason } => {
                tracing::warn!(suite = %self.name, case = %name, %reason, "pending")
            }
        }
        self.records.push(CaseRecord { name, verdict });
    }

    /// Finish the run and produce the report.
    pub fn finish(self) -> RunReport {
        let report = RunReport {
            suite: self.name,
            records: self.records,
        };
        tracing::info!(
            suite = %report.suite,
            passed = report.passed(),
            failed = report.failed(),
            pending = report.pending(),
            "conformance suite finished"
        );
        report
    }
}

/// Aggregated outcome of a conformance run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    suite: String,
    records: Vec<CaseRecord>,
}

impl RunReport {
    /// The suite name.
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// All recorded cases, in recording order.
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// Number of passed cases.
    pub fn passed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Passed))
    }

    /// Number of failed cases.
    pub fn failed(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Failed { .. }))
    }

    /// Number of pending cases.
    pub fn pending(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Pending { .. }))
    }

    /// Whether no case failed. Pending cases do not count against the
    /// run — a fully-pending suite "passes" vacuously, as it does in
    /// environments without provider access.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// The failed cases, for diagnostics.
    pub fn failures(&self) -> impl Iterator<Item = &CaseRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.verdict, Verdict::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.verdict)).count()
    }
}
