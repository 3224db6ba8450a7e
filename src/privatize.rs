//! Privatize Engine - filters an account's repositories and flips them to private
//!
//! Repositories are handled strictly one at a time in listing order. Forks and
//! excluded names are skipped, dry runs only report, and every other
//! repository gets exactly one update call whose outcome is recorded.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::exclude::ExclusionList;
use crate::github::{GitHubClient, Repository};

/// What the filter pipeline decided for one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    SkipFork,
    SkipExcluded,
    Privatize,
}

/// Result of handling a single repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Update call returned 200
    Privatized { full_name: String },
    /// Update call returned something other than 200
    Failed { full_name: String, status: StatusCode },
    /// Eligible, but left untouched because of dry-run mode
    WouldPrivatize { full_name: String },
    SkippedFork { full_name: String },
    SkippedExcluded { full_name: String },
}

/// Tally of a complete run
#[derive(Debug, Clone, Default)]
pub struct PrivatizeSummary {
    pub total_repositories: usize,
    pub privatized: usize,
    pub failed: usize,
    pub planned: usize,
    pub skipped_forks: usize,
    pub skipped_excluded: usize,
    pub duration: Duration,
    pub results: Vec<RepoOutcome>,
}

impl PrivatizeSummary {
    fn record(&mut self, outcome: RepoOutcome) {
        match &outcome {
            RepoOutcome::Privatized { .. } => self.privatized += 1,
            RepoOutcome::Failed { .. } => self.failed += 1,
            RepoOutcome::WouldPrivatize { .. } => self.planned += 1,
            RepoOutcome::SkippedFork { .. } => self.skipped_forks += 1,
            RepoOutcome::SkippedExcluded { .. } => self.skipped_excluded += 1,
        }
        self.results.push(outcome);
    }

    /// Repositories whose update call did not succeed
    pub fn failures(&self) -> impl Iterator<Item = &RepoOutcome> {
        self.results
            .iter()
            .filter(|outcome| matches!(outcome, RepoOutcome::Failed { .. }))
    }
}

/// Drives the fetch, filter and update pipeline for one account
pub struct Privatizer {
    client: GitHubClient,
    exclusions: ExclusionList,
    dry_run: bool,
}

impl Privatizer {
    pub fn new(client: GitHubClient, exclusions: ExclusionList, dry_run: bool) -> Self {
        Self {
            client,
            exclusions,
            dry_run,
        }
    }

    /// Filter decision for a repository. Forks are checked before exclusions.
    pub fn decide(&self, repository: &Repository) -> Decision {
        if repository.fork {
            Decision::SkipFork
        } else if self.exclusions.contains(&repository.full_name) {
            Decision::SkipExcluded
        } else {
            Decision::Privatize
        }
    }

    /// Run the whole pipeline for `username`, writing the progress report to `out`.
    ///
    /// Elapsed time is measured from just before the listing call. A transport
    /// error on any call aborts the run; a non-200 update response does not.
    pub async fn run<W: Write>(&self, username: &str, out: &mut W) -> Result<PrivatizeSummary> {
        let start_time = Instant::now();

        let repositories = self
            .client
            .list_user_repositories(username)
            .await
            .with_context(|| format!("Failed to list repositories for {}", username))?;

        if self.dry_run {
            writeln!(out, "Dry run.")?;
        }

        let mut summary = PrivatizeSummary {
            total_repositories: repositories.len(),
            ..Default::default()
        };

        for repository in &repositories {
            let outcome = self.process(repository, out).await?;
            summary.record(outcome);
        }

        summary.duration = start_time.elapsed();

        writeln!(
            out,
            "Privatized {} repositories in {} ms.",
            summary.privatized,
            summary.duration.as_millis()
        )?;
        if summary.failed > 0 {
            writeln!(out, "Failed to privatize {} repositories.", summary.failed)?;
        }

        info!(
            "Run completed in {:.2}s: {} privatized, {} failed, {} planned, {} forks, {} excluded",
            summary.duration.as_secs_f64(),
            summary.privatized,
            summary.failed,
            summary.planned,
            summary.skipped_forks,
            summary.skipped_excluded
        );

        Ok(summary)
    }

    async fn process<W: Write>(&self, repository: &Repository, out: &mut W) -> Result<RepoOutcome> {
        let full_name = repository.full_name.clone();

        match self.decide(repository) {
            Decision::SkipFork => {
                debug!("Skipping fork: {}", full_name);
                Ok(RepoOutcome::SkippedFork { full_name })
            }
            Decision::SkipExcluded => {
                debug!("Skipping excluded repository: {}", full_name);
                Ok(RepoOutcome::SkippedExcluded { full_name })
            }
            Decision::Privatize if self.dry_run => {
                writeln!(out, "{} would be set to private", full_name)?;
                Ok(RepoOutcome::WouldPrivatize { full_name })
            }
            Decision::Privatize => {
                let status = self.client.set_private(repository).await?;

                if status == StatusCode::OK {
                    writeln!(out, "{} is now private", full_name)?;
                    Ok(RepoOutcome::Privatized { full_name })
                } else {
                    warn!("Update of {} returned {}", full_name, status);
                    writeln!(
                        out,
                        "{} could not be set to private (HTTP {})",
                        full_name,
                        status.as_u16()
                    )?;
                    Ok(RepoOutcome::Failed { full_name, status })
                }
            }
        }
    }
}
