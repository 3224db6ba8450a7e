//! repo-privatizer - set an account's public GitHub repositories to private
//!
//! Lists every repository owned by an account, drops forks and anything named
//! in the local exclusion file, and issues one visibility update per remaining
//! repository, reporting progress and a final tally.
//!
//! ## Modules
//!
//! - [`config`]: Configuration management and parsing
//! - [`exclude`]: Exclusion file loading and matching
//! - [`github`]: GitHub API integration
//! - [`privatize`]: Filter-and-update pipeline

pub mod config;
pub mod exclude;
pub mod github;
pub mod privatize;

pub use config::Config;
pub use exclude::ExclusionList;
pub use github::{GitHubClient, Repository};
pub use privatize::{Decision, PrivatizeSummary, Privatizer, RepoOutcome};
