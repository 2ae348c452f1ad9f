//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, Subcommand};
use coursetrack_client::{AuthContext, DEFAULT_MAX_CONCURRENT_COURSES};
use coursetrack_core::Viewer;

#[derive(Debug, Parser)]
#[command(name = "coursetrack", version, about = "Assignment, quiz and calendar overview for your courses")]
pub struct Cli {
    /// Backend base URL, e.g. https://lms.example.org
    #[arg(long, env = "COURSETRACK_URL")]
    pub base_url: String,

    /// Session token sent as a bearer credential.
    #[arg(long, env = "COURSETRACK_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Whose view to build: student or teacher.
    #[arg(long, env = "COURSETRACK_ROLE", default_value_t = Viewer::Student)]
    pub role: Viewer,

    /// Per-request timeout in seconds.
    #[arg(long, env = "COURSETRACK_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Maximum number of courses fetched at once.
    #[arg(long, env = "COURSETRACK_MAX_CONCURRENT", default_value_t = DEFAULT_MAX_CONCURRENT_COURSES)]
    pub max_concurrent: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every assignment and quiz with its current status.
    Status,
    /// Show a month of lessons and quizzes.
    Calendar {
        /// Year to show; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
        /// Month to show, 1-12; defaults to the current month.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

impl Cli {
    pub fn auth(&self) -> AuthContext {
        AuthContext::new(self.token.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
