use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

use crate::db;

/// Per-pass line accounting for one run.
pub struct PassTracker {
    run_id: String,
    metrics: Vec<PassMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassMetric {
    pub pass_name: String,
    pub entities: usize,
    pub before: usize,
    pub after: usize,
}

impl PassTracker {
    pub fn new(run_id: String) -> Self {
        PassTracker {
            run_id,
            metrics: Vec::new(),
        }
    }

    pub fn record(&mut self, pass_name: &str, entities: usize, before: usize, after: usize) {
        info!(
            pass = pass_name,
            entities,
            before,
            after,
            consumed = before.saturating_sub(after),
            "pass finished"
        );
        self.metrics.push(PassMetric {
            pass_name: pass_name.to_string(),
            entities,
            before,
            after,
        });
    }

    pub fn persist(&self, conn: &Connection) -> Result<()> {
        for metric in &self.metrics {
            db::insert_pass_metric(conn, &self.run_id, metric)?;
        }
        Ok(())
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn metrics(&self) -> &[PassMetric] {
        &self.metrics
    }
}

pub fn new_run_id() -> String {
    format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S%3f"))
}
