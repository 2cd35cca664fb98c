// src/orchestrator.rs

use futures::future::{BoxFuture, FutureExt};
use std::{any::Any, panic::AssertUnwindSafe, time::Duration};
use tokio::{task::JoinSet, time::Instant};
use tracing::{error, info, warn};

/// An independent scraping unit: a name plus the work to run.
pub struct Unit {
    pub name: String,
    pub fut: BoxFuture<'static, anyhow::Result<()>>,
}

impl Unit {
    pub fn new<F>(name: &str, fut: F) -> Self
    where
        F: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.to_string(),
            fut: fut.boxed(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Completed,
    Failed(String),
    Panicked(String),
}

#[derive(Debug, Clone)]
pub struct UnitReport {
    pub name: String,
    pub outcome: UnitOutcome,
    pub elapsed: Duration,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Spawn every unit at once, wait for all of them, and report each in input order.
/// A failing or panicking unit never affects the others.
pub async fn run(units: Vec<Unit>) -> Vec<UnitReport> {
    let names: Vec<String> = units.iter().map(|u| u.name.clone()).collect();
    let mut set = JoinSet::new();

    for (idx, unit) in units.into_iter().enumerate() {
        info!(unit = %unit.name, "starting unit");
        let fut = unit.fut;
        set.spawn(async move {
            let start = Instant::now();
            let outcome = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(())) => UnitOutcome::Completed,
                Ok(Err(e)) => UnitOutcome::Failed(format!("{:#}", e)),
                Err(payload) => UnitOutcome::Panicked(panic_message(payload)),
            };
            (idx, outcome, start.elapsed())
        });
    }

    let mut slots: Vec<Option<UnitReport>> = vec![None; names.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((idx, outcome, elapsed)) => {
                slots[idx] = Some(UnitReport {
                    name: names[idx].clone(),
                    outcome,
                    elapsed,
                });
            }
            // Panics are caught inside the task, so only a runtime shutdown lands here.
            Err(e) => error!(error = %e, "unit task did not finish"),
        }
    }

    let reports: Vec<UnitReport> = slots
        .into_iter()
        .zip(names)
        .map(|(slot, name)| {
            slot.unwrap_or(UnitReport {
                name,
                outcome: UnitOutcome::Panicked("task aborted".to_string()),
                elapsed: Duration::ZERO,
            })
        })
        .collect();

    for r in &reports {
        match &r.outcome {
            UnitOutcome::Completed => info!(unit = %r.name, elapsed = ?r.elapsed, "unit completed"),
            UnitOutcome::Failed(msg) => warn!(unit = %r.name, elapsed = ?r.elapsed, error = %msg, "unit failed"),
            UnitOutcome::Panicked(msg) => error!(unit = %r.name, elapsed = ?r.elapsed, panic = %msg, "unit panicked"),
        }
    }
    let done = reports
        .iter()
        .filter(|r| r.outcome == UnitOutcome::Completed)
        .count();
    info!("{}/{} units completed", done, reports.len());
    reports
}
