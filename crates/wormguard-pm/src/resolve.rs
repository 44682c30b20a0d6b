use crate::command::DependencyLister;
use crate::extract::{collect_versions, extract_json};
use camino::Utf8Path;
use std::collections::BTreeSet;
use wormguard_domain::model::InstalledVersionMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchStatus {
    /// The batch ran; `recorded` names were new to the map.
    Ok { recorded: usize },
    /// The batch contributed nothing.
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    pub size: usize,
    pub status: BatchStatus,
}

/// Installed versions for one project plus per-batch bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub installed: InstalledVersionMap,
    pub batches: Vec<BatchOutcome>,
}

impl Resolution {
    pub fn failed_batches(&self) -> u32 {
        let failed = self
            .batches
            .iter()
            .filter(|b| matches!(b.status, BatchStatus::Failed { .. }))
            .count();
        u32::try_from(failed).unwrap_or(u32::MAX)
    }
}

/// Split `names` into consecutive batches of at most `batch_size` (minimum 1).
pub fn partition(names: &[String], batch_size: usize) -> std::slice::Chunks<'_, String> {
    names.chunks(batch_size.max(1))
}

/// Ask the package manager which of `names` are installed in `project`.
///
/// Batches run in order. A batch whose invocation or output fails is recorded as
/// [`BatchStatus::Failed`] and the remaining batches still run; this function never fails.
pub fn resolve_installed<L>(
    lister: &L,
    project: &Utf8Path,
    names: &[String],
    batch_size: usize,
) -> Resolution
where
    L: DependencyLister + ?Sized,
{
    let mut resolution = Resolution::default();

    for (index, batch) in partition(names, batch_size).enumerate() {
        tracing::debug!(project = %project, batch = index, size = batch.len(), "listing batch");
        let status = match run_batch(lister, project, batch, &mut resolution.installed) {
            Ok(recorded) => BatchStatus::Ok { recorded },
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(
                    project = %project,
                    batch = index,
                    reason = %reason,
                    "dependency batch failed"
                );
                BatchStatus::Failed { reason }
            }
        };
        resolution.batches.push(BatchOutcome {
            size: batch.len(),
            status,
        });
    }

    resolution
}

fn run_batch<L>(
    lister: &L,
    project: &Utf8Path,
    batch: &[String],
    installed: &mut InstalledVersionMap,
) -> anyhow::Result<usize>
where
    L: DependencyLister + ?Sized,
{
    let output = lister.list(project, batch)?;
    let doc = extract_json(&output)?;
    let wanted: BTreeSet<&str> = batch.iter().map(String::as_str).collect();
    Ok(collect_versions(&doc, &wanted, installed))
}
