// src/pipeline/scan.rs

//! Release-tree scan pipeline.

use chrono::Utc;

use crate::error::Result;
use crate::models::{JobDescriptor, ReleaseTree, Selection};
use crate::services::{DirectoryLister, MetadataScanner};
use crate::utils::http::PageFetcher;

/// Walk the release tree and assemble the build-job list.
///
/// Targets and subtargets are visited strictly in listing order, one
/// page in flight at a time, and jobs are appended in discovery order.
/// Any listing or package page that fails to load aborts the scan;
/// emitting a silently incomplete matrix would be worse than failing
/// the run.
pub async fn run_scan(
    fetcher: &dyn PageFetcher,
    tree: &ReleaseTree,
    selection: &Selection,
) -> Result<Vec<JobDescriptor>> {
    let started = Utc::now();

    if selection.is_partial() {
        log::warn!(
            "Only one of the target/subtarget filters was given; no pair can match both dimensions"
        );
    }

    let lister = DirectoryLister::new(fetcher);
    let scanner = MetadataScanner::new(fetcher);

    let targets = lister.list(&tree.targets_url()).await?;
    log::info!(
        "Found {} targets for release {}",
        targets.len(),
        tree.version()
    );

    let mut jobs = Vec::new();

    for target in &targets {
        if !selection.includes_target(target) {
            log::debug!("Skipping target {target}");
            continue;
        }

        let subtargets = lister.list(&tree.target_url(target)).await?;
        log::info!("{target}: {} subtargets", subtargets.len());

        for subtarget in &subtargets {
            if !selection.includes_pair(target, subtarget) {
                log::debug!("Skipping {target}/{subtarget}");
                continue;
            }

            let metadata = scanner
                .scan(&tree.packages_url(target, subtarget))
                .await?;
            if metadata.vermagic.is_empty() {
                log::warn!("{target}/{subtarget}: no vermagic found in package listing");
            }

            jobs.push(JobDescriptor::new(
                tree.version(),
                target,
                subtarget,
                metadata,
            ));
        }
    }

    let elapsed = Utc::now() - started;
    log::info!(
        "Scan finished: {} jobs from {} targets in {:.1}s",
        jobs.len(),
        targets.len(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );

    Ok(jobs)
}
