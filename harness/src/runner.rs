//! Harness runner: search a world and package the run as a digest-addressed
//! bundle.
//!
//! A [`RunBundle`] carries the canonical policy and report bytes, each with
//! its own content hash, plus a bundle digest over a small basis document
//! that binds the world, the path and both artifact hashes. Wall-clock time
//! never enters any hashed bytes, so two runs that expand the same nodes
//! produce the same bundle digest.

use ara_search::digest::{
    canonical_hash, canonical_json_bytes, float_json, ContentHash, DOMAIN_SEARCH_POLICY,
    DOMAIN_SEARCH_REPORT,
};
use ara_search::{SearchError, SearchPolicy, SearchResult, TerminationReason};
use tracing::info;

use crate::contract::{search_world, SearchWorld};

/// Domain prefix for the bundle digest.
pub const DOMAIN_RUN_BUNDLE: &[u8] = b"ARA::RUN_BUNDLE::V1\0";

/// Error during a harness run.
#[derive(Debug, thiserror::Error)]
pub enum RunError<E> {
    /// The engine failed.
    #[error(transparent)]
    Search(#[from] SearchError<E>),
    /// Canonical JSON serialization failed.
    #[error("canonical JSON serialization failed: {0}")]
    Canon(#[from] serde_json::Error),
}

/// Bundle integrity failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BundleVerifyError {
    #[error("{artifact} digest mismatch: declared {declared}, computed {computed}")]
    DigestMismatch {
        artifact: &'static str,
        declared: String,
        computed: String,
    },
    #[error("canonical JSON serialization failed: {detail}")]
    Canon { detail: String },
}

/// Outcome of one harness run.
#[derive(Debug, Clone)]
pub struct RunBundle {
    pub world_id: String,
    /// Canonical keys of the path nodes, start first. Empty if no path.
    pub path_keys: Vec<String>,
    pub cost: f64,
    pub termination: TerminationReason,
    pub final_bound: f64,
    /// Canonical JSON of the policy.
    pub policy_json: Vec<u8>,
    pub policy_digest: ContentHash,
    /// Canonical JSON of the search report.
    pub report_json: Vec<u8>,
    pub report_digest: ContentHash,
    /// Canonical JSON the bundle digest is computed over.
    pub digest_basis: Vec<u8>,
    pub digest: ContentHash,
}

impl RunBundle {
    /// Recompute every digest and compare with the declared values.
    ///
    /// # Errors
    ///
    /// Returns [`BundleVerifyError::DigestMismatch`] for the first artifact
    /// whose content no longer matches its hash.
    pub fn verify(&self) -> Result<(), BundleVerifyError> {
        check(
            "policy",
            &self.policy_digest,
            &canonical_hash(DOMAIN_SEARCH_POLICY, &self.policy_json),
        )?;
        check(
            "report",
            &self.report_digest,
            &canonical_hash(DOMAIN_SEARCH_REPORT, &self.report_json),
        )?;
        let basis = digest_basis(
            &self.world_id,
            &self.path_keys,
            self.cost,
            self.termination,
            &self.policy_digest,
            &self.report_digest,
        )
        .map_err(|e| BundleVerifyError::Canon {
            detail: e.to_string(),
        })?;
        check(
            "basis",
            &canonical_hash(DOMAIN_RUN_BUNDLE, &self.digest_basis),
            &canonical_hash(DOMAIN_RUN_BUNDLE, &basis),
        )?;
        check(
            "bundle",
            &self.digest,
            &canonical_hash(DOMAIN_RUN_BUNDLE, &self.digest_basis),
        )
    }
}

fn check(
    artifact: &'static str,
    declared: &ContentHash,
    computed: &ContentHash,
) -> Result<(), BundleVerifyError> {
    if declared == computed {
        Ok(())
    } else {
        Err(BundleVerifyError::DigestMismatch {
            artifact,
            declared: declared.as_str().to_string(),
            computed: computed.as_str().to_string(),
        })
    }
}

fn digest_basis(
    world_id: &str,
    path_keys: &[String],
    cost: f64,
    termination: TerminationReason,
    policy_digest: &ContentHash,
    report_digest: &ContentHash,
) -> Result<Vec<u8>, serde_json::Error> {
    canonical_json_bytes(&serde_json::json!({
        "cost": float_json(cost),
        "path": path_keys,
        "policy_digest": policy_digest.as_str(),
        "report_digest": report_digest.as_str(),
        "termination": termination.as_str(),
        "world_id": world_id,
    }))
}

/// Search `world` under `policy` and package the result.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the engine fails and [`RunError::Canon`]
/// if an artifact cannot be serialized.
pub fn run_world<W: SearchWorld>(
    world: &W,
    policy: &SearchPolicy,
) -> Result<RunBundle, RunError<W::Error>> {
    let outcome = search_world(world, policy)?;
    let SearchResult { path, cost } = outcome.result;
    let report = outcome.report;

    let path_keys: Vec<String> = path.iter().map(|node| world.key_of(node)).collect();

    let policy_json = canonical_json_bytes(&policy.to_json())?;
    let policy_digest = canonical_hash(DOMAIN_SEARCH_POLICY, &policy_json);
    let report_json = report.to_canonical_json_bytes()?;
    let report_digest = canonical_hash(DOMAIN_SEARCH_REPORT, &report_json);

    let basis = digest_basis(
        world.world_id(),
        &path_keys,
        cost,
        report.termination,
        &policy_digest,
        &report_digest,
    )?;
    let digest = canonical_hash(DOMAIN_RUN_BUNDLE, &basis);

    info!(
        event = "run_complete",
        world_id = world.world_id(),
        termination = report.termination.as_str(),
        cost,
        path_len = path_keys.len(),
        digest = %digest,
    );

    Ok(RunBundle {
        world_id: world.world_id().to_string(),
        path_keys,
        cost,
        termination: report.termination,
        final_bound: report.final_bound,
        policy_json,
        policy_digest,
        report_json,
        report_digest,
        digest_basis: basis,
        digest,
    })
}
