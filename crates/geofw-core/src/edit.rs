// crates/geofw-core/src/edit.rs
//
// Load -> edit in memory -> validate -> commit. Every operation takes the
// context explicitly and touches exactly one file.

use std::fmt;
use std::path::PathBuf;

use crate::config::Limits;
use crate::doc::document::GeometryDocument;
use crate::doc::xs::{self, XsId};
use crate::error::{GeomError, Result};
use crate::io::commit::{commit, CommitReport};
use crate::obstruct::envelope::{repair, Classification, FixRecord};
use crate::obstruct::segment::{read_obstructions, write_obstructions};
use crate::profile::editor::{read_banks, read_profile, write_profile, ProfileEdit};
use crate::profile::profile::{BankPair, Profile};
use crate::source::{EditContext, GeometrySource};
use crate::storage::{read_storage, storage_areas};

/// What a batch does when one item fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Record the failure, keep going, commit what succeeded.
    #[default]
    Continue,
    /// Stop at the first failure; nothing is written.
    Halt,
}

#[derive(Debug)]
pub struct ItemFailure {
    pub xs: XsId,
    pub error: GeomError,
}

#[derive(Debug)]
pub struct ProfileOutcome {
    pub path: PathBuf,
    pub edit: ProfileEdit,
    /// `None` when the edit produced identical bytes.
    pub commit: Option<CommitReport>,
}

#[derive(Debug)]
pub struct RepairOutcome {
    pub path: PathBuf,
    pub records: Vec<FixRecord>,
    pub failures: Vec<ItemFailure>,
    pub commit: Option<CommitReport>,
    pub dry_run: bool,
}

impl RepairOutcome {
    pub fn count(&self, class: Classification) -> usize {
        self.records
            .iter()
            .filter(|r| r.classification == class)
            .count()
    }
}

fn commit_if_changed(
    ctx: &EditContext,
    path: &std::path::Path,
    before: &GeometryDocument,
    after: &GeometryDocument,
) -> Result<Option<CommitReport>> {
    if before.fingerprint()? == after.fingerprint()? {
        tracing::info!(path = %path.display(), "no changes, nothing written");
        return Ok(None);
    }
    let bytes = after.to_bytes()?;
    commit(path, &bytes, ctx.config.make_backup).map(Some)
}

pub fn set_profile(
    ctx: &EditContext,
    source: &GeometrySource,
    id: &XsId,
    profile: &Profile,
    bank: Option<BankPair>,
) -> Result<ProfileOutcome> {
    let path = source.resolve(&ctx.project)?;
    let doc = GeometryDocument::load(&path)?;
    let edit = write_profile(
        &doc,
        id,
        profile,
        bank,
        &ctx.config.format,
        &ctx.config.limits,
    )?;
    let commit = commit_if_changed(ctx, &path, &doc, &edit.document)?;
    Ok(ProfileOutcome { path, edit, commit })
}

/// Rewrite the profile of `id` with at most `max_points` points (capped at
/// the consumer limit).
pub fn simplify_profile(
    ctx: &EditContext,
    source: &GeometrySource,
    id: &XsId,
    max_points: usize,
) -> Result<ProfileOutcome> {
    let path = source.resolve(&ctx.project)?;
    let doc = GeometryDocument::load(&path)?;
    let limits = Limits {
        max_points: max_points.min(ctx.config.limits.max_points),
        ..ctx.config.limits
    };
    let profile = read_profile(&doc, id, &ctx.config.format)?;
    let edit = write_profile(&doc, id, &profile, None, &ctx.config.format, &limits)?;
    let commit = commit_if_changed(ctx, &path, &doc, &edit.document)?;
    Ok(ProfileOutcome { path, edit, commit })
}

/// Repair the obstruction envelope of one cross section (`only`) or of all.
pub fn repair_obstructions(
    ctx: &EditContext,
    source: &GeometrySource,
    only: Option<&XsId>,
    batch: BatchPolicy,
    dry_run: bool,
) -> Result<RepairOutcome> {
    let path = source.resolve(&ctx.project)?;
    let doc = GeometryDocument::load(&path)?;

    let targets: Vec<XsId> = match only {
        Some(id) => vec![xs::find(&doc, id)?.id],
        None => xs::cross_sections(&doc)?.into_iter().map(|n| n.id).collect(),
    };

    let mut work = doc.clone();
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for id in targets {
        match repair_one(ctx, &work, &id) {
            Ok(Some((record, next))) => {
                if record.changed() {
                    work = next;
                }
                records.push(record);
            }
            Ok(None) => {}
            Err(error) => match batch {
                BatchPolicy::Halt => return Err(error),
                BatchPolicy::Continue => {
                    tracing::warn!(xs = %id, %error, "obstruction repair failed");
                    failures.push(ItemFailure { xs: id, error });
                }
            },
        }
    }

    let commit = if dry_run {
        None
    } else {
        commit_if_changed(ctx, &path, &doc, &work)?
    };
    tracing::info!(
        path = %path.display(),
        records = records.len(),
        failures = failures.len(),
        dry_run,
        "obstruction repair finished"
    );
    Ok(RepairOutcome {
        path,
        records,
        failures,
        commit,
        dry_run,
    })
}

fn repair_one(
    ctx: &EditContext,
    doc: &GeometryDocument,
    id: &XsId,
) -> Result<Option<(FixRecord, GeometryDocument)>> {
    let format = &ctx.config.format;
    let Some(original) = read_obstructions(doc, id, format)? else {
        return Ok(None);
    };
    let fixed = repair(&original, ctx.config.overlap_policy, ctx.config.limits.min_gap)
        .map_err(|e| e.within(id))?;
    let next = if fixed.classification == Classification::Unchanged {
        doc.clone()
    } else {
        write_obstructions(doc, id, &fixed.envelope, format)?
    };
    Ok(Some((FixRecord::new(id.clone(), original, fixed), next)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Finding {
    pub subject: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
        };
        write!(f, "{tag}: {}: {}", self.subject, self.message)
    }
}

/// Run every check without writing anything.
pub fn check(ctx: &EditContext, source: &GeometrySource) -> Result<Vec<Finding>> {
    let path = source.resolve(&ctx.project)?;
    let doc = GeometryDocument::load(&path)?;
    let format = &ctx.config.format;
    let limits = &ctx.config.limits;
    let mut findings = Vec::new();

    let mut push = |subject: String, severity: Severity, message: String| {
        findings.push(Finding {
            subject,
            severity,
            message,
        })
    };

    for node in xs::cross_sections(&doc)? {
        let id = node.id;
        let subject = id.to_string();

        match read_profile(&doc, &id, format) {
            Ok(profile) => {
                if profile.len() > limits.max_points {
                    push(
                        subject.clone(),
                        Severity::Error,
                        format!("{} points exceed the limit of {}", profile.len(), limits.max_points),
                    );
                }
                match read_banks(&doc, &id) {
                    Ok(Some(bank)) => {
                        if let Err(e) = bank.check_within(&profile) {
                            push(subject.clone(), Severity::Error, e.to_string());
                        }
                        for s in [bank.left, bank.right] {
                            if !profile.contains_station(s) {
                                push(
                                    subject.clone(),
                                    Severity::Warning,
                                    format!("bank station {s} is not a profile point"),
                                );
                            }
                        }
                    }
                    Ok(None) => {}
                    Err(e) => push(subject.clone(), Severity::Error, e.to_string()),
                }
            }
            Err(GeomError::NotFound(_)) => {}
            Err(e) => push(subject.clone(), Severity::Error, e.to_string()),
        }

        match read_obstructions(&doc, &id, format) {
            Ok(Some(segments)) => match repair(&segments, ctx.config.overlap_policy, limits.min_gap) {
                Ok(r) if r.classification != Classification::Unchanged => push(
                    subject.clone(),
                    Severity::Error,
                    format!("obstructions need repair ({})", r.classification),
                ),
                Ok(_) => {}
                Err(e) => push(subject.clone(), Severity::Error, e.to_string()),
            },
            Ok(None) => {}
            Err(e) => push(subject.clone(), Severity::Error, e.to_string()),
        }
    }

    for name in storage_areas(&doc) {
        if let Err(e) = read_storage(&doc, &name, format) {
            push(format!("storage area {name}"), Severity::Error, e.to_string());
        }
    }

    tracing::info!(path = %path.display(), findings = findings.len(), "check finished");
    Ok(findings)
}
