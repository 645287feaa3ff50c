//! Partitions physician records into directory documents.
//!
//! Exclusions run first, then the configured groups in order, then one
//! document per remaining specialty. A specialty label is claimed by the
//! first group that resolves it, so no record is rendered twice.

use crate::config::toml_config::{DirectoryConfig, GroupConfig};
use crate::domain::model::{
    sanitize_file_stem, DirectoryDocument, DirectoryPlan, DirectorySection, PhysicianRecord, SectionMode,
};
use std::collections::HashSet;

pub fn plan_documents(records: &[PhysicianRecord], config: &DirectoryConfig) -> DirectoryPlan {
    let mut plan = DirectoryPlan::default();
    let filters = &config.filters;

    let mut eligible: Vec<&PhysicianRecord> = Vec::with_capacity(records.len());
    for record in records {
        if filters.excluded_titles.iter().any(|t| t == &record.title) {
            plan.dropped_by_title += 1;
        } else if filters.excluded_specialties.iter().any(|s| s == &record.specialty) {
            plan.dropped_by_specialty += 1;
        } else if record.specialty.trim().is_empty() {
            tracing::warn!(
                "🔶 Skipping {}, {}: no specialty",
                record.last_name,
                record.first_name
            );
            plan.dropped_blank_specialty += 1;
        } else {
            eligible.push(record);
        }
    }

    tracing::debug!(
        "{} eligible records ({} excluded by title, {} by specialty, {} blank)",
        eligible.len(),
        plan.dropped_by_title,
        plan.dropped_by_specialty,
        plan.dropped_blank_specialty
    );

    let mut claimed: HashSet<&str> = HashSet::new();

    for group in &config.groups {
        let prefix = group.prefix.as_deref().filter(|p| !p.is_empty());
        let candidates: Vec<&str> = match prefix {
            Some(prefix) => distinct_specialties(&eligible)
                .into_iter()
                .filter(|s| s.starts_with(prefix))
                .collect(),
            None => group.specialties.iter().map(String::as_str).collect(),
        };

        let had_candidates = !candidates.is_empty();
        let labels: Vec<&str> = candidates.into_iter().filter(|l| claimed.insert(*l)).collect();

        if labels.is_empty() {
            if had_candidates {
                tracing::warn!("🔶 Group '{}' has no unclaimed specialties, skipping", group.title);
            } else {
                tracing::debug!("Group '{}' matched no specialties, skipping", group.title);
            }
            continue;
        }

        let document = group_document(group, &labels, &eligible, config);
        if document.record_count() == 0 {
            tracing::warn!("🔶 Group '{}' matched no physicians", group.title);
        }
        plan.documents.push(document);
    }

    for specialty in distinct_specialties(&eligible) {
        if !claimed.insert(specialty) {
            continue;
        }
        plan.documents.push(DirectoryDocument {
            title: format!("{}{}", config.output.title_prefix, specialty),
            file_stem: sanitize_file_stem(specialty),
            sections: vec![DirectorySection {
                heading: specialty.to_string(),
                records: matching(&eligible, &[specialty]),
            }],
        });
    }

    disambiguate_file_stems(&mut plan.documents);
    plan
}

/// 清理後檔名相同（不分大小寫）時加上編號，避免後寫入的文件覆蓋前一個
fn disambiguate_file_stems(documents: &mut [DirectoryDocument]) {
    let mut taken: HashSet<String> = HashSet::new();

    for document in documents.iter_mut() {
        if taken.insert(document.file_stem.to_lowercase()) {
            continue;
        }

        let base = document.file_stem.clone();
        let mut n = 2;
        let stem = loop {
            let candidate = format!("{} ({})", base, n);
            if taken.insert(candidate.to_lowercase()) {
                break candidate;
            }
            n += 1;
        };

        tracing::warn!(
            "🔶 '{}' would overwrite {}.docx, writing {}.docx instead",
            document.title,
            base,
            stem
        );
        document.file_stem = stem;
    }
}

fn group_document(
    group: &GroupConfig,
    labels: &[&str],
    eligible: &[&PhysicianRecord],
    config: &DirectoryConfig,
) -> DirectoryDocument {
    let sections = match group.section_mode() {
        SectionMode::Combined => {
            let heading = group.heading.clone().unwrap_or_else(|| {
                group
                    .title
                    .strip_prefix(config.output.title_prefix.as_str())
                    .unwrap_or(&group.title)
                    .to_string()
            });
            vec![DirectorySection {
                heading,
                records: matching(eligible, labels),
            }]
        }
        SectionMode::PerSpecialty => labels
            .iter()
            .map(|label| DirectorySection {
                heading: label.to_string(),
                records: matching(eligible, &[*label]),
            })
            .collect(),
    };

    DirectoryDocument {
        title: group.title.clone(),
        file_stem: sanitize_file_stem(&group.title),
        sections,
    }
}

/// Records whose specialty equals one of `labels`, in input order.
fn matching(eligible: &[&PhysicianRecord], labels: &[&str]) -> Vec<PhysicianRecord> {
    eligible
        .iter()
        .filter(|r| labels.contains(&r.specialty.as_str()))
        .map(|r| (*r).clone())
        .collect()
}

/// 依首次出現順序去重
fn distinct_specialties<'a>(eligible: &[&'a PhysicianRecord]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    eligible
        .iter()
        .map(|r| r.specialty.as_str())
        .filter(|s| seen.insert(*s))
        .collect()
}
