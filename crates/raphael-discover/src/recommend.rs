//! Related-project suggestions.
//!
//! Every other project in the catalog is scored against a reference project
//! with four additive rules:
//!
//! ```text
//! shares >= 1 sector      +sector_match (+extra_sector per additional shared sector)
//! same status             +same_status
//! candidate is featured   +featured
//! ```
//!
//! Candidates are ranked by score, highest first; ties keep catalog order.
//! Zero-score candidates are not dropped, so a short list is padded with the
//! first unrelated projects in catalog order.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::{debug, instrument};

use raphael_core::Project;
use raphael_core::config::RelatedConfig;

/// Suggestion count used when the caller has no preference.
pub const DEFAULT_LIMIT: usize = 3;

/// Points awarded by each scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Awarded once when at least one sector is shared.
    pub sector_match: u32,
    /// Awarded for each shared sector beyond the first.
    pub extra_sector: u32,
    pub same_status: u32,
    pub featured: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sector_match: 100,
            extra_sector: 20,
            same_status: 50,
            featured: 10,
        }
    }
}

impl From<&RelatedConfig> for ScoreWeights {
    fn from(config: &RelatedConfig) -> Self {
        Self {
            sector_match: config.sector_match,
            extra_sector: config.extra_sector,
            same_status: config.same_status,
            featured: config.featured,
        }
    }
}

/// A candidate's total and the facts that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub total: u32,
    pub shared_sectors: usize,
    pub same_status: bool,
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion<'a> {
    pub project: &'a Project,
    pub score: Score,
}

/// Number of distinct sector names carried by both projects.
#[must_use]
pub fn shared_sectors(reference: &Project, candidate: &Project) -> usize {
    let wanted: HashSet<&str> = reference.sector_names().collect();
    let mut seen = HashSet::new();
    candidate
        .sector_names()
        .filter(|name| wanted.contains(name) && seen.insert(*name))
        .count()
}

#[must_use]
pub fn score(reference: &Project, candidate: &Project, weights: &ScoreWeights) -> Score {
    let shared = shared_sectors(reference, candidate);
    let same_status = reference.status == candidate.status;

    let mut total = 0u32;
    if shared > 0 {
        let extra = u32::try_from(shared - 1).unwrap_or(u32::MAX);
        total = total
            .saturating_add(weights.sector_match)
            .saturating_add(weights.extra_sector.saturating_mul(extra));
    }
    if same_status {
        total = total.saturating_add(weights.same_status);
    }
    if candidate.featured {
        total = total.saturating_add(weights.featured);
    }

    Score {
        total,
        shared_sectors: shared,
        same_status,
        featured: candidate.featured,
    }
}

/// Score every candidate except the reference itself and keep the best
/// `limit`.
///
/// Identity is the slug, so a duplicate of the reference with a different
/// document id is still excluded.
#[instrument(skip_all, fields(reference = %reference.slug, candidates = catalog.len(), limit = limit))]
#[must_use]
pub fn rank<'a>(
    reference: &Project,
    catalog: &'a [Project],
    weights: &ScoreWeights,
    limit: usize,
) -> Vec<Suggestion<'a>> {
    let mut ranked: Vec<Suggestion<'a>> = catalog
        .iter()
        .filter(|candidate| !candidate.same_identity(reference))
        .map(|candidate| Suggestion {
            project: candidate,
            score: score(reference, candidate, weights),
        })
        .collect();

    // sort_by_key is stable: equal totals stay in catalog order.
    ranked.sort_by_key(|suggestion| Reverse(suggestion.score.total));
    ranked.truncate(limit);

    debug!(
        returned = ranked.len(),
        top = ranked.first().map_or(0, |s| s.score.total),
        "ranked related projects"
    );
    ranked
}

/// Related projects for `reference` under the default weights.
#[must_use]
pub fn suggest<'a>(reference: &Project, catalog: &'a [Project], limit: usize) -> Vec<&'a Project> {
    rank(reference, catalog, &ScoreWeights::default(), limit)
        .into_iter()
        .map(|suggestion| suggestion.project)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use raphael_core::Status;

    fn slugs(projects: &[&Project]) -> Vec<String> {
        projects.iter().map(|p| p.slug.clone()).collect()
    }

    #[test]
    fn default_weights() {
        let w = ScoreWeights::default();
        assert_eq!(w.sector_match, 100);
        assert_eq!(w.extra_sector, 20);
        assert_eq!(w.same_status, 50);
        assert_eq!(w.featured, 10);
        assert_eq!(ScoreWeights::from(&RelatedConfig::default()), w);
    }

    #[test]
    fn score_rules_add_up() {
        let reference =
            Project::new("r", "R", Status::Current).with_sectors(["Retail", "Office"]);
        let both = Project::new("a", "A", Status::Current)
            .with_sectors(["Office", "Retail", "Industrial"])
            .with_featured(true);
        let s = score(&reference, &both, &ScoreWeights::default());
        assert_eq!(s.shared_sectors, 2);
        assert!(s.same_status);
        assert!(s.featured);
        assert_eq!(s.total, 100 + 20 + 50 + 10);

        let unrelated = Project::new("b", "B", Status::Previous).with_sectors(["Residential"]);
        assert_eq!(score(&reference, &unrelated, &ScoreWeights::default()).total, 0);
    }

    #[test]
    fn sector_and_status_beats_sector_and_featured() {
        let reference = Project::new("r", "R", Status::Current).with_sectors(["Retail"]);
        let catalog = vec![
            reference.clone(),
            Project::new("b", "B", Status::Previous)
                .with_sectors(["Retail"])
                .with_featured(true),
            Project::new("a", "A", Status::Current).with_sectors(["Retail"]),
        ];
        let ranked = rank(&reference, &catalog, &ScoreWeights::default(), DEFAULT_LIMIT);
        let totals: Vec<_> = ranked.iter().map(|s| s.score.total).collect();
        assert_eq!(totals, vec![150, 110]);
        assert_eq!(ranked[0].project.slug, "a");
    }

    #[test]
    fn ties_keep_catalog_order_and_zero_scores_pad() {
        let reference = Project::new("r", "R", Status::Current).with_sectors(["Retail"]);
        let catalog = vec![
            Project::new("x", "X", Status::Previous).with_sectors(["Office"]),
            Project::new("y", "Y", Status::Previous).with_sectors(["Industrial"]),
            reference.clone(),
            Project::new("z", "Z", Status::Previous).with_sectors(["Residential"]),
            Project::new("w", "W", Status::Previous).with_sectors(["Retail"]),
        ];
        let related = suggest(&reference, &catalog, 3);
        assert_eq!(slugs(&related), vec!["w", "x", "y"]);
    }

    #[test]
    fn reference_is_excluded_by_slug() {
        let reference = Project::new("r", "R", Status::Current).with_sectors(["Retail"]);
        let mut twin = reference.clone();
        twin.id = "another-document".to_string();
        let catalog = vec![twin, Project::new("o", "O", Status::Current)];
        assert_eq!(slugs(&suggest(&reference, &catalog, 3)), vec!["o"]);
    }

    #[test]
    fn limit_bounds_output() {
        let reference = Project::new("r", "R", Status::Current);
        let catalog: Vec<_> = (0..10)
            .map(|i| Project::new(&format!("p{i}"), "P", Status::Current))
            .collect();
        assert_eq!(suggest(&reference, &catalog, 3).len(), 3);
        assert!(suggest(&reference, &catalog, 0).is_empty());
        assert!(suggest(&reference, &[], 3).is_empty());
    }

    #[test]
    fn repeated_tags_count_once() {
        let reference = Project::new("r", "R", Status::Current).with_sectors(["Retail"]);
        let mut candidate = Project::new("c", "C", Status::Previous).with_sectors(["Retail"]);
        candidate.sectors.push(raphael_core::SectorTag::named("Retail"));
        assert_eq!(shared_sectors(&reference, &candidate), 1);
    }
}
