use proptest::prelude::*;
use raphael_core::{Project, Status};
use raphael_discover::filter::{Selection, SectorSelection, StatusSelection, filter_projects};
use raphael_discover::recommend::{ScoreWeights, rank, suggest};
use raphael_discover::window::{PageSize, PaginationWindow, WindowState, window};

use generators::*;

fn selection(sector: &str, status: Option<Status>) -> Selection {
    Selection::new(
        SectorSelection::parse(sector),
        status.map_or(StatusSelection::All, StatusSelection::Only),
    )
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn filter_all_all_is_identity(catalog in arb_catalog(30)) {
        let out = filter_projects(&catalog, &Selection::default());
        prop_assert_eq!(out.len(), catalog.len());
        for (kept, original) in out.iter().zip(&catalog) {
            prop_assert_eq!(&kept.slug, &original.slug);
        }
    }

    #[test]
    fn filter_is_ordered_subsequence_matching_both_facets(
        catalog in arb_catalog(30),
        sector in arb_selection_sector(),
        status in prop::option::of(arb_status()),
    ) {
        let selection = selection(&sector, status);
        let out = filter_projects(&catalog, &selection);

        let expected: Vec<&str> = catalog
            .iter()
            .filter(|p| (sector == "all" || p.has_sector(&sector))
                && status.is_none_or(|s| p.status == s))
            .map(|p| p.slug.as_str())
            .collect();
        let actual: Vec<&str> = out.iter().map(|p| p.slug.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn filter_is_idempotent(
        catalog in arb_catalog(30),
        sector in arb_selection_sector(),
        status in prop::option::of(arb_status()),
    ) {
        let selection = selection(&sector, status);
        let once = filter_projects(&catalog, &selection);
        let twice = filter_projects(once.iter().copied(), &selection);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn untagged_projects_only_pass_all(
        catalog in arb_catalog(30),
        sector in arb_selection_sector(),
    ) {
        prop_assume!(sector != "all");
        let out = filter_projects(&catalog, &selection(&sector, None));
        prop_assert!(out.iter().all(|p| !p.is_untagged()));
    }

    #[test]
    fn suggestions_are_bounded_sorted_and_exclude_reference(
        catalog in arb_catalog(20),
        pick in any::<prop::sample::Index>(),
        limit in 0usize..6,
    ) {
        prop_assume!(!catalog.is_empty());
        let reference = &catalog[pick.index(catalog.len())];
        let ranked = rank(reference, &catalog, &ScoreWeights::default(), limit);

        prop_assert!(ranked.len() <= limit);
        prop_assert_eq!(ranked.len(), limit.min(catalog.len() - 1));
        prop_assert!(ranked.iter().all(|s| s.project.slug != reference.slug));
        prop_assert!(ranked.windows(2).all(|w| w[0].score.total >= w[1].score.total));
    }

    #[test]
    fn equal_scores_keep_catalog_order(
        catalog in arb_catalog(20),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!catalog.is_empty());
        let reference = &catalog[pick.index(catalog.len())];
        let ranked = rank(reference, &catalog, &ScoreWeights::default(), catalog.len());
        let position = |slug: &str| catalog.iter().position(|p| p.slug == slug);
        for pair in ranked.windows(2) {
            if pair[0].score.total == pair[1].score.total {
                prop_assert!(position(&pair[0].project.slug) < position(&pair[1].project.slug));
            }
        }
    }

    #[test]
    fn suggest_matches_rank_under_default_weights(
        catalog in arb_catalog(20),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!catalog.is_empty());
        let reference = &catalog[pick.index(catalog.len())];
        let via_rank: Vec<&Project> = rank(reference, &catalog, &ScoreWeights::default(), 3)
            .into_iter()
            .map(|s| s.project)
            .collect();
        prop_assert_eq!(suggest(reference, &catalog, 3), via_rank);
    }

    #[test]
    fn window_visible_is_prefix_and_has_more_iff_hidden(
        len in 0usize..40,
        revealed in 0usize..50,
    ) {
        let items: Vec<usize> = (0..len).collect();
        let slice = window(&items, revealed);
        prop_assert_eq!(slice.visible.len(), revealed.min(len));
        prop_assert_eq!(slice.visible, &items[..revealed.min(len)]);
        prop_assert_eq!(slice.has_more, len > revealed);
    }

    #[test]
    fn show_more_is_monotonic_and_capped(
        rows in 0usize..4,
        columns in 0usize..5,
        len in 0usize..60,
        clicks in 0usize..20,
    ) {
        let mut w = PaginationWindow::new(PageSize::new(rows, columns));
        let page = w.page_size();
        prop_assert!(page >= 1);

        for _ in 0..clicks {
            let before = w.revealed();
            let advanced = w.show_more(len);
            if advanced {
                prop_assert_eq!(w.revealed(), (before + page).min(len));
            } else {
                prop_assert_eq!(w.revealed(), before);
                prop_assert!(len <= before);
            }
            prop_assert!(w.revealed() >= page);
        }

        match w.state(len) {
            WindowState::Collapsed => prop_assert_eq!(w.revealed(), page),
            WindowState::Expanded => prop_assert!(w.revealed() > page && w.revealed() < len),
            WindowState::Exhausted => prop_assert!(w.revealed() > page && w.revealed() >= len),
        }
    }
}
