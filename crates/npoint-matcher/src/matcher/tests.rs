//! Tests for the single-template matcher.

use super::*;
use npoint_core::{DistanceBounds, Permutations, PointSetKind};
use npoint_test::{
    brute_force_count, grid_points, init_test_logging, line_points, random_points, weighted,
    KdTree,
};

fn pair_template(lower_sq: f64, upper_sq: f64) -> MatcherTemplate {
    MatcherTemplate::exact(DistanceBounds::uniform(2, lower_sq, upper_sq).unwrap()).unwrap()
}

fn shared_root<'a>(tree: &'a KdTree, n: usize) -> NodeTuple<'a, npoint_test::KdNode> {
    (0..n).map(|_| (0, tree.root())).collect()
}

#[test]
fn test_line_matches() {
    init_test_logging();
    let template = pair_template(1.0, 4.0);
    let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0, 5.0]), 16);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    let tuple = shared_root(&tree, 2);
    assert!(matcher.node_tuple_feasible(&tuple));
    matcher.compute_base_case(&tuple);

    assert_eq!(matcher.results(), &[3, 0, 0]);
    assert_eq!(matcher.weighted_results(), &[3.0, 0.0, 0.0]);
}

#[test]
fn test_shared_leaf_tests_each_pair_once() {
    let template = pair_template(0.0, f64::INFINITY);
    let tree = KdTree::build(&random_points(7, 2, 42), 16);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 2));

    let stats = matcher.stats();
    assert_eq!(stats.pair_distance_evaluations, 21);
    assert_eq!(stats.tuples_matched, 21);
    // index 0 rejects itself, index 6 rejects all seven
    assert_eq!(stats.symmetry_rejections, 28);
    assert_eq!(stats.candidates_visited, 7 + 7 * 7);
}

#[test]
fn test_weight_products() {
    let template = pair_template(1.0, 4.0);
    let set = weighted(line_points(&[0.0, 1.0, 2.0, 5.0]), &[1.0, 2.0, 3.0, 4.0]);
    let tree = KdTree::build(&set, 16);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 2));

    // (0, 1), (0, 2), (1, 2)
    assert_eq!(matcher.results()[0], 3);
    assert_eq!(matcher.weighted_results()[0], 2.0 + 3.0 + 6.0);
}

#[test]
fn test_unit_weights_match_counts() {
    let template = MatcherTemplate::new(
        DistanceBounds::uniform(3, 0.0, 0.25).unwrap(),
        0,
        Permutations::symmetric_group(3),
    )
    .unwrap();
    let tree = KdTree::build(&random_points(20, 2, 9), 32);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 3));

    let results = matcher.match_results();
    assert_eq!(results.weighted(0), results.count(0) as f64);
}

#[test]
fn test_random_positions_select_stratum() {
    let template = MatcherTemplate::new(
        DistanceBounds::uniform(2, 0.0, 4.0).unwrap(),
        1,
        Permutations::identity(2),
    )
    .unwrap();
    let data = KdTree::build(&line_points(&[0.0, 1.0]), 4);
    let random = KdTree::build(&line_points(&[2.0]).with_kind(PointSetKind::Random), 4);
    let sets = [data.points().clone(), random.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    let mut tuple = NodeTuple::new();
    tuple.push(0, data.root());
    tuple.push(1, random.root());
    matcher.compute_base_case(&tuple);

    assert_eq!(matcher.results(), &[0, 2, 0]);
    assert_eq!(matcher.match_results().stratum_label(1), "DR");
    // different sets never trigger the ordering rule
    assert_eq!(matcher.stats().symmetry_rejections, 0);
}

#[test]
fn test_infeasible_node_tuple_is_pruned() {
    let template = pair_template(0.0, 1.0);
    let tree = KdTree::build(&line_points(&[0.0, 0.5, 10.0, 10.5]), 2);
    let sets = [tree.points().clone()];
    let (left, right) = tree.children(tree.root()).unwrap();

    let mut matcher = SingleMatcher::new(&template, &sets);
    let far: NodeTuple<_> = [(0, left), (0, right)].into_iter().collect();
    let near: NodeTuple<_> = [(0, left), (0, left)].into_iter().collect();

    assert!(!matcher.node_tuple_feasible(&far));
    assert!(matcher.node_tuple_feasible(&near));
    assert_eq!(matcher.stats().node_tuples_tested, 2);
    assert_eq!(matcher.stats().node_tuples_pruned, 1);
}

#[test]
fn test_pruned_node_tuples_hold_no_matches() {
    let template = MatcherTemplate::new(
        DistanceBounds::uniform(3, 0.01, 0.04).unwrap(),
        0,
        Permutations::symmetric_group(3),
    )
    .unwrap();
    let tree = KdTree::build(&random_points(40, 2, 17), 5);
    let sets = [tree.points().clone()];
    let leaves = tree.leaves();

    let mut matcher = SingleMatcher::new(&template, &sets);
    for a in &leaves {
        for b in &leaves {
            for c in &leaves {
                let tuple: NodeTuple<_> = [(0, *a), (0, *b), (0, *c)].into_iter().collect();
                if !matcher.node_tuple_feasible(&tuple) {
                    let mut probe = SingleMatcher::new(&template, &sets);
                    probe.compute_base_case(&tuple);
                    assert_eq!(probe.results()[0], 0, "pruned tuple {tuple:?} has matches");
                }
            }
        }
    }
    assert!(matcher.stats().node_tuples_pruned > 0);
}

#[test]
fn test_single_leaf_agrees_with_brute_force() {
    let template = MatcherTemplate::new(
        DistanceBounds::from_distances(
            vec![
                vec![0.0, 0.1, 0.2],
                vec![0.1, 0.0, 0.1],
                vec![0.2, 0.1, 0.0],
            ],
            vec![
                vec![0.0, 0.3, 0.5],
                vec![0.3, 0.0, 0.3],
                vec![0.5, 0.3, 0.0],
            ],
        )
        .unwrap(),
        0,
        Permutations::symmetric_group(3),
    )
    .unwrap();
    let tree = KdTree::build(&random_points(25, 2, 5), 64);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 3));

    let expected = brute_force_count(&template, &sets, &[0, 0, 0]);
    assert_eq!(matcher.results()[0], expected.count);
}

#[test]
fn test_invariant_permutation_does_not_change_counts() {
    // 0-1 at distance 1, both within [1, 2] of position 2: invariant under
    // swapping positions 0 and 1.
    let bounds = DistanceBounds::from_squared(
        vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ],
        vec![
            vec![0.0, 1.0, 4.0],
            vec![1.0, 0.0, 4.0],
            vec![4.0, 4.0, 0.0],
        ],
    )
    .unwrap();
    let with_swap = Permutations::from_list(3, &[vec![0, 1, 2], vec![1, 0, 2]]).unwrap();
    assert!(with_swap.is_template_invariant(1, &bounds));

    let tree = KdTree::build(&grid_points(4, 4, 1.0), 64);
    let sets = [tree.points().clone()];
    let count = |permutations: Permutations| {
        let template = MatcherTemplate::new(bounds.clone(), 0, permutations).unwrap();
        let mut matcher = SingleMatcher::new(&template, &sets);
        matcher.compute_base_case(&shared_root(&tree, 3));
        matcher.results()[0]
    };

    let identity_only = count(Permutations::identity(3));
    assert!(identity_only > 0);
    assert_eq!(identity_only, count(with_swap));
}

#[test]
fn test_reset_clears_results_and_stats() {
    let template = pair_template(1.0, 4.0);
    let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0]), 16);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 2));
    let outcome = matcher.outcome();
    assert_eq!(outcome.results.total_count(), 3);

    matcher.reset();
    assert_eq!(matcher.results(), &[0, 0, 0]);
    assert_eq!(matcher.stats(), &MatchStats::default());
    assert_eq!(outcome.stats.base_cases, 1);
}

#[test]
#[should_panic(expected = "template expects 3")]
fn test_arity_mismatch_panics() {
    let template = MatcherTemplate::exact(DistanceBounds::uniform(3, 0.0, 1.0).unwrap()).unwrap();
    let tree = KdTree::build(&line_points(&[0.0, 1.0]), 4);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 2));
}

#[test]
#[should_panic(expected = "expected 1")]
fn test_mixed_dimensions_panic() {
    let template = pair_template(0.0, 4.0);
    let line = KdTree::build(&line_points(&[0.0, 1.0]), 4);
    let grid = KdTree::build(&grid_points(2, 1, 1.0), 4);
    let sets = [line.points().clone(), grid.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    let mut tuple = NodeTuple::new();
    tuple.push(0, line.root());
    tuple.push(1, grid.root());
    matcher.compute_base_case(&tuple);
}

#[test]
fn test_stratum_follows_set_kinds_not_template() {
    init_test_logging();
    // Template declares one random position but both sets hold data.
    let template = MatcherTemplate::new(
        DistanceBounds::uniform(2, 1.0, 4.0).unwrap(),
        1,
        Permutations::identity(2),
    )
    .unwrap();
    let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0, 5.0]), 16);
    let sets = [tree.points().clone()];

    let mut matcher = SingleMatcher::new(&template, &sets);
    matcher.compute_base_case(&shared_root(&tree, 2));

    assert_eq!(matcher.results(), &[3, 0, 0]);
    assert_eq!(matcher.match_results().num_random(), 1);
}
