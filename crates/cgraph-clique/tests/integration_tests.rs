//! Clique search checked against brute force enumeration.

use cgraph_clique::{find_clique, find_clique_in, CliqueFinder, CliqueGraph, CliqueSearchConfig};
use cgraph_core::{AdjacencyBuilder, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every unordered pair of `0..n`, in a fixed order.
fn all_pairs(n: usize) -> Vec<(u64, u64)> {
    let mut pairs = Vec::new();
    for u in 0..n as u64 {
        for v in u + 1..n as u64 {
            pairs.push((u, v));
        }
    }
    pairs
}

/// Lexicographically smallest k-clique by enumerating every subset.
fn brute_force(n: usize, edges: &[(u64, u64)], k: usize) -> Option<Vec<NodeId>> {
    let mut adjacent = vec![vec![false; n]; n];
    for &(u, v) in edges {
        let (u, v) = (u as usize, v as usize);
        if u != v {
            adjacent[u][v] = true;
            adjacent[v][u] = true;
        }
    }

    let mut best: Option<Vec<usize>> = None;
    for mask in 0u32..(1 << n) {
        if mask.count_ones() as usize != k {
            continue;
        }
        let members: Vec<usize> = (0..n).filter(|&i| mask & (1 << i) != 0).collect();
        let is_clique = members
            .iter()
            .enumerate()
            .all(|(i, &u)| members[i + 1..].iter().all(|&v| adjacent[u][v]));
        if is_clique && best.as_ref().is_none_or(|b| members < *b) {
            best = Some(members);
        }
    }
    best.map(|m| m.into_iter().map(|i| NodeId(i as u64)).collect())
}

fn random_edges(rng: &mut StdRng, n: usize, density: f64) -> Vec<(u64, u64)> {
    all_pairs(n)
        .into_iter()
        .filter_map(|(u, v)| {
            let keep = rng.random_bool(density);
            let flip = rng.random_bool(0.5);
            keep.then_some(if flip { (v, u) } else { (u, v) })
        })
        .collect()
}

#[test]
fn test_every_graph_on_five_nodes() {
    let pairs = all_pairs(5);
    for mask in 0u32..(1 << pairs.len()) {
        let edges: Vec<_> = pairs
            .iter()
            .enumerate()
            .filter(|&(i, _)| mask & (1 << i) != 0)
            .map(|(_, &e)| e)
            .collect();

        for k in 0..=5 {
            let found = find_clique(5, &edges, k)
                .unwrap()
                .map(|c| c.into_members());
            assert_eq!(
                found,
                brute_force(5, &edges, k),
                "edges {edges:?}, k = {k}"
            );
        }
    }
}

#[test]
fn test_pruning_never_changes_the_answer() {
    let mut rng = StdRng::seed_from_u64(42);
    for round in 0..40 {
        let n = rng.random_range(1..=14);
        let edges = random_edges(&mut rng, n, 0.6);
        let graph = CliqueGraph::from_edges(n, &edges).unwrap();

        for k in 0..=n {
            let pruned = CliqueFinder::new(&graph).search(k).unwrap();
            let exhaustive = CliqueFinder::new(&graph)
                .with_config(CliqueSearchConfig { prune: false })
                .search(k)
                .unwrap();

            assert_eq!(pruned.clique, exhaustive.clique, "round {round}, k = {k}");
            assert!(pruned.stats.branches_explored <= exhaustive.stats.branches_explored);
        }
    }
}

#[test]
fn test_random_graphs_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..25 {
        let n = 12;
        let edges = random_edges(&mut rng, n, 0.5);
        let graph = CliqueGraph::from_edges(n, &edges).unwrap();

        for k in [3, 4, 5, 6] {
            let found = find_clique(n, &edges, k).unwrap();
            if let Some(clique) = &found {
                assert_eq!(clique.len(), k);
                assert!(clique.members().windows(2).all(|w| w[0] < w[1]));
                assert!(graph.is_clique(clique.members()));
            }
            assert_eq!(found.map(|c| c.into_members()), brute_force(n, &edges, k));
        }
    }
}

#[test]
fn test_complete_graph() {
    let edges = all_pairs(8);
    let clique = find_clique(8, &edges, 8).unwrap().unwrap();
    assert_eq!(clique.len(), 8);

    let clique = find_clique(8, &edges, 3).unwrap().unwrap();
    assert_eq!(clique.members(), &[NodeId(0), NodeId(1), NodeId(2)]);
}

#[test]
fn test_wide_graph_spans_several_words() {
    // A 5-clique hidden among 150 otherwise sparse nodes.
    let mut edges: Vec<(u64, u64)> = (0..149).map(|i| (i, i + 1)).collect();
    let hidden = [70u64, 100, 129, 130, 149];
    for (i, &u) in hidden.iter().enumerate() {
        for &v in &hidden[i + 1..] {
            edges.push((u, v));
        }
    }

    let clique = find_clique(150, &edges, 5).unwrap().unwrap();
    let expected: Vec<NodeId> = hidden.iter().copied().map(NodeId).collect();
    assert_eq!(clique.into_members(), expected);
    assert_eq!(find_clique(150, &edges, 6).unwrap(), None);
}

#[test]
fn test_sparse_ids_match_dense_relabelling() {
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 10;
    let edges = random_edges(&mut rng, n, 0.7);

    // Same graph with IDs spread out; the order of IDs is preserved.
    let mut builder = AdjacencyBuilder::new();
    for u in 0..n as u64 {
        builder.add_edge(u * 1000, u * 1000);
    }
    for &(u, v) in &edges {
        builder.add_edge(u * 1000, v * 1000);
    }
    let adjacency = builder.build();

    for k in 0..=n {
        let dense = find_clique(n, &edges, k).unwrap();
        let sparse = find_clique_in(&adjacency, k).unwrap();
        let relabelled = dense.map(|c| {
            c.into_members()
                .into_iter()
                .map(|id| NodeId(id.0 * 1000))
                .collect::<Vec<_>>()
        });
        assert_eq!(sparse.map(|c| c.into_members()), relabelled, "k = {k}");
    }
}
