// tests/unit_rank.rs
//! Ranking behaviour through the public API: determinism, convergence,
//! personalization and the signature cap.

use std::path::PathBuf;

use contextmap_core::graph::rank::{
    build_adjacency, compute, create_personalization, get_ranked_files, rank_files, PageRankOptions,
    PathPattern, Personalization, RankOptions,
};
use contextmap_core::graph::{SymbolGraph, SymbolType, Tag};
use contextmap_core::signatures::{extract_signatures_for_ranked_files, MAX_SIGNATURES_PER_FILE};

fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}

/// A small layered project: handlers use services, services use models.
fn layered() -> SymbolGraph {
    let mut g = SymbolGraph::new();
    g.add_file(
        "src/models/booking.ts",
        vec![
            Tag::definition("BookingRecord", 1, SymbolType::Interface, true),
            Tag::definition("bookingSchema", 9, SymbolType::Const, true),
        ],
    );
    g.add_file(
        "src/services/bookingService.ts",
        vec![
            Tag::definition("BookingService", 3, SymbolType::Class, true),
            Tag::reference("BookingRecord", 5),
            Tag::reference("bookingSchema", 12),
        ],
    );
    g.add_file(
        "src/handlers/create.ts",
        vec![
            Tag::definition("handleCreate", 1, SymbolType::Function, true),
            Tag::reference("BookingService", 2),
            Tag::reference("BookingRecord", 4),
        ],
    );
    g.add_file(
        "src/payments/charge.ts",
        vec![
            Tag::definition("chargeCard", 1, SymbolType::Function, true),
            Tag::reference("formatMoney", 3),
        ],
    );
    g.add_file(
        "src/utils/money.ts",
        vec![Tag::definition("formatMoney", 1, SymbolType::Function, true)],
    );
    g
}

#[test]
fn test_bitwise_deterministic() {
    let opts = RankOptions::default();
    let first = rank_files(&mut layered(), &opts);
    let second = rank_files(&mut layered(), &opts);
    assert_eq!(first.len(), 5);
    for ((pa, a), (pb, b)) in first.iter().zip(second.iter()) {
        assert_eq!(pa, pb);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_scores_finite_non_negative() {
    let scores = rank_files(&mut layered(), &RankOptions::default());
    for (path, score) in &scores {
        assert!(score.is_finite() && *score >= 0.0, "{}: {score}", path.display());
    }
}

#[test]
fn test_convergence_stable_under_more_iterations() {
    let mut g = layered();
    let adj = build_adjacency(&mut g, None);
    let a = compute(&adj, &PageRankOptions { max_iterations: 1_000, ..PageRankOptions::default() });
    let b = compute(&adj, &PageRankOptions { max_iterations: 10_000, ..PageRankOptions::default() });
    for (path, score) in &a {
        assert_eq!(score.to_bits(), b[path].to_bits());
    }
}

#[test]
fn test_models_outrank_handlers() {
    let ranked = get_ranked_files(&mut layered(), &RankOptions::default());
    let pos = |s: &str| ranked.iter().position(|r| r.path == p(s)).unwrap();
    assert!(pos("src/models/booking.ts") < pos("src/handlers/create.ts"));
    assert_eq!(ranked[pos("src/models/booking.ts")].ref_count, 3);
}

#[test]
fn test_domain_hint_lifts_payments() {
    let plain = rank_files(&mut layered(), &RankOptions::default());
    let hinted = rank_files(
        &mut layered(),
        &RankOptions {
            domains: vec!["payments".into()],
            ..RankOptions::default()
        },
    );
    let key = p("src/payments/charge.ts");
    assert!(hinted[&key] > plain[&key]);
}

#[test]
fn test_explicit_personalization() {
    let mut g = layered();
    let adj = build_adjacency(&mut g, None);
    let uniform = compute(&adj, &PageRankOptions::default());

    let target = p("src/utils/money.ts");
    let pers: Personalization = adj
        .nodes()
        .map(|n| (n.clone(), if *n == target { 100.0 } else { 1.0 }))
        .collect();
    let boosted = compute(&adj, &PageRankOptions::default().with_personalization(pers));
    assert!(boosted[&target] > uniform[&target]);
}

#[test]
fn test_create_personalization_patterns() {
    let files = vec![p("src/Payments/charge.ts"), p("src/utils/money.ts")];
    let pers = create_personalization(&files, &[PathPattern::from("payments")], 7.0);
    assert!((pers[&files[0]] - 7.0).abs() < f64::EPSILON);
    assert!((pers[&files[1]] - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_signature_cap_across_graph() {
    let mut g = SymbolGraph::new();
    let defs = (0..30)
        .map(|i| Tag::definition(format!("Widget{i:02}"), i + 1, SymbolType::Class, true))
        .collect();
    g.add_file("src/widgets.ts", defs);
    g.add_file(
        "src/app.ts",
        vec![Tag::reference("Widget17", 1), Tag::reference("Widget17", 2), Tag::reference("Widget03", 3)],
    );

    let ranked = get_ranked_files(&mut g, &RankOptions::default());
    let sigs = extract_signatures_for_ranked_files(&g, &ranked, MAX_SIGNATURES_PER_FILE);
    let list = &sigs[&p("src/widgets.ts")];
    assert_eq!(list.len(), MAX_SIGNATURES_PER_FILE);
    assert_eq!(list[0].name, "Widget17");
    assert_eq!(list[1].name, "Widget03");
    assert_eq!(list[2].text, "class Widget00");
    assert!(!sigs.contains_key(&p("src/app.ts")));
}
