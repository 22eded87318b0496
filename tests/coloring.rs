// Integration tests for neighborhood coloring:
//   greedy and constrained properness, seeded determinism, and the empty palette.

use citymap::{
    baltimore, ColoringConfig, ColoringStrategy, Neighborhood, NeighborhoodLayer, Palette,
};
use geo::{polygon, MultiPolygon};

fn square(name: &str, x: f64, y: f64) -> Neighborhood {
    Neighborhood::new(name, MultiPolygon(vec![polygon![
        (x: x, y: y), (x: x + 1.0, y: y), (x: x + 1.0, y: y + 1.0), (x: x, y: y + 1.0),
    ]]))
}

/// Rows of unit squares, four across.
fn blocks(rows: usize) -> NeighborhoodLayer {
    NeighborhoodLayer::new((0..rows * 4)
        .map(|i| square(&format!("block {i}"), (i % 4) as f64, (i / 4) as f64))
        .collect())
}

fn config(strategy: ColoringStrategy, seed: u64) -> ColoringConfig {
    ColoringConfig { strategy, seed, ..Default::default() }
}

#[test]
fn greedy_never_repeats_across_a_border_with_a_large_palette() {
    let layer = blocks(2);
    let graph = layer.adjacency(0.0).unwrap();
    let palette = Palette::default();
    assert!(palette.len() > graph.max_degree());

    let colors = layer.assign_colors(&config(ColoringStrategy::Greedy, 0)).unwrap();
    for (i, j) in graph.edge_pairs() { assert_ne!(colors[i], colors[j]) }
}

#[test]
fn constrained_never_repeats_when_palette_exceeds_degree() {
    let layer = blocks(2);
    let graph = layer.adjacency(0.0).unwrap();
    assert!(Palette::default().len() > graph.max_degree());
    for seed in 0..10 {
        let colors = layer.assign_colors(&config(ColoringStrategy::Constrained, seed)).unwrap();
        for (i, j) in graph.edge_pairs() { assert_ne!(colors[i], colors[j], "seed {seed}") }
    }
}

#[test]
fn seeded_strategies_are_deterministic() {
    let layer = blocks(2);
    for strategy in [ColoringStrategy::Random, ColoringStrategy::Constrained] {
        let a = layer.assign_colors(&config(strategy, 7)).unwrap();
        let b = layer.assign_colors(&config(strategy, 7)).unwrap();
        assert_eq!(a, b, "{strategy}");
    }
}

#[test]
fn greedy_wraps_a_short_palette_on_a_triangle() {
    // Three mutually overlapping squares form a triangle in the adjacency graph.
    let layer = NeighborhoodLayer::new(vec![
        square("a", 0.0, 0.0),
        square("b", 0.5, 0.0),
        square("c", 0.25, 0.5),
    ]);
    assert_eq!(layer.adjacency(0.0).unwrap().edge_count(), 3);

    let coloring = ColoringConfig {
        palette: Palette::new(vec![baltimore::RED, baltimore::BLUE]),
        ..config(ColoringStrategy::Greedy, 0)
    };
    let colors = layer.assign_colors(&coloring).unwrap();
    assert_eq!(colors, vec![baltimore::RED, baltimore::BLUE, baltimore::RED]);
}

#[test]
fn empty_palette_is_an_error_for_palette_strategies() {
    let layer = blocks(1);
    for strategy in [ColoringStrategy::Random, ColoringStrategy::Constrained, ColoringStrategy::Greedy] {
        let coloring = ColoringConfig { palette: Palette::new(vec![]), ..config(strategy, 0) };
        assert!(layer.assign_colors(&coloring).is_err(), "{strategy}");
    }
}

#[test]
fn colored_records_keep_collection_order() {
    let layer = blocks(1);
    let colored = layer.color(&config(ColoringStrategy::Random, 3)).unwrap();
    let names = colored.iter().map(|n| n.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["block 0", "block 1", "block 2", "block 3"]);
}

#[test]
fn repeated_palette_colors_never_land_on_neighbors() {
    let layer = NeighborhoodLayer::new(vec![square("west", 0.0, 0.0), square("east", 1.0, 0.0)]);
    let palette = Palette::new(vec![baltimore::RED, baltimore::RED, baltimore::BLUE]);

    let greedy = ColoringConfig { palette: palette.clone(), ..config(ColoringStrategy::Greedy, 0) };
    let colors = layer.assign_colors(&greedy).unwrap();
    assert_ne!(colors[0], colors[1]);

    for seed in 0..100 {
        let constrained = ColoringConfig { palette: palette.clone(), ..config(ColoringStrategy::Constrained, seed) };
        let colors = layer.assign_colors(&constrained).unwrap();
        assert_ne!(colors[0], colors[1], "seed {seed}");
    }
}
