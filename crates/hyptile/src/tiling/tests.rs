use super::*;
use crate::numeric::Point;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn two_colors() -> Palette {
    Palette::new(vec!["#000000".into(), "#ffffff".into()]).unwrap()
}

fn grow(n: usize, k: usize, layers: usize) -> Tiling {
    Tiling::build(TilingParams::new(n, k, layers), &mut two_colors()).unwrap()
}

fn shares_edge(p: &Polygon, q: &Polygon) -> bool {
    let common = p
        .vertices()
        .iter()
        .filter(|a| {
            let a = a.to_f64();
            q.vertices().iter().any(|b| (b.to_f64() - a).norm() < 1e-9)
        })
        .count();
    common >= 2
}

#[test]
fn heptagons_one_layer() {
    let t = grow(7, 3, 1);
    assert_eq!(t.total(), 8);
    assert_eq!(t.inner(), 1);
    assert_eq!(t.rule(0), Some(Rule::Seed));
    assert!(t.rules()[1..].iter().all(|&r| r == Rule::Edge));
    for i in 1..8 {
        assert!(shares_edge(&t.polygons()[0], &t.polygons()[i]), "child {i}");
    }
}

#[test]
fn zero_layers_is_just_the_seed() {
    let t = grow(5, 6, 0);
    assert_eq!((t.inner(), t.total()), (0, 1));
    assert!(!t.is_empty());
    assert!(!t.is_inner(0));
    assert_eq!(t.polygons()[0].len(), 5);
}

#[test]
fn predicted_counts() {
    let cases = [
        ((4, 5, 2), (13, 61)),
        ((4, 5, 3), (61, 241)),
        ((7, 3, 3), (29, 85)),
        ((7, 3, 4), (85, 232)),
        ((5, 4, 3), (51, 201)),
        ((4, 6, 3), (113, 673)),
        ((6, 4, 3), (85, 505)),
        ((3, 8, 4), (361, 1369)),
        ((8, 3, 3), (41, 161)),
        ((5, 6, 2), (21, 221)),
    ];
    for ((n, k, layers), (inner, total)) in cases {
        let size = TilingParams::new(n, k, layers).validate().unwrap();
        assert_eq!((size.inner, size.total), (inner, total), "{{{n},{k}}} x{layers}");
        // inner is always the previous layer's total
        let prev = count_polys(&TilingParams::new(n, k, layers - 1)).unwrap();
        assert_eq!(size.inner, prev.total);
    }
}

#[test]
fn layer_sizes_lists_every_layer() {
    let sizes = layer_sizes(&TilingParams::new(7, 3, 3)).unwrap();
    let totals: Vec<usize> = sizes.iter().map(|s| s.total).collect();
    assert_eq!(totals, vec![1, 8, 29, 85]);
    assert_eq!(sizes[0].inner, 0);
}

#[test]
fn rejects_non_hyperbolic_params() {
    for (n, k) in [(2, 9), (9, 2), (3, 6), (4, 4), (5, 3), (6, 3), (3, 3)] {
        let err = TilingParams::new(n, k, 1).validate().unwrap_err();
        assert!(
            matches!(err, TilingError::InvalidParams { .. }),
            "{{{n},{k}}}: {err}"
        );
    }
    for (n, k) in [(3, 7), (4, 5), (5, 4), (7, 3)] {
        assert!(TilingParams::new(n, k, 1).validate().is_ok(), "{{{n},{k}}}");
    }
}

#[test]
fn counting_rejects_what_validate_rejects() {
    for (n, k) in [(4, 4), (6, 3), (3, 3), (4, 3), (2, 9)] {
        let params = TilingParams::new(n, k, 2);
        assert!(
            matches!(layer_sizes(&params), Err(TilingError::InvalidParams { .. })),
            "{{{n},{k}}}"
        );
        assert!(matches!(count_polys(&params), Err(TilingError::InvalidParams { .. })));
    }
}

#[test]
fn recurrence_overflow_is_its_own_error() {
    let params = TilingParams {
        n: usize::MAX,
        k: usize::MAX,
        layers: 1,
        max_polygons: usize::MAX,
    };
    assert_eq!(count_polys(&params), Err(TilingError::Overflow { layer: 1 }));
    let zero = TilingParams { layers: 0, ..params };
    assert_eq!(count_polys(&zero), Ok(TilingSize { inner: 0, total: 1 }));
}

#[test]
fn size_limit_applies_before_growth() {
    let params = TilingParams {
        max_polygons: 100,
        ..TilingParams::new(7, 3, 4)
    };
    assert_eq!(
        Tiling::build(params, &mut two_colors()).unwrap_err(),
        TilingError::TooLarge {
            total: 232,
            limit: 100
        }
    );
    // absurd depth stops at the limit instead of looping
    let deep = TilingParams::new(5, 4, usize::MAX);
    assert!(matches!(
        deep.validate(),
        Err(TilingError::TooLarge { limit: DEFAULT_MAX_POLYGONS, .. })
    ));
}

#[test]
fn polygons_stay_inside_the_disk() {
    for (n, k) in [(7, 3), (5, 4), (4, 5), (3, 8), (6, 4), (3, 7)] {
        let t = grow(n, k, 4);
        for (i, p) in t.polygons().iter().enumerate() {
            assert!(p.is_finite(), "{{{n},{k}}} polygon {i} has NaN");
            assert_eq!(p.len(), n);
            assert!(p.max_norm().to_f64() < 1.0, "{{{n},{k}}} polygon {i} leaves the disk");
            assert!(p.signed_area().to_f64() > 0.0, "{{{n},{k}}} polygon {i} flipped");
        }
    }
}

#[test]
fn no_polygon_is_grown_twice() {
    for (n, k, layers) in [(5, 4, 3), (7, 3, 3), (3, 8, 3)] {
        let t = grow(n, k, layers);
        let centers: Vec<_> = t.polygons().iter().map(|p| p.centroid().to_f64()).collect();
        for i in 0..centers.len() {
            for j in 0..i {
                assert!(
                    (centers[i] - centers[j]).norm() > 1e-9,
                    "{{{n},{k}}}: polygons {j} and {i} coincide"
                );
            }
        }
    }
}

#[test]
fn even_k_neighbours_alternate_colors() {
    for (n, k, layers) in [(5, 4, 3), (4, 6, 3), (6, 4, 3)] {
        let t = grow(n, k, layers);
        let (c0, c1) = (&t.colors()[0], &t.colors()[1]);
        assert_ne!(c0, c1);
        assert!(t.colors().iter().all(|c| c == c0 || c == c1));
        let mut shared = 0;
        for i in 0..t.total() {
            for j in 0..i {
                if shares_edge(&t.polygons()[i], &t.polygons()[j]) {
                    shared += 1;
                    assert_ne!(t.colors()[i], t.colors()[j], "{{{n},{k}}}: {j}/{i}");
                }
            }
        }
        assert!(shared >= t.total() - 1);
    }
}

#[test]
fn odd_k_colors_follow_the_palette() {
    let palette = || Palette::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
    let t = Tiling::build(TilingParams::new(7, 3, 2), &mut palette()).unwrap();
    let source = palette();
    for (i, c) in t.colors().iter().enumerate() {
        assert_eq!(c, &source.colors()[i % 3]);
    }
}

#[test]
fn even_k_needs_two_colors() {
    let mut single = Palette::new(vec!["#123456".into()]).unwrap();
    let err = Tiling::build(TilingParams::new(5, 4, 1), &mut single).unwrap_err();
    assert!(matches!(err, TilingError::InvalidParams { .. }));
    // a lone seed never needs a second color
    let seed_only = Tiling::build(TilingParams::new(5, 4, 0), &mut single).unwrap();
    assert_eq!(seed_only.total(), 1);
    // odd k is fine with one color
    assert!(Tiling::build(TilingParams::new(7, 3, 1), &mut single).is_ok());
}

#[test]
fn palette_rotation() {
    assert!(Palette::new(Vec::new()).is_err());
    let mut rng = StdRng::seed_from_u64(5);
    let mut p = Palette::flat(&mut rng);
    assert_eq!(p.colors().len(), FLAT_COLORS.len());
    let first = p.next_color();
    for _ in 1..FLAT_COLORS.len() {
        assert_ne!(p.next_color(), first);
    }
    assert_eq!(p.next_color(), first);

    let colors: Vec<Color> = FLAT_COLORS.iter().map(|&c| c.into()).collect();
    let mut a = Palette::with_random_start(colors.clone(), &mut StdRng::seed_from_u64(9))
        .unwrap();
    let mut b = Palette::with_random_start(colors, &mut StdRng::seed_from_u64(9)).unwrap();
    for _ in 0..30 {
        assert_eq!(a.next_color(), b.next_color());
    }
}

#[test]
fn special_rules_appear_where_expected() {
    let t = grow(7, 3, 2);
    assert!(t.rules().contains(&Rule::EdgeFirst));
    assert!(!t.rules().contains(&Rule::Vertex));
    let t = grow(3, 8, 2);
    assert!(t.rules().contains(&Rule::VertexLast));
    let t = grow(5, 4, 2);
    assert!(t.rules().contains(&Rule::Vertex));
    assert!(!t.rules().contains(&Rule::VertexLast));
    for code in 0..=4u8 {
        assert_eq!(Rule::from_code(code).map(Rule::code), Some(code));
    }
    assert_eq!(Rule::from_code(5), None);
}

#[test]
fn reflecting_back_across_the_shared_edge_recovers_the_parent() {
    let seed = construct_center_polygon(5, 4, SeedKind::Regular);
    for s in 0..5 {
        let child = create_next_poly(&seed, s);
        assert!(child.signed_area().to_f64() > 0.0);
        let back = create_next_poly(&child, 0);
        for i in 0..5 {
            let d: Point = back.vertices()[(i + 5 - s) % 5] - seed.vertices()[i];
            assert!(d.norm().to_f64() < 1e-28, "edge {s}, vertex {i}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn growth_produces_the_predicted_count(n in 3usize..10, k in 3usize..10, layers in 0usize..4) {
        let params = TilingParams::new(n, k, layers);
        let size = match params.validate() {
            Ok(size) => size,
            Err(_) => return Ok(()),
        };
        prop_assume!(size.total <= 4000);
        let mut colors = Palette::flat(&mut StdRng::seed_from_u64(n as u64 * 31 + k as u64));
        let t = Tiling::build(params, &mut colors).unwrap();
        prop_assert_eq!(t.total(), size.total);
        prop_assert_eq!(t.inner(), size.inner);
        prop_assert_eq!(t.rules().len(), size.total);
        prop_assert_eq!(t.colors().len(), size.total);
    }
}
