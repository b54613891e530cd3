// =========================================================================
// FALSIFY-SM: cosine similarity matrix contract
//
// Invariants under test:
//   - symmetry: sim(i, j) == sim(j, i)
//   - bounded range for nonzero-norm pairs: -1 <= sim <= 1
//   - self-similarity: 1.0 for interacted items, 0.0 for zero-norm items
//   - zero-norm policy: never NaN, always 0.0
//   - determinism: identical input, identical output
// =========================================================================

use super::*;

fn sample_matrix() -> InteractionMatrix {
    // "x" and "y" share the exact same pattern; "z" is disjoint.
    InteractionMatrix::from_rows(
        &["x", "y", "z"],
        &[
            &[1.0, 1.0, 0.0],
            &[1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
        ],
    )
    .expect("valid matrix")
}

/// FALSIFY-SM-001: symmetry over every item pair
#[test]
fn falsify_sm_001_symmetry() {
    let sim = SimilarityMatrix::compute(&sample_matrix()).expect("computes");
    for i in 0..sim.n_items() {
        for j in 0..sim.n_items() {
            let a = sim.get(i, j);
            let b = sim.get(j, i);
            assert!(
                (a - b).abs() < 1e-7,
                "FALSIFIED SM-001: sim({i},{j})={a} != sim({j},{i})={b}"
            );
        }
    }
}

/// FALSIFY-SM-002: every entry within [-1, 1] (with float slack)
#[test]
fn falsify_sm_002_bounded_range() {
    let sim = SimilarityMatrix::compute(&sample_matrix()).expect("computes");
    for i in 0..sim.n_items() {
        for j in 0..sim.n_items() {
            let v = sim.get(i, j);
            assert!(
                (-1.0 - 1e-6..=1.0 + 1e-6).contains(&v),
                "FALSIFIED SM-002: sim({i},{j})={v} out of range"
            );
        }
    }
}

/// FALSIFY-SM-003: self-similarity is 1.0 for any interacted item
#[test]
fn falsify_sm_003_self_similarity_one() {
    let sim = SimilarityMatrix::compute(&sample_matrix()).expect("computes");
    for i in 0..sim.n_items() {
        let v = sim.get(i, i);
        assert!(
            (v - 1.0).abs() < 1e-6,
            "FALSIFIED SM-003: sim({i},{i})={v}, expected 1.0"
        );
    }
}

/// FALSIFY-SM-004: zero-norm item gets 0.0 everywhere, including diagonal
#[test]
fn falsify_sm_004_zero_norm_policy() {
    let m = InteractionMatrix::from_rows(
        &["a", "b", "ghost"],
        &[&[1.0, 0.0, 0.0], &[1.0, 1.0, 0.0]],
    )
    .expect("valid matrix");
    let sim = SimilarityMatrix::compute(&m).expect("computes");

    let ghost = sim.item_index("ghost").expect("ghost is a column");
    for j in 0..sim.n_items() {
        let v = sim.get(ghost, j);
        assert!(!v.is_nan(), "FALSIFIED SM-004: sim(ghost,{j}) is NaN");
        assert!(
            v.abs() < 1e-7,
            "FALSIFIED SM-004: sim(ghost,{j})={v}, expected 0.0"
        );
    }
    assert_eq!(sim.get(ghost, ghost), 0.0);
}

/// FALSIFY-SM-005: identical columns score 1.0, disjoint columns 0.0
#[test]
fn falsify_sm_005_identical_and_disjoint() {
    let sim = SimilarityMatrix::compute(&sample_matrix()).expect("computes");
    assert!((sim.pair("x", "y").expect("known items") - 1.0).abs() < 1e-6);
    assert!(sim.pair("x", "z").expect("known items").abs() < 1e-6);
    assert!(sim.pair("y", "z").expect("known items").abs() < 1e-6);
}

/// FALSIFY-SM-006: determinism across repeated runs
#[test]
fn falsify_sm_006_determinism() {
    let m = sample_matrix();
    let a = SimilarityMatrix::compute(&m).expect("computes");
    let b = SimilarityMatrix::compute(&m).expect("computes");
    assert_eq!(a, b, "FALSIFIED SM-006: repeated runs differ");
}

/// FALSIFY-SM-007: serial and progress paths agree
#[test]
fn falsify_sm_007_progress_path_agrees() {
    let m = sample_matrix();
    let plain = SimilarityMatrix::compute(&m).expect("computes");
    let mut ticks = Vec::new();
    let with_progress = SimilarityMatrix::compute_with_progress(&m, |done, total| {
        ticks.push((done, total));
    })
    .expect("computes");
    assert_eq!(plain, with_progress);
    assert_eq!(ticks, vec![(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn test_single_item_column_rejected() {
    let m = InteractionMatrix::from_rows(&["only"], &[&[1.0]]).expect("valid matrix");
    let err = SimilarityMatrix::compute(&m).unwrap_err();
    assert!(err.to_string().contains("at least 2 item columns"));
}

#[test]
fn test_zero_rows_rejected() {
    let m = InteractionMatrix::new(&["a", "b"]).expect("valid names");
    let err = SimilarityMatrix::compute(&m).unwrap_err();
    assert!(err.to_string().contains("at least one user row"));
}

#[test]
fn test_row_and_column_order_follows_input() {
    let sim = SimilarityMatrix::compute(&sample_matrix()).expect("computes");
    assert_eq!(sim.item_names(), &["x", "y", "z"]);
    assert_eq!(sim.row(0).len(), 3);
}

#[test]
fn test_cosine_known_value() {
    // Overlap in one of two interactions: cos = 1 / (sqrt(2) * 1)
    let u = Vector::from_slice(&[1.0, 1.0]);
    let v = Vector::from_slice(&[1.0, 0.0]);
    let expected = 1.0 / 2.0_f32.sqrt();
    assert!((cosine_similarity(&u, &v) - expected).abs() < 1e-6);
}

#[test]
fn test_serde_round_trip() {
    let sim = SimilarityMatrix::compute(&sample_matrix()).expect("computes");
    let json = serde_json::to_string(&sim).expect("serializes");
    let back: SimilarityMatrix = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(sim, back);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn binary_rows(n_items: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
        prop::collection::vec(
            prop::collection::vec(prop::bool::ANY.prop_map(f32::from), n_items),
            1..8,
        )
    }

    proptest! {
        /// FALSIFY-SM-008: symmetry, range, and diagonal policy hold for
        /// arbitrary binary matrices.
        #[test]
        fn falsify_sm_008_random_binary(rows in binary_rows(4)) {
            let names = ["i0", "i1", "i2", "i3"];
            let borrowed: Vec<&[f32]> = rows.iter().map(Vec::as_slice).collect();
            let m = InteractionMatrix::from_rows(&names, &borrowed).expect("binary rows");
            let sim = SimilarityMatrix::compute(&m).expect("computes");

            for i in 0..4 {
                let norm = m.item_column(i).norm();
                let diag = sim.get(i, i);
                if norm == 0.0 {
                    prop_assert_eq!(diag, 0.0);
                } else {
                    prop_assert!((diag - 1.0).abs() < 1e-6);
                }
                for j in 0..4 {
                    let v = sim.get(i, j);
                    prop_assert!(!v.is_nan());
                    prop_assert!((-1.0 - 1e-6..=1.0 + 1e-6).contains(&v));
                    prop_assert!((v - sim.get(j, i)).abs() < 1e-7);
                }
            }
        }
    }
}
