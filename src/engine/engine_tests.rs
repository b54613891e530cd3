use super::*;

fn sample_engine() -> Recommender {
    let m = InteractionMatrix::from_rows(
        &["x", "y", "z"],
        &[
            &[1.0, 1.0, 0.0],
            &[1.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
        ],
    )
    .expect("valid matrix");
    Recommender::new(m).with_top_n(3)
}

#[test]
fn test_not_ready_before_recompute() {
    let engine = sample_engine();
    assert!(matches!(engine.model(), Err(SugerirError::NotReady)));
    assert!(matches!(
        engine.score_user(0, 10),
        Err(SugerirError::NotReady)
    ));
    assert!(matches!(
        engine.similar_items("x"),
        Err(SugerirError::NotReady)
    ));
}

#[test]
fn test_recompute_publishes_paired_model() {
    let engine = sample_engine();
    let model = engine.recompute_all().expect("recomputes");
    assert_eq!(model.similarity.item_names(), model.top_n.item_names());
    assert_eq!(model.top_n.n(), 3);
}

#[test]
fn test_ensure_model_computes_once() {
    let engine = sample_engine();
    let first = engine.ensure_model().expect("computes");
    let second = engine.ensure_model().expect("returns cached");
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_recompute_determinism() {
    let engine = sample_engine();
    let a = engine.recompute_all().expect("recomputes");
    let b = engine.recompute_all().expect("recomputes");
    assert_eq!(*a, *b);
}

#[test]
fn test_similar_items() {
    let engine = sample_engine();
    engine.recompute_all().expect("recomputes");
    let similar = engine.similar_items("x").expect("known item");
    assert_eq!(similar, &["y", "z"]);

    let err = engine.similar_items("unknown band").unwrap_err();
    assert!(matches!(err, SugerirError::ItemNotFound { .. }));
}

#[test]
fn test_score_user_limit() {
    let engine = sample_engine();
    engine.recompute_all().expect("recomputes");
    // User 2 has only seen z; x and y are candidates.
    assert_eq!(engine.score_user(2, 10).expect("scores").len(), 2);
    assert_eq!(engine.score_user(2, 1).expect("scores").len(), 1);
}

#[test]
fn test_score_user_default_limit() {
    // 12 items, user 0 has seen one: 11 candidates, trimmed to the
    // default limit of 10.
    let names: Vec<String> = (0..12).map(|i| format!("item_{i:02}")).collect();
    let mut row = vec![0.0; 12];
    row[0] = 1.0;
    let mut other = vec![0.0; 12];
    other[5] = 1.0;
    other[6] = 1.0;
    let m = InteractionMatrix::from_rows(&names, &[&row, &other]).expect("valid matrix");

    let engine = Recommender::new(m);
    engine.recompute_all().expect("recomputes");

    let ranked = engine.score_user_default(0).expect("scores");
    assert_eq!(ranked.len(), DEFAULT_LIMIT);
    assert_eq!(
        ranked,
        engine.score_user(0, DEFAULT_LIMIT).expect("scores")
    );
}

#[test]
fn test_score_user_unknown_index() {
    let engine = sample_engine();
    engine.recompute_all().expect("recomputes");
    let err = engine.score_user(99, 10).unwrap_err();
    assert!(matches!(err, SugerirError::UserNotFound { index: 99, .. }));
}

#[test]
fn test_add_user_does_not_touch_published_model() {
    let engine = sample_engine();
    let before = engine.recompute_all().expect("recomputes");

    let idx = engine.add_user(&["x", "y"]).expect("known items");
    assert_eq!(idx, 3);
    assert_eq!(engine.n_users(), 4);

    // Published tables are snapshots; appending users never mutates them.
    let current = engine.model().expect("model exists");
    assert!(Arc::ptr_eq(&before, &current));

    // The next batch picks the new row up.
    let after = engine.recompute_all().expect("recomputes");
    assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn test_add_user_unknown_item_rejected() {
    let engine = sample_engine();
    let err = engine.add_user(&["x", "nope"]).unwrap_err();
    assert!(matches!(err, SugerirError::UnknownItem { ref name } if name == "nope"));
    assert_eq!(engine.n_users(), 3);
}

#[test]
fn test_failed_recompute_keeps_last_good_model() {
    let engine = sample_engine();
    let good = engine.recompute_all().expect("recomputes");

    // Shrink N is fine, but an oversized N must fail without unpublishing.
    let engine = Recommender::with_model(
        InteractionMatrix::from_rows(&["a", "b"], &[&[1.0, 0.0]]).expect("valid matrix"),
        (*good).clone(),
    )
    .with_top_n(5);
    assert!(engine.recompute_all().is_err());
    assert!(engine.model().is_ok(), "last good model must survive");
}

#[test]
fn test_with_model_skips_recompute() {
    let engine = sample_engine();
    let model = engine.recompute_all().expect("recomputes");

    let m = InteractionMatrix::from_rows(
        &["x", "y", "z"],
        &[&[1.0, 0.0, 0.0]],
    )
    .expect("valid matrix");
    let loaded = Recommender::with_model(m, (*model).clone());
    assert!(loaded.model().is_ok());
    assert_eq!(loaded.n_users(), 1);
}

#[test]
fn test_items_and_liked_items() {
    let engine = sample_engine();
    assert_eq!(engine.items(), &["x", "y", "z"]);
    assert_eq!(engine.liked_items(0).expect("row exists"), &["x", "y"]);
}

// Scenario: recompute over a single item column is degenerate.
#[test]
fn test_single_item_recompute_rejected() {
    let m = InteractionMatrix::from_rows(&["only"], &[&[1.0]]).expect("valid matrix");
    let engine = Recommender::new(m);
    let err = engine.recompute_all().unwrap_err();
    assert!(matches!(err, SugerirError::InvalidInput { .. }));
}

#[test]
fn test_concurrent_add_user_assigns_unique_indices() {
    use std::collections::HashSet;
    use std::thread;

    let engine = Arc::new(sample_engine());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(thread::spawn(move || {
            (0..16)
                .map(|_| engine.add_user(&["x"]).expect("known item"))
                .collect::<Vec<usize>>()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        for idx in handle.join().expect("thread completes") {
            assert!(seen.insert(idx), "index {idx} assigned twice");
        }
    }
    assert_eq!(engine.n_users(), 3 + 8 * 16);
}

#[test]
fn test_readers_see_consistent_pair_during_recompute() {
    use std::thread;

    let engine = Arc::new(sample_engine());
    engine.recompute_all().expect("recomputes");

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..20 {
                engine.add_user(&["y"]).expect("known item");
                engine.recompute_all().expect("recomputes");
            }
        })
    };

    // Every observed model must be internally paired: the top-N table's
    // rank-1 entries agree with its own similarity matrix.
    for _ in 0..200 {
        let model = engine.model().expect("model exists");
        assert_eq!(model.similarity.item_names(), model.top_n.item_names());
        for name in model.top_n.item_names() {
            let row = model.top_n.neighbors(name).expect("known item");
            assert_eq!(&row[0], name);
        }
    }

    writer.join().expect("writer completes");
}
