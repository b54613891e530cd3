//! Model persistence helpers.
//!
//! The owning service persists and reloads the published model pair; this
//! module provides a JSON round-trip so the storage location stays the
//! caller's concern (file, blob, database column).

use crate::engine::Model;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Serializes a model to JSON on any writer.
///
/// # Errors
///
/// Returns `Serialization` on encoding failure.
pub fn save_model<W: Write>(model: &Model, writer: W) -> Result<()> {
    serde_json::to_writer(writer, model)?;
    Ok(())
}

/// Deserializes a model from JSON on any reader.
///
/// # Errors
///
/// Returns `Serialization` on malformed input.
pub fn load_model<R: Read>(reader: R) -> Result<Model> {
    Ok(serde_json::from_reader(reader)?)
}

/// Saves a model to a JSON file at `path`.
///
/// # Errors
///
/// Returns `Io` on file errors, `Serialization` on encoding failure.
pub fn save_model_to_path<P: AsRef<Path>>(model: &Model, path: P) -> Result<()> {
    let file = File::create(path)?;
    save_model(model, BufWriter::new(file))
}

/// Loads a model from a JSON file at `path`.
///
/// # Errors
///
/// Returns `Io` on file errors, `Serialization` on malformed input.
pub fn load_model_from_path<P: AsRef<Path>>(path: P) -> Result<Model> {
    let file = File::open(path)?;
    load_model(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InteractionMatrix;
    use crate::engine::Recommender;
    use crate::error::SugerirError;

    fn sample_model() -> Model {
        let m = InteractionMatrix::from_rows(
            &["x", "y", "z"],
            &[
                &[1.0, 1.0, 0.0],
                &[1.0, 1.0, 0.0],
                &[0.0, 0.0, 1.0],
            ],
        )
        .expect("valid matrix");
        let engine = Recommender::new(m).with_top_n(3);
        (*engine.recompute_all().expect("recomputes")).clone()
    }

    #[test]
    fn test_round_trip_in_memory() {
        let model = sample_model();
        let mut buf = Vec::new();
        save_model(&model, &mut buf).expect("saves");
        let back = load_model(buf.as_slice()).expect("loads");
        assert_eq!(model, back);
    }

    #[test]
    fn test_round_trip_via_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("model.json");

        let model = sample_model();
        save_model_to_path(&model, &path).expect("saves");
        let back = load_model_from_path(&path).expect("loads");
        assert_eq!(model, back);
    }

    #[test]
    fn test_load_malformed_json() {
        let err = load_model("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, SugerirError::Serialization(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_model_from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SugerirError::Io(_)));
    }

    #[test]
    fn test_loaded_model_serves_loaded_engine() {
        let model = sample_model();
        let mut buf = Vec::new();
        save_model(&model, &mut buf).expect("saves");
        let loaded = load_model(buf.as_slice()).expect("loads");

        let m = InteractionMatrix::from_rows(&["x", "y", "z"], &[&[0.0, 0.0, 1.0]])
            .expect("valid matrix");
        let engine = Recommender::with_model(m, loaded);
        assert_eq!(engine.similar_items("x").expect("known item")[0], "y");
    }
}
