#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use piecechipper::{
    Lifecycle,
    LoadError,
    PCError,
    Processor,
    ProcessorOptions,
    StatusCode,
    vocab::io::model_to_bytes,
};

#[test]
fn load_from_file() {
    let dir = tempdir::TempDir::new("lifecycle").unwrap();
    let path = common::write_model(dir.path(), &common::model());

    let processor: Processor = Processor::new(ProcessorOptions::default());
    assert_eq!(processor.lifecycle(), Lifecycle::Unloaded);
    assert_eq!(processor.vocab_size(), 0);
    assert!(matches!(processor.encode("hello"), Err(PCError::NotLoaded)));

    processor.load_path(&path).unwrap();
    assert_eq!(processor.lifecycle(), Lifecycle::Loaded);
    assert_eq!(processor.vocab_size(), common::vocab().len());
    assert_eq!(processor.bos_id(), Some(1));
    assert_eq!(processor.eos_id(), Some(2));
    assert_eq!(processor.unk_id(), Some(0));
    assert_eq!(processor.pad_id(), None);

    assert_eq!(
        processor.encode_as_pieces("undo").unwrap(),
        vec!["▁", "undo"]
    );
    assert_eq!(processor.decode(&processor.encode("undo").unwrap()).unwrap(), "undo");

    processor.release();
    assert_eq!(processor.lifecycle(), Lifecycle::Released);
    assert!(matches!(processor.encode("hello"), Err(PCError::NotLoaded)));
    assert!(matches!(processor.decode(&[3]), Err(PCError::NotLoaded)));
    assert!(matches!(processor.load_path(&path), Err(PCError::Released)));

    processor.release();
    assert_eq!(processor.lifecycle(), Lifecycle::Released);
}

#[test]
fn missing_file() {
    let processor: Processor = Processor::default();
    let result = processor.load_path("/no/such/dir/model.pchp");
    assert!(matches!(
        result,
        Err(PCError::Load(LoadError::NotFound { .. }))
    ));
    assert_eq!(StatusCode::of(&result), StatusCode::NotFound);
    assert_eq!(processor.lifecycle(), Lifecycle::Unloaded);
}

#[test]
fn corrupt_models_leave_state_unchanged() {
    let bytes = model_to_bytes(&common::model()).unwrap();
    let processor: Processor = Processor::default();

    for len in [0, 4, 16, 31, 32, 40, bytes.len() - 1] {
        let result = processor.load_bytes(&bytes[..len]);
        assert_eq!(StatusCode::of(&result), StatusCode::Corrupt, "len {len}");
        assert_eq!(processor.lifecycle(), Lifecycle::Unloaded);
    }

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert_eq!(
        StatusCode::of(&processor.load_bytes(&bad_magic)),
        StatusCode::Corrupt
    );

    let mut bad_version = bytes.clone();
    bad_version[4] = 99;
    assert_eq!(
        StatusCode::of(&processor.load_bytes(&bad_version)),
        StatusCode::UnsupportedVersion
    );

    // A loaded model survives a failed reload.
    processor.load_bytes(&bytes).unwrap();
    let before = processor.encode("hello world").unwrap();
    assert!(processor.load_bytes(&bytes[..10]).is_err());
    assert_eq!(processor.lifecycle(), Lifecycle::Loaded);
    assert_eq!(processor.encode("hello world").unwrap(), before);
}

#[test]
fn unseen_emoji_uses_byte_fallback() {
    let processor: Processor = Processor::default();
    processor.load_model(common::model()).unwrap();

    let ids = processor.encode("hi \u{1f99c}").unwrap();
    assert!(!ids.is_empty());
    assert!(ids.iter().filter(|&&id| processor.is_byte(id).unwrap()).count() >= 4);
    assert_eq!(processor.decode(&ids).unwrap(), "hi \u{1f99c}");
}

#[test]
fn invalid_ids_fail_without_partial_output() {
    let processor: Processor = Processor::default();
    processor.load_model(common::model()).unwrap();
    let vocab_size = processor.vocab_size();

    let result = processor.decode(&[3, vocab_size as u32]);
    assert!(matches!(result, Err(PCError::InvalidId { .. })));
    assert_eq!(StatusCode::of(&result), StatusCode::InvalidId);

    assert!(matches!(
        processor.decode_i64(&[3, -1]),
        Err(PCError::InvalidId { id: -1, .. })
    ));
    assert!(matches!(
        processor.id_to_piece(vocab_size as u32),
        Err(PCError::InvalidId { .. })
    ));
}

#[test]
fn shared_across_threads() {
    let processor: Arc<Processor> = Arc::new(Processor::default());
    processor.load_model(common::model()).unwrap();
    let expected = processor.encode("hello the world").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let processor = processor.clone();
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| processor.encode("hello the world"))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            match result {
                Ok(ids) => assert_eq!(ids, expected),
                Err(err) => panic!("encode failed: {err}"),
            }
        }
    }
}
