#![allow(missing_docs)]

mod common;

use piecechipper::{Processor, ProcessorOptions};

const SAMPLES: &[&str] = &[
    "hello world",
    "the undo",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3",
    "123 + 456 = 789",
    "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "$$$!!!...---",
    " ",
    "a",
    "",
];

fn processor(model: piecechipper::PieceModel<u32>) -> Processor {
    let processor = Processor::new(ProcessorOptions::default());
    processor.load_model(model).unwrap();
    processor
}

#[test]
fn identity_roundtrip_is_exact() {
    let processor = processor(common::identity_model());
    for text in SAMPLES {
        let ids = processor.encode(text).unwrap();
        assert_eq!(&processor.decode(&ids).unwrap(), text, "ids: {ids:?}");
    }
}

#[test]
fn default_roundtrip_collapses_whitespace() {
    let processor = processor(common::model());
    let cases = [
        ("hello world", "hello world"),
        ("  multiple   spaces  ", "multiple spaces"),
        ("line1\nline2", "line1 line2"),
        ("\u{ff21}\u{ff22}", "AB"),
        ("   ", ""),
    ];
    for (text, expected) in cases {
        let ids = processor.encode(text).unwrap();
        assert_eq!(processor.decode(&ids).unwrap(), expected);
    }
}

#[test]
fn marker_in_input_is_idempotent() {
    let processor = processor(common::model());
    for text in ["\u{2581}a", "a\u{2581}", "x \u{2581} y", "\u{2581}\u{2581}"] {
        let ids = processor.encode(text).unwrap();
        let decoded = processor.decode(&ids).unwrap();
        assert_eq!(processor.encode(&decoded).unwrap(), ids, "{text:?}");
    }
    assert_eq!(
        processor.encode("x \u{2581} y").unwrap(),
        processor.encode("x y").unwrap()
    );
}

#[test]
fn ids_are_in_range_and_stable() {
    let processor = processor(common::model());
    let vocab_size = processor.vocab_size();
    for text in SAMPLES {
        let ids = processor.encode(text).unwrap();
        assert!(ids.iter().all(|&id| (id as usize) < vocab_size));
        assert_eq!(processor.encode(text).unwrap(), ids);
    }

    let batch = processor.encode_batch(SAMPLES).unwrap();
    for (text, ids) in SAMPLES.iter().zip(batch.iter()) {
        assert_eq!(&processor.encode(text).unwrap(), ids);
    }
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(500))]

    #[test]
    fn identity_roundtrip(text in "\\PC{0,64}") {
        let processor = processor(common::identity_model());
        let ids = processor.encode(&text).unwrap();
        proptest::prop_assert_eq!(processor.decode(&ids).unwrap(), text);
    }

    #[test]
    fn default_encode_is_idempotent(text in "[a-z \t\n.,\u{e9}\u{4f60}\u{1f600}\u{2581}]{0,64}") {
        let processor = processor(common::model());
        let ids = processor.encode(&text).unwrap();
        let decoded = processor.decode(&ids).unwrap();
        proptest::prop_assert_eq!(processor.encode(&decoded).unwrap(), ids);
    }

    #[test]
    fn byte_encode_accepts_anything(bytes in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..64)) {
        let processor = processor(common::model());
        let vocab_size = processor.vocab_size();
        let ids = processor.encode_bytes(&bytes).unwrap();
        proptest::prop_assert!(ids.iter().all(|&id| (id as usize) < vocab_size));
        if let Ok(text) = core::str::from_utf8(&bytes) {
            proptest::prop_assert_eq!(ids, processor.encode(text).unwrap());
        }
    }
}
