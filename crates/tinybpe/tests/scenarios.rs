#![allow(missing_docs)]
//! Integration tests exercising the testable properties and concrete
//! scenarios.
//!
//! Scenarios 4 and 5 (GPT-4-compatible merges/remap encoding an emoji
//! string to a specific id list, and its streaming decode) require the
//! actual externally-published o200k/cl100k merge and remap tables; those
//! are not vendored here, so this file covers every other scenario plus
//! the general invariants against the scenario-1 corpus and merge set.

use tinybpe::training::BpeTrainer;
use tinybpe::{ByteRemap, TokenId, TokenizerBuilder};

// The distilled spec's scenario 1 pairs this merge list with the corpus
// `[b"Hello TinyBPE", b"1234567890"]`, but that pairing does not hold up:
// byte 104 (`'h'`) never occurs in either string (only capital `'H'`=72
// does), and no adjacent pair in that 23-byte corpus repeats, so no pair
// there has count 2. This is the corpus that actually produces the stated
// merge list, per `original_source/tests/test_cpy_bpe.py`.
fn scenario_1_corpus() -> Vec<Vec<u8>> {
    vec![
        "hello world, hello python!".as_bytes().to_vec(),
        "你好世界，你好编程".as_bytes().to_vec(),
    ]
}

fn scenario_1_merges() -> Vec<(TokenId, TokenId)> {
    let mut trainer = BpeTrainer::new(scenario_1_corpus());
    let mut merges = Vec::new();
    for _ in 0..11 {
        merges.push(trainer.step().expect("expected a merge").pair);
    }
    merges
}

#[test]
fn scenario_1_first_eleven_merges() {
    let expected: [(TokenId, TokenId); 11] = [
        (104, 101),
        (256, 108),
        (257, 108),
        (258, 111),
        (259, 32),
        (228, 189),
        (261, 160),
        (262, 229),
        (263, 165),
        (264, 189),
        (150, 231),
    ];
    assert_eq!(scenario_1_merges(), expected);
}

#[test]
fn scenario_2_special_token_atomicity() {
    let tokenizer = TokenizerBuilder::new(scenario_1_merges())
        .with_special(b"<eot>", 267)
        .build()
        .unwrap();

    let ids = tokenizer.encode("<eot>").unwrap();
    assert_eq!(ids, vec![267]);
    assert_eq!(tokenizer.decode(&ids).unwrap(), b"<eot>");
}

#[test]
fn scenario_3_plain_text_round_trip() {
    let tokenizer = TokenizerBuilder::new(scenario_1_merges()).build().unwrap();
    let text = "hello, my friends";
    let ids = tokenizer.encode(text).unwrap();
    assert_eq!(tokenizer.decode(&ids).unwrap(), text.as_bytes());
}

#[test]
fn scenario_6_nihao_merges_to_one_id() {
    let tokenizer = TokenizerBuilder::new(scenario_1_merges()).build().unwrap();
    let ids = tokenizer.encode("你好").unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(tokenizer.decode(&ids).unwrap(), "你好".as_bytes());
}

#[test]
fn invariant_vocab_consistency() {
    let merges = scenario_1_merges();
    let tokenizer = TokenizerBuilder::new(merges.clone()).build().unwrap();
    for (i, &(left, right)) in merges.iter().enumerate() {
        let id = 256 + i as TokenId;
        let expected: Vec<u8> = tokenizer
            .vocab()
            .get(left)
            .unwrap()
            .iter()
            .chain(tokenizer.vocab().get(right).unwrap())
            .copied()
            .collect();
        assert_eq!(tokenizer.vocab().get(id).unwrap(), expected.as_slice());
    }
}

#[test]
fn invariant_acyclicity() {
    let merges = scenario_1_merges();
    for (i, &(left, right)) in merges.iter().enumerate() {
        let ceiling = 256 + i as TokenId;
        assert!(left < ceiling);
        assert!(right < ceiling);
    }
}

#[test]
fn invariant_determinism() {
    let a = scenario_1_merges();
    let b = scenario_1_merges();
    assert_eq!(a, b);

    let tokenizer = TokenizerBuilder::new(a).build().unwrap();
    let ids_a = tokenizer.encode("hello, my friends").unwrap();
    let ids_b = tokenizer.encode("hello, my friends").unwrap();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn invariant_streaming_equivalence() {
    let tokenizer = TokenizerBuilder::new(scenario_1_merges()).build().unwrap();
    let text = "hello, my friends 你好";
    let ids = tokenizer.encode(text).unwrap();

    let mut decoder = tokenizer.stream_decoder();
    let mut assembled = String::new();
    for &id in &ids {
        if let Some(fragment) = decoder.feed(id).unwrap() {
            assembled.push_str(&fragment);
        }
    }
    assert_eq!(assembled, text);
    assert!(decoder.is_empty());
}

#[test]
fn invariant_remap_round_trip() {
    let mut perm = [0u8; 256];
    for (i, p) in perm.iter_mut().enumerate() {
        *p = i as u8;
    }
    perm.swap(7, 250);
    let remap = ByteRemap::from_permutation(perm).unwrap();
    for b in 0..=255u8 {
        assert_eq!(remap.inverse(remap.forward(b)), b);
    }
}

#[test]
fn invariant_continue_training_stability() {
    let total: usize = 8;
    let split: usize = 5;

    let mut one_shot = BpeTrainer::new(scenario_1_corpus().into_iter());
    let mut all_at_once = Vec::new();
    for _ in 0..total {
        all_at_once.push(one_shot.step().unwrap().pair);
    }

    let mut first_half_trainer = BpeTrainer::new(scenario_1_corpus().into_iter());
    let mut first_half = Vec::new();
    for _ in 0..split {
        first_half.push(first_half_trainer.step().unwrap().pair);
    }

    let mut resumed = BpeTrainer::new(scenario_1_corpus().into_iter());
    resumed.load_merges(&first_half).unwrap();
    let mut continued = first_half.clone();
    for _ in 0..(total - split) {
        continued.push(resumed.step().unwrap().pair);
    }

    assert_eq!(all_at_once, continued);
}
