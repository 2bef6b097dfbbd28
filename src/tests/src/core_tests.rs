//! Tests for the core crate.

use rand::Rng;
use txmerkle_core::{
    combine, double_hash, verify, Digest, MerkleEngine, MerkleError, MerkleTree, Proof, Side,
};

fn tx_ids(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("tx{}", i)).collect()
}

fn random_ids(rng: &mut impl Rng, n: usize) -> Vec<String> {
    (0..n)
        .map(|_| {
            let bytes: [u8; 16] = rng.gen();
            bytes.iter().map(|b| format!("{:02x}", b)).collect()
        })
        .collect()
}

// Number of hops at which the leaf at `index` has a sibling.
fn expected_proof_len(mut index: usize, leaf_count: usize) -> usize {
    let mut len = leaf_count;
    let mut steps = 0;
    while len > 1 {
        if index % 2 == 1 || index + 1 < len {
            steps += 1;
        }
        index /= 2;
        len = (len + 1) / 2;
    }
    steps
}

fn flip_byte(digest: &Digest, at: usize) -> Digest {
    let mut bytes = *digest.as_bytes();
    bytes[at] ^= 0x01;
    Digest::new(bytes)
}

/// The root of `[a, b, c]` pairs `a` and `b`, then joins the promoted `c`.
#[test]
fn test_known_roots() {
    let (a, b, c) = (double_hash("a"), double_hash("b"), double_hash("c"));

    assert_eq!(MerkleTree::build(["a"]).unwrap().root(), a);
    assert_eq!(MerkleTree::build(["a", "b"]).unwrap().root(), combine(&a, &b));
    assert_eq!(
        MerkleTree::build(["a", "b", "c"]).unwrap().root(),
        combine(&combine(&a, &b), &c)
    );
}

/// Tests that building is deterministic and order-sensitive.
#[test]
fn test_determinism_and_order() {
    let mut engine = MerkleEngine::new();
    let first = engine.build_root(tx_ids(7)).unwrap();
    let second = engine.build_root(tx_ids(7)).unwrap();
    assert_eq!(first, second);

    let swapped = engine.build_root(["tx2", "tx1"]).unwrap();
    let original = engine.build_root(["tx1", "tx2"]).unwrap();
    assert_ne!(swapped, original);
}

/// Every leaf of every tree up to 8 leaves proves and verifies.
#[test]
fn test_proof_matrix() {
    for n in 1..=8 {
        let ids = tx_ids(n);
        let mut engine = MerkleEngine::new();
        let root = engine.build_root(&ids).unwrap();

        for (i, id) in ids.iter().enumerate() {
            let outcome = engine.query(id).unwrap();
            assert!(outcome.present, "tx{} of {}", i + 1, n);
            assert_eq!(outcome.root, Some(root));

            let proof = outcome.proof.unwrap();
            assert_eq!(proof.len(), expected_proof_len(i, n), "tx{} of {}", i + 1, n);
            assert!(verify(id, &proof, &root), "tx{} of {}", i + 1, n);
        }

        let outcome = engine.query("not-a-leaf").unwrap();
        assert!(!outcome.present);
        assert!(outcome.proof.is_none());
    }
}

/// Random ids and sizes keep the matrix property.
#[test]
fn test_random_trees() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let n = rng.gen_range(1..=40);
        let ids = random_ids(&mut rng, n);
        let tree = MerkleTree::build(&ids).unwrap();

        let pick = rng.gen_range(0..n);
        let proof = tree.query(&ids[pick]).proof.unwrap();
        assert!(proof.verify(&ids[pick], &tree.root()));
        assert_eq!(proof.len(), expected_proof_len(pick, n));
    }
}

/// Tampered proofs and wrong roots are rejected without error.
#[test]
fn test_tampering() {
    let ids = tx_ids(6);
    let tree = MerkleTree::build(&ids).unwrap();
    let root = tree.root();

    for id in &ids {
        let proof = tree.query(id).proof.unwrap();
        for i in 0..proof.len() {
            let mut steps = proof.steps().to_vec();
            steps[i].sibling = flip_byte(&steps[i].sibling, 7);
            assert!(!verify(id, &Proof::new(steps), &root));

            let mut steps = proof.steps().to_vec();
            steps[i].side = match steps[i].side {
                Side::Left => Side::Right,
                Side::Right => Side::Left,
            };
            assert!(!verify(id, &Proof::new(steps), &root));
        }
        assert!(!verify(id, &proof, &flip_byte(&root, 0)));
        assert!(!verify("tx9", &proof, &root));
    }
}

/// The four-transaction walkthrough.
#[test]
fn test_four_transactions() {
    let mut engine = MerkleEngine::new();
    let ids = ["tx1", "tx2", "tx3", "tx4"];
    let root = engine.build_root(ids).unwrap();
    assert_eq!(engine.build_root(ids).unwrap(), root);

    let outcome = engine.query("tx3").unwrap();
    assert!(outcome.present);
    let proof = outcome.proof.unwrap();
    assert_eq!(proof.len(), 2);
    assert_eq!(proof.steps()[0].sibling, double_hash("tx4"));
    assert_eq!(proof.steps()[0].side, Side::Right);
    assert_eq!(
        proof.steps()[1].sibling,
        combine(&double_hash("tx1"), &double_hash("tx2"))
    );
    assert_eq!(proof.steps()[1].side, Side::Left);
    assert!(verify("tx3", &proof, &outcome.root.unwrap()));

    let missing = engine.query("tx9").unwrap();
    assert!(!missing.present);
    assert!(missing.proof.is_none());
}

/// Trees are independent values and outlive the engine that built them.
#[test]
fn test_trees_are_owned_values() {
    let mut engine = MerkleEngine::new();
    engine.build_root(tx_ids(3)).unwrap();
    let tree = engine.into_tree().unwrap();

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let tree = tree.clone();
            std::thread::spawn(move || {
                let id = format!("tx{}", i + 1);
                let proof = tree.query(&id).proof.unwrap();
                verify(&id, &proof, &tree.root())
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

/// Errors surface as values, not panics.
#[test]
fn test_error_cases() {
    let mut engine = MerkleEngine::new();
    assert_eq!(engine.query("tx1"), Err(MerkleError::NotBuilt));
    assert_eq!(engine.layers().unwrap_err(), MerkleError::NotBuilt);

    let empty: Vec<String> = Vec::new();
    assert!(matches!(
        engine.build_root(empty),
        Err(MerkleError::InvalidInput(_))
    ));

    let proof = Proof::default();
    assert!(proof.verify_with_error("tx1", &double_hash("tx2")).is_err());
}

/// Proofs survive both encodings and still verify.
#[test]
fn test_proof_encodings() {
    let ids = tx_ids(5);
    let tree = MerkleTree::build(&ids).unwrap();
    let proof = tree.query("tx2").proof.unwrap();

    let decoded = Proof::from_bytes(&proof.to_bytes().unwrap()).unwrap();
    assert!(verify("tx2", &decoded, &tree.root()));

    let json = serde_json::to_string(&proof).unwrap();
    let parsed: Proof = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, proof);
}
