//! Integration tests for the Bloom filter dictionary.

use bloomspell::digest::{DigestAlgorithm, Digester};
use bloomspell::error::{BloomspellError, Result};
use bloomspell::membership::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_parameter_derivation() -> Result<()> {
    let params = BloomParameters::from_false_positive_probability(0.1, 1000)?;

    let k = (-(0.1f64).log2()).ceil() as u32;
    let c = k as f64 / std::f64::consts::LN_2;
    assert_eq!(params.hash_rounds(), k);
    assert_eq!(params.hash_rounds(), 4);
    assert!((params.bits_per_element() - c).abs() < 1e-12);
    assert_eq!(params.num_bits(), (c * 1000.0).ceil() as usize);
    assert_eq!(params.num_bits(), 5771);

    Ok(())
}

#[test]
fn test_invalid_construction() {
    let cases = [
        BloomParameters::from_false_positive_probability(0.0, 10),
        BloomParameters::from_false_positive_probability(1.0, 10),
        BloomParameters::from_false_positive_probability(0.5, 0),
        BloomParameters::explicit(0.0, 10, 3),
        BloomParameters::explicit(-1.0, 10, 3),
        BloomParameters::explicit(4.0, 10, 0),
        BloomParameters::from_bit_set_size(0, 10),
    ];

    for result in cases {
        assert!(matches!(result, Err(BloomspellError::InvalidParameter(_))));
    }
}

#[test]
fn test_no_false_negatives_across_insertions() -> Result<()> {
    let params = BloomParameters::from_false_positive_probability(0.05, 500)?;
    let mut filter = BloomFilter::for_strings(params, Digester::default());

    let words: Vec<String> = (0..500).map(|i| format!("word{i}")).collect();
    for (i, word) in words.iter().enumerate() {
        filter.insert(word.as_str());
        assert!(filter.contains(word.as_str()));
        // Earlier words survive later insertions.
        assert!(words[..=i].iter().all(|w| filter.contains(w.as_str())));
    }
    assert_eq!(filter.len(), 500);

    Ok(())
}

#[test]
fn test_bit_positions_are_deterministic() -> Result<()> {
    let params = BloomParameters::explicit(10.0, 100, 7)?;
    let first = BloomFilter::for_strings(params, Digester::default());
    let second = BloomFilter::for_strings(params, Digester::default());

    for word in ["alpha", "beta", "gamma"] {
        let indices = first.bit_indices(word);
        assert_eq!(indices.len(), 7);
        assert_eq!(indices, first.bit_indices(word));
        assert_eq!(indices, second.bit_indices(word));
        assert!(indices.iter().all(|&i| i < params.num_bits()));
    }

    Ok(())
}

#[test]
fn test_digest_choice_changes_positions() -> Result<()> {
    let params = BloomParameters::explicit(10.0, 100, 4)?;
    let sha256 = BloomFilter::for_strings(params, Digester::new(DigestAlgorithm::Sha256));
    let sha512 = BloomFilter::for_strings(params, Digester::new(DigestAlgorithm::Sha512));

    assert_ne!(sha256.bit_indices("spelling"), sha512.bit_indices("spelling"));
    assert!(matches!(
        Digester::from_name("MD2"),
        Err(BloomspellError::DigestUnavailable(_))
    ));

    Ok(())
}

#[test]
fn test_false_positive_rate_converges() -> Result<()> {
    let n = 2000;
    let params = BloomParameters::from_false_positive_probability(0.05, n)?;
    let mut filter: BloomFilter<u64> = BloomFilter::with_canonicalizer(
        params,
        Digester::default(),
        Box::new(|key: &u64| key.to_string()),
    );

    let mut rng = StdRng::seed_from_u64(42);
    let mut inserted = std::collections::HashSet::new();
    while inserted.len() < n {
        let key = rng.random::<u64>();
        if inserted.insert(key) {
            filter.insert(&key);
        }
    }

    let samples = 20_000;
    let mut positives = 0;
    let mut tested = 0;
    while tested < samples {
        let key = rng.random::<u64>();
        if inserted.contains(&key) {
            continue;
        }
        tested += 1;
        if filter.contains(&key) {
            positives += 1;
        }
    }

    let observed = positives as f64 / samples as f64;
    let expected = filter.false_positive_probability_for(n as f64);
    assert!(
        (observed - expected).abs() < 0.02,
        "observed {observed}, expected {expected}"
    );

    Ok(())
}

#[test]
fn test_probability_query_over_any_count() -> Result<()> {
    let params = BloomParameters::explicit(8.0, 1000, 5)?;
    let filter = BloomFilter::for_strings(params, Digester::default());

    assert_eq!(filter.false_positive_probability_for(0.0), 0.0);
    let half = filter.false_positive_probability_for(500.0);
    let full = filter.false_positive_probability_for(1000.0);
    let over = filter.false_positive_probability_for(5000.0);
    assert!(half < full && full < over);
    assert!((full - params.expected_false_positive_probability()).abs() < 1e-12);
    // Empty filter reports no false positives yet.
    assert_eq!(filter.false_positive_probability(), Some(0.0));

    Ok(())
}

#[test]
fn test_backends_share_one_interface() -> Result<()> {
    let params = BloomParameters::from_false_positive_probability(0.01, 10)?;
    let mut backends: Vec<Box<dyn MembershipSet<str>>> = vec![
        Box::new(ExactSet::for_strings()),
        Box::new(BloomFilter::for_strings(params, Digester::default())),
    ];

    for set in backends.iter_mut() {
        assert!(set.is_empty());
        set.insert("book");
        set.insert("shelf");
        assert!(set.contains("book"));
        assert!(set.contains("shelf"));
        assert_eq!(set.len(), 2);
    }
    assert_eq!(backends[0].backend(), Backend::Exact);
    assert_eq!(backends[1].backend(), Backend::Bloom);
    assert!(backends[0].false_positive_probability().is_none());

    Ok(())
}
