// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use chainbloom::bloom::BloomFilter;
use chainbloom::bloom::BloomFilterBuilder;
use chainbloom::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::ge;
use googletest::prelude::le;
use googletest::prelude::near;

const NUM_KEYS: usize = 100_000;
const NUM_HASHES: u32 = 4;
const TARGET_FPP: f64 = 0.05;

fn key(prefix: &str, i: usize) -> Vec<u8> {
    format!("{prefix}-{i}").into_bytes()
}

#[test]
fn test_empty() {
    let filter = BloomFilter::new(1_000, NUM_HASHES, TARGET_FPP).unwrap();
    assert!(filter.is_empty());
    assert_eq!(filter.num_bits_set(), 0);
    assert_eq!(filter.projected_fpp(), 0.0);
    assert!(!filter.contains(b"anything"));
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilter::new(20_000, NUM_HASHES, TARGET_FPP).unwrap();

    for i in 0..10_000 {
        filter.insert(&key("word", i));
    }
    for i in 0..10_000 {
        assert!(filter.contains(&key("word", i)));
    }

    // Later unrelated inserts must never unset earlier memberships.
    for i in 0..10_000 {
        filter.insert(&key("other", i));
    }
    for i in 0..10_000 {
        assert!(filter.contains(&key("word", i)));
    }
}

#[test]
fn test_monotonic_fill() {
    let mut filter = BloomFilter::new(1_000, NUM_HASHES, TARGET_FPP).unwrap();

    let mut previous = 0;
    for i in 0..2_000 {
        filter.insert(&key("word", i));
        let current = filter.num_bits_set();
        assert_that!(current, ge(previous));
        assert_that!(current, le(filter.capacity()));
        previous = current;
    }
}

#[test]
fn test_idempotent_insert() {
    let mut filter = BloomFilter::new(1_000, NUM_HASHES, TARGET_FPP).unwrap();

    filter.insert(b"apple");
    let after_first = filter.num_bits_set();

    for _ in 0..10 {
        filter.insert(b"apple");
    }
    assert_eq!(filter.num_bits_set(), after_first);
}

#[test]
fn test_sizing_formula() {
    // phi = 1 - 0.05^(1/4); m = 4 / (1 - phi^(1/100_000)) = 624_699.79...
    let bits = BloomFilterBuilder::required_num_bits(NUM_KEYS as u64, NUM_HASHES, TARGET_FPP);
    assert_eq!(bits, 624_699);

    let filter = BloomFilter::new(NUM_KEYS as u64, NUM_HASHES, TARGET_FPP).unwrap();
    assert_eq!(filter.capacity(), bits);
}

#[test]
fn test_projection_bounds() {
    let mut filter = BloomFilter::new(100, NUM_HASHES, TARGET_FPP).unwrap();
    assert_eq!(filter.projected_fpp(), 0.0);

    // Overfill well past the design point; the projection must stay in [0, 1].
    for i in 0..10_000 {
        filter.insert(&key("word", i));
        let fpp = filter.projected_fpp();
        assert_that!(fpp, ge(0.0));
        assert_that!(fpp, le(1.0));
    }
    assert!(filter.projected_fpp() > TARGET_FPP);
}

#[test]
fn test_end_to_end_false_positive_rate() {
    let mut filter = BloomFilter::new(NUM_KEYS as u64, NUM_HASHES, TARGET_FPP).unwrap();

    for i in 0..NUM_KEYS {
        filter.insert(&key("word", i));
    }

    let misses = (0..NUM_KEYS)
        .filter(|&i| !filter.contains(&key("word", i)))
        .count();
    assert_eq!(misses, 0);

    // A disjoint set of fresh keys, none inserted. The observed false
    // positive rate should track the projection within stochastic noise.
    let false_finds = (0..NUM_KEYS)
        .filter(|&i| filter.contains(&key("fresh", i)))
        .count();
    let actual_rate = false_finds as f64 / NUM_KEYS as f64;

    let projected = filter.projected_fpp();
    assert_that!(projected, ge(0.0));
    assert_that!(projected, le(1.0));
    assert_that!(actual_rate, near(projected, 0.3 * projected));

    // The filter was built for exactly this load, so the projection should
    // also have landed near the design target.
    assert_that!(projected, near(TARGET_FPP, 0.2 * TARGET_FPP));
}

#[test]
fn test_construction_rejects_invalid_parameters() {
    let err = BloomFilter::new(0, NUM_HASHES, TARGET_FPP).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = BloomFilter::new(NUM_KEYS as u64, 0, TARGET_FPP).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = BloomFilter::new(NUM_KEYS as u64, NUM_HASHES, 1.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = BloomFilter::new(NUM_KEYS as u64, NUM_HASHES, 0.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
