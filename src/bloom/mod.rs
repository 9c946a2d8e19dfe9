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

//! Chained-seed Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter is a fixed-size bit array with `k` hash-derived bit
//! positions per key. Membership queries have no false negatives and a
//! tunable false positive rate. This implementation derives the `k`
//! positions with chained seeding: hash `i + 1` is seeded with the raw,
//! unreduced output of hash `i`, so one keyed hash primitive replaces `k`
//! independent hash functions.
//!
//! # Usage
//!
//! ```rust
//! use chainbloom::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1_000, 4, 0.05).unwrap();
//!
//! filter.insert(b"apple");
//! assert!(filter.contains(b"apple"));
//!
//! println!("projected fpp: {}", filter.projected_fpp());
//! ```
//!
//! # Notes
//!
//! - The filter never resizes; capacity is fixed at construction.
//! - Keys cannot be removed.
//! - Insertion never fails; only construction is fallible.

mod builder;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::sketch::BloomFilter;
