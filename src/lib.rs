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

//! A chained-seed Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter answers "might this key be a member?" over a fixed-size
//! bit array: no false negatives, a tunable false positive rate, and far
//! less memory than an exact set.
//!
//! This implementation derives its `k` bit positions by *chained seeding*:
//! the first hash of a key uses seed 0, and each subsequent hash uses the
//! raw 64-bit output of the previous one as its seed. A single keyed hash
//! primitive thus stands in for `k` independent hash functions.
//!
//! # Usage
//!
//! ```rust
//! use chainbloom::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(10_000, 4, 0.05).unwrap();
//!
//! filter.insert(b"apple");
//! assert!(filter.contains(b"apple"));
//! assert!(!filter.contains(b"grape"));
//!
//! let fpp = filter.projected_fpp();
//! assert!(fpp < 0.05);
//! ```

pub mod bloom;
pub mod error;
pub mod hash;
