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

//! Keyed hash primitives backing the filter's index derivation.

use byteorder::ByteOrder;
use byteorder::LittleEndian;

mod xxhash;
pub use self::xxhash::XxHash64;
pub use self::xxhash::xxhash64;

/// Seed used for the first link of every hash chain.
pub const DEFAULT_HASH_SEED: u64 = 0;

/// A deterministic keyed hash function.
///
/// For a fixed key, varying the seed must produce statistically independent,
/// uniformly distributed outputs; for a fixed seed, varying the key must do
/// the same. Only statistical uniformity is required, not cryptographic
/// strength. The quality of the source directly determines how closely the
/// filter's observed false positive rate tracks its projected one.
pub trait KeyedHashSource {
    /// Hashes `key` under `seed`, returning the full 64-bit output.
    fn hash(&self, key: &[u8], seed: u64) -> u64;
}

/// Reads up to 8 bytes as a little-endian, zero-extended u64.
pub(crate) fn read_u64_le(bytes: &[u8]) -> u64 {
    LittleEndian::read_uint(bytes, bytes.len())
}
