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

use crate::bloom::sketch::BloomFilter;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::KeyedHashSource;
use crate::hash::XxHash64;

/// Builder for creating [`BloomFilter`] instances.
///
/// The three sizing parameters are fixed up front; the hash source can be
/// swapped before building.
///
/// # Examples
///
/// ```
/// use chainbloom::bloom::BloomFilter;
///
/// let filter = BloomFilter::builder(10_000, 4, 0.05).build().unwrap();
/// assert_eq!(filter.num_bits_set(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder<H: KeyedHashSource = XxHash64> {
    expected_keys: u64,
    num_hashes: u32,
    target_fpp: f64,
    hasher: H,
}

impl BloomFilterBuilder {
    /// Creates a builder for a filter sized to hold `expected_keys` keys
    /// with `num_hashes` hash derivations per key and a target false
    /// positive rate of `target_fpp`, using the default hash source.
    pub fn new(expected_keys: u64, num_hashes: u32, target_fpp: f64) -> Self {
        BloomFilterBuilder {
            expected_keys,
            num_hashes,
            target_fpp,
            hasher: XxHash64,
        }
    }

    /// Computes the number of bits a filter must allocate for the given
    /// parameters.
    ///
    /// The derivation works per hash function: `phi = 1 - p^(1/k)` is the
    /// fill ratio at which `k` hash probes produce false positives at rate
    /// `p`, and `m = k / (1 - phi^(1/n))` is the bit count that reaches
    /// that ratio after `n` insertions. The result is truncated to an
    /// integer.
    ///
    /// Callers must supply `expected_keys > 0`, `num_hashes > 0`, and
    /// `target_fpp` in `(0, 1)`; the formula is degenerate otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbloom::bloom::BloomFilterBuilder;
    ///
    /// let bits = BloomFilterBuilder::required_num_bits(100_000, 4, 0.05);
    /// assert_eq!(bits, 624_699);
    /// ```
    pub fn required_num_bits(expected_keys: u64, num_hashes: u32, target_fpp: f64) -> u64 {
        let n = expected_keys as f64;
        let k = num_hashes as f64;

        let phi = 1.0 - target_fpp.powf(1.0 / k);
        let bits = k / (1.0 - phi.powf(1.0 / n));

        bits as u64
    }
}

impl<H: KeyedHashSource> BloomFilterBuilder<H> {
    /// Replaces the hash source used by the built filter.
    ///
    /// Filters built with different sources address different bit
    /// positions for the same key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbloom::bloom::BloomFilter;
    /// use chainbloom::hash::XxHash64;
    ///
    /// let filter = BloomFilter::builder(100, 4, 0.05)
    ///     .hasher(XxHash64)
    ///     .build()
    ///     .unwrap();
    /// assert!(!filter.contains(b"apple"));
    /// ```
    pub fn hasher<H2: KeyedHashSource>(self, hasher: H2) -> BloomFilterBuilder<H2> {
        BloomFilterBuilder {
            expected_keys: self.expected_keys,
            num_hashes: self.num_hashes,
            target_fpp: self.target_fpp,
            hasher,
        }
    }

    /// Builds the Bloom filter, allocating its bit array.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if `expected_keys` or
    /// `num_hashes` is zero, if `target_fpp` is not in `(0, 1)`, or if the
    /// computed capacity truncates to zero bits.
    pub fn build(self) -> Result<BloomFilter<H>, Error> {
        if self.expected_keys == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "expected_keys must be greater than 0",
            ));
        }
        if self.num_hashes == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "num_hashes must be greater than 0",
            ));
        }
        if !(self.target_fpp > 0.0 && self.target_fpp < 1.0) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "target_fpp must be in (0, 1)",
            )
            .with_context("target_fpp", self.target_fpp));
        }

        let capacity_bits =
            BloomFilterBuilder::required_num_bits(self.expected_keys, self.num_hashes, self.target_fpp);
        if capacity_bits == 0 {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "computed capacity is below 1 bit",
            )
            .with_context("expected_keys", self.expected_keys)
            .with_context("num_hashes", self.num_hashes)
            .with_context("target_fpp", self.target_fpp));
        }

        Ok(BloomFilter::with_capacity(
            capacity_bits,
            self.num_hashes,
            self.hasher,
        ))
    }
}
