//! Key lookup data stored alongside the keys: two hashes per key and a 256-bucket
//! chained table.
//!
//! Bucket `b` holds the index of the first key whose hash A ends in `b`; each key's
//! link holds the index of the next key in the same bucket, with 0 ending the chain.
//! Key 0 always heads its bucket, so a link of 0 is never ambiguous.

use crate::binary::layout::{gmd_buckets, gmd_key_info};

/// Per-key lookup record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRecord {
    pub hash_a: u32,
    pub hash_b: u32,
    pub filler: u32,
    pub link: u64,
}

/// Lookup data for a whole table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyIndex {
    pub records: Vec<KeyRecord>,
    /// Empty when the table has no keys
    pub buckets: Vec<u64>,
}

/// Hashes of a key: inverted CRC-32 of the key repeated twice and three times
pub fn key_hashes(key: &str) -> (u32, u32) {
    (repeated_crc(key, 2), repeated_crc(key, 3))
}

fn repeated_crc(key: &str, times: usize) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    for _ in 0..times {
        hasher.update(key.as_bytes());
    }
    !hasher.finalize()
}

pub fn bucket_of(hash_a: u32) -> usize {
    (hash_a as usize) % gmd_buckets::COUNT
}

impl KeyIndex {
    /// Compute hashes and chains for keys in table order
    pub fn build<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records: Vec<KeyRecord> = keys
            .into_iter()
            .map(|key| {
                let (hash_a, hash_b) = key_hashes(key);
                KeyRecord {
                    hash_a,
                    hash_b,
                    filler: gmd_key_info::FILLER_VALUE,
                    link: 0,
                }
            })
            .collect();

        if records.is_empty() {
            return Self::default();
        }

        let mut buckets = vec![0u64; gmd_buckets::COUNT];
        let mut tails: Vec<Option<usize>> = vec![None; gmd_buckets::COUNT];
        for index in 0..records.len() {
            let bucket = bucket_of(records[index].hash_a);
            match tails[bucket] {
                None => buckets[bucket] = index as u64,
                Some(previous) => records[previous].link = index as u64,
            }
            tails[bucket] = Some(index);
        }

        Self { records, buckets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_hashes_use_repeated_key() {
        let (a, b) = key_hashes("abc");
        assert_eq!(a, !crc32fast::hash(b"abcabc"));
        assert_eq!(b, !crc32fast::hash(b"abcabcabc"));
    }

    #[test]
    fn test_empty_index_has_no_buckets() {
        let index = KeyIndex::build(std::iter::empty());
        assert!(index.records.is_empty());
        assert!(index.buckets.is_empty());
    }

    /// Indices of the keys chained in `bucket`, following the links
    fn walk_bucket(index: &KeyIndex, bucket: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut current = index.buckets[bucket] as usize;
        while let Some(record) = index.records.get(current) {
            if bucket_of(record.hash_a) != bucket {
                break;
            }
            chain.push(current);
            if record.link == 0 {
                break;
            }
            current = record.link as usize;
        }
        chain
    }

    #[test]
    fn test_every_key_is_reachable_from_its_bucket() {
        let keys: Vec<String> = (0..600).map(|i| format!("KEY_{:04}", i)).collect();
        let index = KeyIndex::build(keys.iter().map(String::as_str));
        assert_eq!(index.buckets.len(), gmd_buckets::COUNT);

        for (i, record) in index.records.iter().enumerate() {
            assert_eq!(record.filler, gmd_key_info::FILLER_VALUE);
            let chain = walk_bucket(&index, bucket_of(record.hash_a));
            assert!(chain.contains(&i), "key {} not in its bucket chain", i);
            // Chains follow table order
            assert!(chain.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
