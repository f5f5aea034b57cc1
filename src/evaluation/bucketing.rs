use sha2::{Digest, Sha256};

const BUCKETS: u32 = 100;

/// Deterministic rollout bucket in `1..=100` for `identifier` under `salt`.
///
/// SHA-256 over `"{identifier}:{salt}"`, first four digest bytes read as a
/// big-endian `u32`, reduced modulo 100 and shifted up by one. The result is
/// identical across processes, hosts and languages, so a user keeps their
/// bucket across restarts. Percentage rules pass their own id as the salt.
pub fn bucket(identifier: &str, salt: &str) -> u8 {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(b":");
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();

    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (prefix % BUCKETS) as u8 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    #[test]
    fn test_bucket_is_stable() {
        // Pinned so any change to the hashing scheme is caught.
        assert_eq!(bucket("user-123", "rule-2"), 42);
        assert_eq!(bucket("user-999", "rule-2"), 18);
        assert_eq!(bucket("bob", "rule-2"), 2);
        assert_eq!(bucket("user-7", "rule-2"), 1);

        assert_eq!(bucket("user-123", "rule-2"), bucket("user-123", "rule-2"));
    }

    #[test]
    fn test_salt_changes_bucket() {
        assert_eq!(bucket("user-999", "rule-1"), 97);
        assert_ne!(bucket("user-999", "rule-1"), bucket("user-999", "rule-2"));
    }

    #[test]
    fn test_bucket_range() {
        for i in 0..10_000 {
            let b = bucket(&format!("user-{i}"), "rollout");
            assert!((1..=100).contains(&b), "bucket {b} out of range");
        }
        assert!((1..=100).contains(&bucket("", "")));
    }

    #[test]
    fn test_bucket_distribution_is_uniform() {
        let mut rng = rand::thread_rng();
        let mut counts = [0u32; 101];
        let samples = 100_000;

        for _ in 0..samples {
            let identifier: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(16)
                .map(char::from)
                .collect();
            counts[bucket(&identifier, "rollout") as usize] += 1;
        }

        assert_eq!(counts[0], 0);
        let expected = samples / 100;
        for (b, count) in counts.iter().enumerate().skip(1) {
            assert!(
                count.abs_diff(expected) < 250,
                "bucket {b} got {count} hits, expected about {expected}"
            );
        }
    }
}
