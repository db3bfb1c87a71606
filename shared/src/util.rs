//! Utility functions: timestamps, id generation, record codes

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a Snowflake-style i64 for use as resource ID.
///
/// Layout (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER so ids
/// survive a round trip through JSON frontends):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at office scale)
pub fn snowflake_id() -> i64 {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let now = now_millis();
    let ts = (now - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    (ts << 12) | rand_bits
}

/// Generate a human-facing record code: `prefix` followed by 5 random
/// decimal digits.
///
/// Not guaranteed unique. Uniqueness is enforced at the persistence
/// boundary (collision re-roll on save), not here.
pub fn generate_code(prefix: &str) -> String {
    use rand::Rng;
    let digits: u32 = rand::thread_rng().gen_range(0..100_000);
    format!("{}{:05}", prefix, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_shape() {
        let code = generate_code("QT");
        assert_eq!(code.len(), 7);
        assert!(code.starts_with("QT"));
        assert!(code[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_code_empty_prefix() {
        let code = generate_code("");
        assert_eq!(code.len(), 5);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_snowflake_id_positive_and_monotonic_scale() {
        let id = snowflake_id();
        assert!(id > 0);
        // 53-bit bound (JSON-safe)
        assert!(id < (1_i64 << 53));
    }
}
