//! Tests for verbosity-to-level mapping and subscriber installation

#[cfg(test)]
mod tests {
    use pixelbloom::io::logging::{init, level_for};

    // Tests each verbosity step maps to the next level and quiet wins
    // Verified by ignoring the quiet flag
    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(9, false), "trace");
        assert_eq!(level_for(3, true), "error");
    }

    // Tests a second installation reports the existing subscriber
    // Verified by panicking on double installation
    #[test]
    fn test_init_once() {
        let _ = init(1, false);
        assert!(!init(1, false));
    }
}
