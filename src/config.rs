//! Configuration Module - Ledger Tuning Parameters
//!
//! Manages all configuration parameters for the allocation ledger.
//! The size-class table, header overhead, and alignment are deliberately
//! configuration rather than hard-coded constants: the numbers any given
//! runtime uses are version-specific and non-portable.

/// Main configuration for the allocation ledger
///
/// Stores all parameters affecting sizing and collection behavior.
/// All parameters have sensible defaults.
///
/// # Examples
///
/// ```rust
/// use alloc_ledger::LedgerConfig;
///
/// // Use default configuration
/// let config = LedgerConfig::default();
///
/// // Custom configuration for a tiny simulated heap
/// let config = LedgerConfig {
///     heap_capacity: 4 * 1024,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Ordered table of small-object size classes in bytes
    ///
    /// Each allocation is rounded up to the smallest class that fits the
    /// payload plus header. Must be non-empty and strictly ascending.
    ///
    /// Default: [8, 16, 32, 48, 64, 128]
    pub size_classes: Vec<usize>,

    /// Fixed per-object header overhead in bytes
    ///
    /// Applied to every object regardless of type: metadata, management
    /// fields, and the attribute reference.
    ///
    /// Default: 16 bytes
    pub header_size: usize,

    /// Alignment for large objects in bytes
    ///
    /// Requests exceeding the largest size class are rounded up to a
    /// multiple of this value. Must be a power of two.
    ///
    /// Default: 8 bytes
    pub alignment: usize,

    /// Simulated heap capacity in bytes
    ///
    /// Total budget for allocated (classified) bytes. When an allocation
    /// cannot be satisfied from the remaining budget, the collector runs;
    /// if it still cannot be satisfied, the allocation fails with OOM.
    ///
    /// Default: 64MB
    pub heap_capacity: usize,
}

impl Default for LedgerConfig {
    /// Default configuration for the ledger
    ///
    /// Size-class values are illustrative small-object buckets, not a
    /// promise of compatibility with any particular runtime.
    fn default() -> Self {
        LedgerConfig {
            size_classes: vec![8, 16, 32, 48, 64, 128],
            header_size: 16,
            alignment: 8,
            heap_capacity: 64 * MB,
        }
    }
}

impl LedgerConfig {
    /// Validate configuration
    ///
    /// Checks if all values are in valid ranges.
    /// Returns error if configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use alloc_ledger::LedgerConfig;
    ///
    /// let config = LedgerConfig {
    ///     heap_capacity: 0,  // Invalid!
    ///     ..Default::default()
    /// };
    ///
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_classes.is_empty() {
            return Err(ConfigError::InvalidSizeClasses(
                "size_classes must not be empty".to_string(),
            ));
        }

        if !self.size_classes.windows(2).all(|w| w[0] < w[1]) {
            return Err(ConfigError::InvalidSizeClasses(
                "size_classes must be strictly ascending".to_string(),
            ));
        }

        if self.size_classes[0] == 0 {
            return Err(ConfigError::InvalidSizeClasses(
                "size classes must be > 0".to_string(),
            ));
        }

        if self.alignment == 0 || !self.alignment.is_power_of_two() {
            return Err(ConfigError::InvalidAlignment(
                "alignment must be a nonzero power of two".to_string(),
            ));
        }

        if self.heap_capacity == 0 {
            return Err(ConfigError::InvalidCapacity(
                "heap_capacity must be > 0".to_string(),
            ));
        }

        // A header larger than every class would mean no request can
        // ever be pooled; that is a misconfiguration, not a table choice.
        let largest = *self.size_classes.last().expect("checked non-empty");
        if largest < self.header_size {
            return Err(ConfigError::InvalidHeaderSize(
                "header_size exceeds the largest size class".to_string(),
            ));
        }

        if largest > self.heap_capacity {
            return Err(ConfigError::InvalidCapacity(
                "heap_capacity smaller than the largest size class".to_string(),
            ));
        }

        Ok(())
    }

    /// Build configuration from environment variables
    ///
    /// Overrides defaults with environment variables:
    /// - ALEDGER_HEAP_CAPACITY
    /// - ALEDGER_HEADER_SIZE
    /// - ALEDGER_ALIGNMENT
    /// - ALEDGER_SIZE_CLASSES (comma-separated, ascending)
    ///
    /// # Examples
    ///
    /// ```bash
    /// export ALEDGER_HEAP_CAPACITY=1048576
    /// export ALEDGER_SIZE_CLASSES=16,32,64,256
    /// ```
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ALEDGER_HEAP_CAPACITY") {
            if let Ok(bytes) = val.parse::<usize>() {
                config.heap_capacity = bytes;
            }
        }

        if let Ok(val) = std::env::var("ALEDGER_HEADER_SIZE") {
            if let Ok(bytes) = val.parse::<usize>() {
                config.header_size = bytes;
            }
        }

        if let Ok(val) = std::env::var("ALEDGER_ALIGNMENT") {
            if let Ok(bytes) = val.parse::<usize>() {
                config.alignment = bytes;
            }
        }

        if let Ok(val) = std::env::var("ALEDGER_SIZE_CLASSES") {
            let classes: Vec<usize> = val
                .split(',')
                .filter_map(|s| s.trim().parse::<usize>().ok())
                .collect();
            if !classes.is_empty() {
                config.size_classes = classes;
            }
        }

        config
    }
}

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid size classes: {0}")]
    InvalidSizeClasses(String),

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),

    #[error("Invalid header size: {0}")]
    InvalidHeaderSize(String),

    #[error("Invalid heap capacity: {0}")]
    InvalidCapacity(String),
}

const MB: usize = 1024 * 1024;
