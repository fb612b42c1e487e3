//! Property-based tests for privilege bit-set algebra.
