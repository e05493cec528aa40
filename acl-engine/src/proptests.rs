//! Property-based tests for the engine's set algebra.
