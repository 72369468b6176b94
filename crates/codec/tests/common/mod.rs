//! Shared helpers for the codec test suite.
