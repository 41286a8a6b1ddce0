//! Unit tests for the capability router.
