//! Unit tests for handler registration and resolution.
