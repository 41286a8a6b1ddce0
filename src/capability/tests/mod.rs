//! Unit tests for the capability catalogue and request values.
