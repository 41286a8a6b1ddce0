//! Unit tests for the request pipeline.
