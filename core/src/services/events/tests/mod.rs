//! Tests for event dispatch
