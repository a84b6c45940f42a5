//! Integration tests for the chess gate workspace live under `tests/`.
