//! Test-only crate: NFR smoke guardrails live under `tests/`.
