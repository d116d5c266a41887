//! Test-only crate: frozen-contract validation lives under `tests/`.
