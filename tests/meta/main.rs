//! Repository layout conventions
