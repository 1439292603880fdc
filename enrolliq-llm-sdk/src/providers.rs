//! Provider name constants
//!
//! This module defines canonical provider names used throughout the SDK

/// OpenAI provider (and any Chat-Completions-compatible endpoint)
pub const OPENAI: &str = "openai";
