//! Tarot retrieval engine for the HealMate chatbot.
//!
//! Arcana turns the Rider-Waite deck into a searchable semantic index: an
//! offline pipeline builds a canonical 156-record card corpus (78 cards ×
//! 2 orientations), embeds it, and loads it into a Qdrant collection; an
//! online query service embeds free text and returns the closest card
//! meanings above a similarity threshold for an LLM to interpret.
//!
//! # Architecture
//!
//! - **Corpus**: deterministic builder from raw card facts to ID-ordered,
//!   validated records; flat JSON corpus file shared with the random-draw
//!   fallback
//! - **Embeddings**: [`embedding::EmbeddingProvider`] adapters over a local
//!   Ollama server or the OpenAI API, selected once at startup
//! - **Index**: idempotent collection setup and batched upsert into Qdrant
//!   (cosine distance), collection named after provider + model
//! - **Retrieval**: one embedding call per query, threshold-filtered ranked
//!   payloads; an empty result is a valid outcome
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`corpus`] — Canonical deck data, corpus builder, file I/O, random draw
//! - [`embedding`] — Embedding provider adapters (Ollama, OpenAI)
//! - [`index`] — Qdrant store client and bulk index loader
//! - [`query`] — The online retrieval query service
//! - [`error`] — Typed error taxonomy shared across the crate

pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod query;
