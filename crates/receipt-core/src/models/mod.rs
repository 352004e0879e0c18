//! Data models for the ingestion pipeline.

pub mod config;
pub mod event;
pub mod expense;
