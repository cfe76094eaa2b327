//! Core domain models for Big Mac index price data.
//!
//! This module defines the record-level view of the price table used
//! throughout the pipeline.

pub mod domain;
