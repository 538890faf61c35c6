#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Marcline
//!
//! A Rust library for parsing line-oriented MARC21 textual exports, as
//! produced by cataloging and scan pipelines, into validated flat book
//! edition records.
//!
//! ## Quick Start
//!
//! ```
//! let raw = "\
//! 020\t\t\t$a 9780140449136$c 120000
//! 245\t1\t0\t$a The Odyssey$b an epic poem
//! 260\t\t\t$b Penguin Classics$c 2003";
//!
//! let record = marcline::parse(raw).expect("record validates");
//! assert_eq!(record.title, "The Odyssey");
//! assert_eq!(record.isbn.as_deref(), Some("9780140449136"));
//! assert_eq!(record.publication_year, Some(2003));
//! ```
//!
//! Validation failures are collected per field rather than aborting at the
//! first violation:
//!
//! ```
//! let errors = marcline::parse("500\t\t\t$a A note, but no title").unwrap_err();
//! assert!(errors.contains_field("title"));
//! ```
//!
//! ## Pipeline
//!
//! Parsing is a single stateless pass through four stages, each available
//! as its own module for callers that need the intermediates:
//!
//! - [`line`] — Line normalization: continuation merging and synthetic
//!   author-role insertion
//! - [`subfield`] — Splitting field content on `$<code>` markers
//! - [`template`] — The declarative tag/subfield mapping table and its
//!   value transforms
//! - [`extract`] — Template-driven extraction into an ordered intermediate
//!   record
//! - [`postprocess`] — Field recombination (joins and positional
//!   author/role pairing)
//! - [`validate`] — Schema validation with collect-all error reporting
//! - [`record`] — The validated [`EditionRecord`] output type
//! - [`isbn`] — ISBN normalization and checksum helpers
//! - [`error`] — Warning and error types
//!
//! Stages before validation never fail: malformed per-field data degrades
//! to "field absent" and is reported through [`ParseWarning`]s by
//! [`parse_verbose`].

pub mod error;
pub mod extract;
pub mod isbn;
pub mod line;
pub mod parser;
pub mod postprocess;
pub mod record;
pub mod subfield;
pub mod template;
pub mod validate;

pub use error::{FieldError, ParseWarning, Result, ValidationErrors, Violation};
pub use extract::{extract as extract_fields, ExtractedRecord, FieldValue, Slot};
pub use line::{normalize, SourceLine, NOT_MENTIONED};
pub use parser::{parse, parse_verbose, ParseReport};
pub use postprocess::postprocess;
pub use record::EditionRecord;
pub use subfield::{split_subfields, Subfield};
pub use template::{fields, FieldTemplate, Transform, TEMPLATES};
pub use validate::Validator;
