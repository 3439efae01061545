//! # repfind-cli -- command-line company lookup by INN
//!
//! Reads taxpayer identifiers from a comma-separated list or a workbook
//! column range, resolves each one against the reputation.ru registry
//! through [`repfind_client`], and writes the normalized records to CSV
//! and/or back into the source workbook next to each identifier cell.
//!
//! ## Module layout
//!
//! - [`lookup`] -- the single run handler wiring sources, the client,
//!   and the writers together.
//! - [`source`] -- identifier sourcing: list parsing, A1-range parsing,
//!   workbook column reading.
//! - [`report`] -- the nine-column CSV and workbook writers.

pub mod lookup;
pub mod report;
pub mod source;
