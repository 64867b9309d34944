//! Endpoint report client and eligibility filter.
//!
//! One reconciliation pass fetches a single page of endpoint records
//! from the remote health authority and keeps the ports of records
//! explicitly marked ineligible. Absent fields are expected shape
//! variance from the authority, never faults: a record without a usable
//! `_source`, without `eligible: false`, or without a port is skipped.

pub mod client;
pub mod filter;
pub mod records;

pub use client::{AuthorityClient, ReportError};
pub use filter::ineligible_ports;
pub use records::{EndpointRecord, RawNode, ReportPage};
