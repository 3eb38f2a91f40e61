//! Concord Core Types and Definitions
//!
//! This crate provides the foundational types for the Concord diagram merge
//! toolchain. It includes:
//!
//! - **Elements**: Class nodes and relation edges ([`element`] module)
//! - **Kinds**: The closed set of relation kinds ([`kind`] module)
//! - **Diagrams**: The diagram container type ([`diagram`] module)

pub mod diagram;
pub mod element;
pub mod kind;

pub use diagram::Diagram;
pub use element::{ClassNode, Origin, RelationEdge};
pub use kind::RelationKind;
