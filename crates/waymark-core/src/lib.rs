//! Waymark Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Waymark layout
//! engine and its command-line front end. It includes:
//!
//! - **Flow model**: Input nodes, edges and graphs ([`flow`] module)
//! - **Geometry**: Integer pixel positions and grid snapping ([`geometry`] module)
//! - **Layout output**: Positioned nodes and swim-lane metrics ([`layout`] module)

pub mod flow;
pub mod geometry;
pub mod layout;
