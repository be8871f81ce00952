//! Canvas components and the browser plumbing they share.

mod browser;
pub mod constellation;
pub mod particle_cloud;
