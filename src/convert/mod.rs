//! Coordinate conversion between c., transcript and genomic positions

pub mod mapper;

pub use mapper::CoordinateMapper;
