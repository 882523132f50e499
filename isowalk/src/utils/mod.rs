//! Decoding helpers shared by the volume and directory layers

pub mod datetime;
pub mod endian;
pub mod sector;
pub mod string;
