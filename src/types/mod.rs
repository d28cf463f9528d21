//! Core value types shared by entities and the PRC writer

pub mod bounds;
pub mod color;
pub mod uid;
pub mod vector;

pub use bounds::BoundingBox3D;
pub use color::RgbaColor;
pub use uid::Uid;
pub use vector::Vector3;
