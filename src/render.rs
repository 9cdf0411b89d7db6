pub mod mask;
pub mod raster;
