/// `vello_cpu` raster surface.
pub mod cpu;
/// Surface trait and the render pass driver.
pub mod surface;
