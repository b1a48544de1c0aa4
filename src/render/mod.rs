/// `vello_cpu` surface.
pub mod cpu;
/// Font discovery and loading.
pub mod fonts;
/// The drawing interface the layout engine targets.
pub mod surface;
