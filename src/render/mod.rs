pub(crate) mod frame;
pub(crate) mod shapes;
pub(crate) mod surface;
