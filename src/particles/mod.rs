pub(crate) mod ambient;
pub(crate) mod arena;
pub(crate) mod burst;
