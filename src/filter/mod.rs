pub(crate) mod mipmap;
pub(crate) mod sat;
