pub mod bisect;
pub mod float_ext;
pub mod interp;
pub mod smooth;
