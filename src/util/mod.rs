pub(crate) mod array_str;
pub(crate) mod itime;
