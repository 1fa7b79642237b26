pub(crate) mod calc;
pub(crate) mod records;
pub(crate) mod theme;
