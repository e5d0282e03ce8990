pub(crate) mod bridge;
pub(crate) mod types;
pub(crate) mod withdraw;
