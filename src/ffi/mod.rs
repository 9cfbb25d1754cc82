pub mod exports;
pub mod paths;
