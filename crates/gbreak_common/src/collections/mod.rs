mod ordered_map;

pub use ordered_map::*;
