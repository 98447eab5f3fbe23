pub use crate::{
    bytes::*,
    collections::OrderedMap,
};
