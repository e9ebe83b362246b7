// Domain layer: models, the polymorphic cell-value codec, and ports (interfaces).

pub mod model;
pub mod object_value;
pub mod ports;
