// Resource facades: one per domain noun, each a thin call-through into the
// shared request execution core.

pub mod columns;
pub mod rows;
pub mod search;
pub mod sheets;

pub use columns::SheetColumnResources;
pub use rows::RowResources;
pub use search::SearchResources;
pub use sheets::SheetResources;
