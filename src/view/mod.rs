//! Page controllers. Each one owns the state of a single render.

pub mod detail;
pub mod list;

pub use detail::DetailView;
pub use list::ListView;
