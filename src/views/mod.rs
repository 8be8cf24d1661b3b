pub mod create;
pub mod detail;
pub mod edit;
pub mod form;
pub mod list;
pub mod state;

pub use create::CreateView;
pub use detail::DetailView;
pub use edit::EditView;
pub use form::FormModel;
pub use list::{ListFilter, ListView};
pub use state::{FetchState, SubmitState};
