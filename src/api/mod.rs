mod handlers;
mod page;
mod routes;
mod state;

pub use page::{escape_html, render_page, PageOutcome};
pub use routes::create_router;
pub use state::AppState;
