mod handler;
mod view;

pub use handler::{HOME_LIMIT, detail, home, list};
