mod handlers;
mod render;
mod setup;

pub use handlers::run;
