pub mod web;

pub use web::spawn_web_server;
