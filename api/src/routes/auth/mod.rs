//! Authentication route handlers
//!
//! Registration, login and refresh are public. Logout and `/me` sit behind
//! [`JwtAuth`].

pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;

use actix_web::web;

use crate::middleware::JwtAuth;

pub use login::login;
pub use logout::logout;
pub use me::me;
pub use refresh::refresh;
pub use register::register;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout).wrap(JwtAuth))
            .route("/me", web::get().to(me).wrap(JwtAuth)),
    );
}
