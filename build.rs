//! Build script that re-runs when the embedded migrations change.
//!
//! `embed_migrations!` reads the SQL files at compile time, but Cargo does not
//! track them as inputs on its own.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
