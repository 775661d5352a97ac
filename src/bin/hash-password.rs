//! Hashes a password for the ADMIN_HASH_PASSWORD env var.
//!
//! Usage: cargo run --bin hash-password -- <password>

use bcrypt::{hash, DEFAULT_COST};

fn main() {
    let password = match std::env::args().nth(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: hash-password <password>");
            std::process::exit(2);
        }
    };

    match hash(&password, DEFAULT_COST) {
        Ok(hashed) => println!("{hashed}"),
        Err(e) => {
            eprintln!("failed to hash password: {e}");
            std::process::exit(1);
        }
    }
}
