//! Binary entry point. Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    folio_backend::run().await;
}
