//! Seeds the active backend with the bundled sample dataset.
//!
//! With DATABASE_URL set this initializes the schema and bulk-creates the
//! samples against Postgres; without it the records land in the local
//! fallback store. Regular collections go through `Repository::create`, so
//! seeded records get fresh identities; the singleton profile keeps its
//! fixed id.
//!
//! Usage: cargo run --bin seed

use folio_backend::db;
use folio_backend::model::{Article, Credential, Entity, PortfolioEntry, Profile, ServiceListing};
use folio_backend::repo::Repository;
use folio_backend::store::samples;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

async fn seed_collection<T: Entity>() -> Result<usize> {
    let repo: Repository<T> = Repository::new();
    let records = samples::records(T::COLLECTION);
    let items = records.as_array().cloned().unwrap_or_default();

    let mut created = 0;
    for payload in items {
        repo.create(payload).await?;
        created += 1;
    }
    Ok(created)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    if std::env::var("DATABASE_URL").is_ok() {
        let pool = db::init_pool(None).await?;
        db::run_migrations(&pool).await?;
    } else {
        tracing::info!("DATABASE_URL not set; seeding the local fallback store");
    }

    let articles = seed_collection::<Article>().await?;
    let projects = seed_collection::<PortfolioEntry>().await?;
    let credentials = seed_collection::<Credential>().await?;
    let services = seed_collection::<ServiceListing>().await?;

    let profile_repo: Repository<Profile> = Repository::new();
    profile_repo.insert(&samples::default_profile()?).await?;

    tracing::info!(
        articles,
        projects,
        credentials,
        services,
        "seeding complete (+1 profile)"
    );

    Ok(())
}
