//! Bundled sample dataset.
//!
//! Seeds the local fallback cache the first time a collection is served
//! offline, and feeds the `seed` CLI. Keys follow the entities' camelCase
//! serde shape; ids and timestamps are fixed so seeding is deterministic.

use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::{Collection, Profile};

pub fn records(collection: Collection) -> Value {
    match collection {
        Collection::Articles => json!([
            {
                "id": "9b2f64aa-0c8e-4d0b-9a6c-1f06a1b2c301",
                "title": "Building a Terminal-Style Portfolio",
                "slug": "building-a-terminal-style-portfolio",
                "excerpt": "How this site renders a fake shell, and why the backend stays boring.",
                "content": [
                    { "type": "heading", "level": 2, "text": "The idea" },
                    { "type": "paragraph", "text": "A portfolio does not need a framework safari. One binary, one database, and a fallback path for when the database is napping." },
                    { "type": "code", "language": "rust", "text": "let app = create_app();\naxum::serve(listener, app).await?;" },
                    { "type": "list", "items": ["keep handlers thin", "derive everything derivable", "log like you mean it"] }
                ],
                "category": "engineering",
                "tags": ["rust", "axum", "portfolio"],
                "author": "Dimas",
                "status": "published",
                "featured": true,
                "viewCount": 180,
                "likeCount": 24,
                "readingTime": 1,
                "createdAt": "2025-04-18T09:15:00Z",
                "updatedAt": "2025-05-02T19:40:00Z"
            },
            {
                "id": "4d1a2c3b-5e6f-47a8-b9c0-d1e2f3a4b502",
                "title": "Why I Fell for Rust on the Backend",
                "slug": "why-i-fell-for-rust-on-the-backend",
                "excerpt": "Exhaustive matches caught more content bugs than any test suite I wrote before.",
                "content": [
                    { "type": "paragraph", "text": "The compiler is a grumpy but thorough reviewer. Every tagged union in the content model is one more place it refuses to let a case slip." },
                    { "type": "heading", "level": 2, "text": "What actually sold me" },
                    { "type": "list", "items": ["sum types for content blocks", "errors as values", "fearless refactors"] }
                ],
                "category": "engineering",
                "tags": ["rust", "opinion"],
                "author": "Dimas",
                "status": "published",
                "featured": false,
                "viewCount": 95,
                "likeCount": 11,
                "readingTime": 1,
                "createdAt": "2025-06-14T08:30:00Z",
                "updatedAt": "2025-06-14T08:30:00Z"
            },
            {
                "id": "7c8d9e0f-1a2b-4c3d-8e4f-a5b6c7d8e903",
                "title": "Design Notes: Offline-First Admin Panels",
                "slug": "design-notes-offline-first-admin-panels",
                "excerpt": "Draft notes on serving a demo site when the real store is unreachable.",
                "content": [
                    { "type": "paragraph", "text": "Degrade loudly, recover quietly. The admin should always know which backend answered." }
                ],
                "category": "design",
                "tags": ["offline", "architecture"],
                "author": "Dimas",
                "status": "draft",
                "featured": false,
                "viewCount": 0,
                "likeCount": 0,
                "readingTime": 1,
                "createdAt": "2025-07-21T21:05:00Z",
                "updatedAt": "2025-07-21T21:05:00Z"
            }
        ]),
        Collection::Projects => json!([
            {
                "id": "0a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c11",
                "title": "Terminal Portfolio",
                "slug": "terminal-portfolio",
                "description": "Interactive terminal-themed portfolio site with a Rust content backend.",
                "technologies": ["Next.js", "TypeScript", "Rust", "Axum"],
                "category": "web",
                "repoUrl": "https://github.com/infinitedim/portfolio",
                "liveUrl": "https://infinitedim.site",
                "status": "completed",
                "featured": true,
                "createdAt": "2025-01-10T10:00:00Z",
                "updatedAt": "2025-03-22T16:45:00Z"
            },
            {
                "id": "1b2c3d4e-5f6a-4b7c-9d8e-0f1a2b3c4d12",
                "title": "Spotify Mood Mapper",
                "slug": "spotify-mood-mapper",
                "description": "Maps listening history to mood clusters and plots them over time.",
                "technologies": ["Python", "scikit-learn", "FastAPI"],
                "category": "data",
                "repoUrl": "https://github.com/infinitedim/mood-mapper",
                "liveUrl": null,
                "status": "in-progress",
                "featured": false,
                "createdAt": "2025-05-03T13:20:00Z",
                "updatedAt": "2025-07-01T09:10:00Z"
            },
            {
                "id": "2c3d4e5f-6a7b-4c8d-af9e-1a2b3c4d5e13",
                "title": "Home Lab Dashboard",
                "slug": "home-lab-dashboard",
                "description": "Single-pane status board for the machines under my desk.",
                "technologies": ["Rust", "SQLite", "HTMX"],
                "category": "tooling",
                "repoUrl": null,
                "liveUrl": null,
                "status": "draft",
                "featured": false,
                "createdAt": "2025-07-28T18:00:00Z",
                "updatedAt": "2025-07-28T18:00:00Z"
            }
        ]),
        Collection::Credentials => json!([
            {
                "id": "3d4e5f6a-7b8c-4d9e-8f0a-2b3c4d5e6f21",
                "title": "AWS Certified Solutions Architect – Associate",
                "slug": "aws-certified-solutions-architect-associate",
                "description": "Designing resilient, cost-aware architectures on AWS.",
                "issuer": "Amazon Web Services",
                "credentialId": "AWS-SAA-2024-77213",
                "issuedAt": "2024-09-12T00:00:00Z",
                "expiresAt": "2027-09-12T00:00:00Z",
                "status": "valid",
                "skills": ["AWS", "architecture", "networking"],
                "verifyUrl": "https://aws.amazon.com/verification",
                "featured": true,
                "createdAt": "2024-09-15T07:45:00Z",
                "updatedAt": "2024-09-15T07:45:00Z"
            },
            {
                "id": "4e5f6a7b-8c9d-4e0f-9a1b-3c4d5e6f7a22",
                "title": "CKA: Certified Kubernetes Administrator",
                "slug": "cka-certified-kubernetes-administrator",
                "description": "Cluster operations, troubleshooting and workload scheduling.",
                "issuer": "CNCF",
                "credentialId": "CKA-2023-18854",
                "issuedAt": "2023-03-02T00:00:00Z",
                "expiresAt": "2026-03-02T00:00:00Z",
                "status": "valid",
                "skills": ["Kubernetes", "containers", "operations"],
                "verifyUrl": "https://training.linuxfoundation.org/certification/verify",
                "featured": false,
                "createdAt": "2023-03-05T11:30:00Z",
                "updatedAt": "2023-03-05T11:30:00Z"
            },
            {
                "id": "5f6a7b8c-9d0e-4f1a-8b2c-4d5e6f7a8b23",
                "title": "Google UX Design Certificate",
                "slug": "google-ux-design-certificate",
                "description": "Foundations of user research and interaction design.",
                "issuer": "Google",
                "credentialId": null,
                "issuedAt": "2021-05-20T00:00:00Z",
                "expiresAt": "2024-05-20T00:00:00Z",
                "status": "expired",
                "skills": ["UX", "research"],
                "verifyUrl": null,
                "featured": false,
                "createdAt": "2021-05-22T09:00:00Z",
                "updatedAt": "2024-05-21T10:15:00Z"
            }
        ]),
        Collection::Services => json!([
            {
                "id": "6a7b8c9d-0e1f-4a2b-9c3d-5e6f7a8b9c31",
                "title": "Backend Development",
                "slug": "backend-development",
                "description": "APIs and services in Rust or Node, built to be operated, not just shipped.",
                "category": "development",
                "deliverables": ["API design", "implementation", "deployment runbook"],
                "priceHint": "from $1,500",
                "status": "active",
                "featured": true,
                "createdAt": "2025-02-01T12:00:00Z",
                "updatedAt": "2025-02-01T12:00:00Z"
            },
            {
                "id": "7b8c9d0e-1f2a-4b3c-8d4e-6f7a8b9c0d32",
                "title": "Performance Audit",
                "slug": "performance-audit",
                "description": "Profiling and a prioritized fix list for slow web backends.",
                "category": "consulting",
                "deliverables": ["profiling report", "fix list", "follow-up call"],
                "priceHint": "from $600",
                "status": "active",
                "featured": false,
                "createdAt": "2025-02-10T12:00:00Z",
                "updatedAt": "2025-04-18T15:30:00Z"
            },
            {
                "id": "8c9d0e1f-2a3b-4c4d-9e5f-7a8b9c0d1e33",
                "title": "WordPress Rescue",
                "slug": "wordpress-rescue",
                "description": "Retired offering, kept for the archive.",
                "category": "development",
                "deliverables": ["site migration"],
                "priceHint": null,
                "status": "archived",
                "featured": false,
                "createdAt": "2024-06-01T12:00:00Z",
                "updatedAt": "2025-01-05T12:00:00Z"
            }
        ]),
        Collection::Profile => json!([
            {
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "Dimas Maulana",
                "headline": "Full Stack Developer",
                "bio": "Building web backends and the occasional terminal-themed frontend. Rust enthusiast, coffee dependent.",
                "location": "Bandung, Indonesia",
                "email": "hello@infinitedim.site",
                "skills": ["Rust", "TypeScript", "React", "PostgreSQL", "Kubernetes"],
                "social": {
                    "github": "https://github.com/infinitedim",
                    "linkedin": "https://linkedin.com/in/infinitedim",
                    "twitter": null,
                    "website": "https://infinitedim.site"
                },
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2025-06-30T08:00:00Z"
            }
        ]),
    }
}

/// The bundled profile record, used when no profile was ever stored.
pub fn default_profile() -> Result<Profile> {
    let record = records(Collection::Profile)
        .as_array()
        .and_then(|a| a.first().cloned())
        .ok_or_else(|| Error::Storage("bundled profile sample missing".into()))?;
    serde_json::from_value(record)
        .map_err(|e| Error::Storage(format!("bundled profile sample malformed: {e}")))
}
