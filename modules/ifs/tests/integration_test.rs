//! End-to-end tests for the parts-map module against in-memory SQLite.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use ifs::contract::model::{
    JournalPatch, NewJournal, NewPart, NewRelationship, PartPatch, PartRole, RelationshipPatch,
};
use ifs::contract::{IfsApi, IfsError};
use ifs::domain::error::DomainError;
use ifs::gateways::IfsLocalClient;
use ifs::Service;

struct Harness {
    #[allow(dead_code)]
    db: DatabaseConnection,
    service: Service,
    auth_service: auth::Service,
    keys: Arc<auth::TokenKeys>,
}

async fn setup() -> Harness {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect to in-memory sqlite");
    auth::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("auth migrations");
    ifs::infra::storage::migrations::Migrator::up(&db, None)
        .await
        .expect("ifs migrations");
    let keys = Arc::new(auth::TokenKeys::from_secret("test-secret", 3600));
    Harness {
        service: Service::new(db.clone()),
        auth_service: auth::Service::new(db.clone(), keys.clone()),
        keys,
        db,
    }
}

impl Harness {
    async fn register(&self, username: &str) -> (Uuid, String) {
        let (user, token) = self
            .auth_service
            .register(auth::contract::model::NewAccount {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "correct horse battery".to_string(),
            })
            .await
            .expect("register");
        (user.id, token)
    }
}

fn named_part(name: &str, role: Option<&str>) -> NewPart {
    NewPart {
        name: name.to_string(),
        role: role.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn system_creation_is_idempotent_and_seeds_self() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;

    let first = h.service.get_or_create_system(user_id).await.unwrap();
    let second = h.service.get_or_create_system(user_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.part_count, 1);
    assert!(second.relationships.is_empty());
    let self_parts: Vec<_> = second
        .parts
        .values()
        .filter(|p| p.role == Some(PartRole::SelfRole))
        .collect();
    assert_eq!(self_parts.len(), 1);
    assert_eq!(self_parts[0].name, "Self");
}

#[tokio::test]
async fn self_part_cannot_be_deleted_or_demoted() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let system = h.service.get_or_create_system(user_id).await.unwrap();
    let self_id = *system.parts.keys().next().unwrap();

    let err = h.service.delete_part(user_id, self_id).await.unwrap_err();
    assert!(matches!(err, DomainError::SelfPartProtected));

    let err = h
        .service
        .update_part(
            user_id,
            self_id,
            PartPatch {
                role: Some("Exile".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SelfPartProtected));
}

#[tokio::test]
async fn second_self_part_is_a_conflict() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    h.service.get_or_create_system(user_id).await.unwrap();

    let err = h
        .service
        .create_part(user_id, named_part("Impostor", Some("Self")))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateSelfPart));

    let part = h
        .service
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let err = h
        .service
        .update_part(
            user_id,
            part.id,
            PartPatch {
                role: Some("Self".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateSelfPart));
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;

    let err = h
        .service
        .create_part(user_id, named_part("Mystery", Some("Gatekeeper")))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    let err = h
        .service
        .create_part(user_id, named_part("  ", None))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn partial_update_touches_only_supplied_fields() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;

    let part = h
        .service
        .create_part(
            user_id,
            NewPart {
                name: "Critic".to_string(),
                role: Some("Manager".to_string()),
                description: Some("keeps standards high".to_string()),
                feelings: vec!["tense".to_string()],
                beliefs: vec!["mistakes are fatal".to_string()],
                triggers: vec![],
                needs: vec![],
            },
        )
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let updated = h
        .service
        .update_part(
            user_id,
            part.id,
            PartPatch {
                feelings: Some(vec!["calmer".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Critic");
    assert_eq!(updated.role, Some(PartRole::Manager));
    assert_eq!(updated.description, "keeps standards high");
    assert_eq!(updated.feelings, vec!["calmer".to_string()]);
    assert_eq!(updated.beliefs, vec!["mistakes are fatal".to_string()]);
    assert!(updated.updated_at > part.updated_at);
    assert_eq!(updated.created_at, part.created_at);
}

#[tokio::test]
async fn relationships_require_owned_endpoints() {
    let h = setup().await;
    let (ada, _) = h.register("ada").await;
    let (grace, _) = h.register("grace").await;

    let ada_part = h
        .service
        .create_part(ada, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let grace_part = h
        .service
        .create_part(grace, named_part("Dreamer", None))
        .await
        .unwrap();

    let err = h
        .service
        .create_relationship(
            ada,
            NewRelationship {
                source_id: ada_part.id,
                target_id: grace_part.id,
                relationship_type: "protects".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));

    // Nothing was persisted.
    assert!(h.service.list_relationships(ada).await.unwrap().is_empty());
}

#[tokio::test]
async fn manager_protects_exile_scenario() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    h.service.get_or_create_system(user_id).await.unwrap();

    let a = h
        .service
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let b = h
        .service
        .create_part(user_id, named_part("Small One", Some("Exile")))
        .await
        .unwrap();
    let edge = h
        .service
        .create_relationship(
            user_id,
            NewRelationship {
                source_id: a.id,
                target_id: b.id,
                relationship_type: "protects".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let parts = h.service.list_parts(user_id).await.unwrap();
    assert_eq!(parts.len(), 3); // Self, A, B
    let rels = h.service.list_relationships(user_id).await.unwrap();
    assert_eq!(rels.len(), 1);
    assert_eq!(rels[0].id, edge.id);

    // Deleting A removes the edge; B remains.
    h.service.delete_part(user_id, a.id).await.unwrap();
    assert!(h.service.list_relationships(user_id).await.unwrap().is_empty());
    let names: Vec<String> = h
        .service
        .list_parts(user_id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert!(names.contains(&"Small One".to_string()));
    assert!(!names.contains(&"Critic".to_string()));
}

#[tokio::test]
async fn self_referential_relationship_is_allowed() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let part = h
        .service
        .create_part(user_id, named_part("Loop", None))
        .await
        .unwrap();

    let edge = h
        .service
        .create_relationship(
            user_id,
            NewRelationship {
                source_id: part.id,
                target_id: part.id,
                relationship_type: "blends with".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(edge.source_id, edge.target_id);
}

#[tokio::test]
async fn relationship_updates_keep_endpoints() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let a = h.service.create_part(user_id, named_part("A", None)).await.unwrap();
    let b = h.service.create_part(user_id, named_part("B", None)).await.unwrap();
    let edge = h
        .service
        .create_relationship(
            user_id,
            NewRelationship {
                source_id: a.id,
                target_id: b.id,
                relationship_type: "protects".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();

    let updated = h
        .service
        .update_relationship(
            user_id,
            edge.id,
            RelationshipPatch {
                relationship_type: Some("conflicts with".to_string()),
                description: Some("pulls in both directions".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.relationship_type, "conflicts with");
    assert_eq!(updated.source_id, a.id);
    assert_eq!(updated.target_id, b.id);
}

#[tokio::test]
async fn journals_default_title_and_sort_newest_first() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;

    let first = h
        .service
        .create_journal(
            user_id,
            NewJournal {
                title: None,
                content: "sat with the critic today".to_string(),
                part_id: None,
                metadata: None,
            },
        )
        .await
        .unwrap();
    assert!(first.title.starts_with("Journal "));

    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = h
        .service
        .create_journal(
            user_id,
            NewJournal {
                title: Some("Evening".to_string()),
                content: "calmer now".to_string(),
                part_id: None,
                metadata: Some(json!({"emotions": ["calm"]})),
            },
        )
        .await
        .unwrap();

    let listed = h.service.list_journals(user_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    let err = h
        .service
        .create_journal(
            user_id,
            NewJournal {
                title: None,
                content: "   ".to_string(),
                part_id: None,
                metadata: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn journal_part_tag_must_be_owned() {
    let h = setup().await;
    let (ada, _) = h.register("ada").await;
    let (grace, _) = h.register("grace").await;
    let grace_part = h
        .service
        .create_part(grace, named_part("Dreamer", None))
        .await
        .unwrap();

    let err = h
        .service
        .create_journal(
            ada,
            NewJournal {
                title: None,
                content: "about someone else's part".to_string(),
                part_id: Some(grace_part.id),
                metadata: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn deleting_a_part_detaches_its_journals() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let part = h
        .service
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let entry = h
        .service
        .create_journal(
            user_id,
            NewJournal {
                title: None,
                content: "the critic was loud".to_string(),
                part_id: Some(part.id),
                metadata: None,
            },
        )
        .await
        .unwrap();

    h.service.delete_part(user_id, part.id).await.unwrap();

    let entry = h.service.get_journal(user_id, entry.id).await.unwrap();
    assert_eq!(entry.part_id, None);
}

#[tokio::test]
async fn journal_part_tag_and_metadata_can_be_cleared() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let part = h
        .service
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let entry = h
        .service
        .create_journal(
            user_id,
            NewJournal {
                title: Some("Tagged".to_string()),
                content: "the critic again".to_string(),
                part_id: Some(part.id),
                metadata: Some(json!({"emotions": ["tense"]})),
            },
        )
        .await
        .unwrap();

    // Outer None leaves both fields alone.
    let updated = h
        .service
        .update_journal(
            user_id,
            entry.id,
            JournalPatch {
                title: Some("Still tagged".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.part_id, Some(part.id));
    assert!(updated.metadata.is_some());

    // Inner None clears them.
    let updated = h
        .service
        .update_journal(
            user_id,
            entry.id,
            JournalPatch {
                part_id: Some(None),
                metadata: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.part_id, None);
    assert_eq!(updated.metadata, None);
    assert_eq!(updated.content, "the critic again");
}

#[tokio::test]
async fn reset_keeps_self_and_journals() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    h.service.get_or_create_system(user_id).await.unwrap();

    let a = h.service.create_part(user_id, named_part("A", None)).await.unwrap();
    let b = h.service.create_part(user_id, named_part("B", None)).await.unwrap();
    h.service
        .create_relationship(
            user_id,
            NewRelationship {
                source_id: a.id,
                target_id: b.id,
                relationship_type: "supports".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    h.service
        .create_journal(
            user_id,
            NewJournal {
                title: Some("Before".to_string()),
                content: "kept across resets".to_string(),
                part_id: Some(a.id),
                metadata: None,
            },
        )
        .await
        .unwrap();

    let after = h.service.reset_system(user_id).await.unwrap();
    assert_eq!(after.part_count, 1);
    assert_eq!(after.relationship_count, 0);
    assert_eq!(after.journal_count, 1);
    assert!(after
        .parts
        .values()
        .all(|p| p.role == Some(PartRole::SelfRole)));

    let journals = h.service.list_journals(user_id).await.unwrap();
    assert_eq!(journals.len(), 1);
    assert_eq!(journals[0].part_id, None); // tag pointed at a deleted part
}

#[tokio::test]
async fn reset_requires_an_existing_system() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;

    // The account exists but the system was never touched.
    let err = h.service.reset_system(user_id).await.unwrap_err();
    assert!(matches!(err, DomainError::SystemNotFound));

    // The failed reset must not have created one as a side effect.
    let err = h.service.reset_system(user_id).await.unwrap_err();
    assert!(matches!(err, DomainError::SystemNotFound));

    h.service.get_or_create_system(user_id).await.unwrap();
    let after = h.service.reset_system(user_id).await.unwrap();
    assert_eq!(after.part_count, 1);
}

#[tokio::test]
async fn cross_user_access_reads_as_not_found() {
    let h = setup().await;
    let (ada, _) = h.register("ada").await;
    let (grace, _) = h.register("grace").await;
    let part = h
        .service
        .create_part(ada, named_part("Private", None))
        .await
        .unwrap();

    let err = h.service.get_part(grace, part.id).await.unwrap_err();
    assert!(matches!(err, DomainError::PartNotFound { .. }));
    let err = h.service.delete_part(grace, part.id).await.unwrap_err();
    assert!(matches!(err, DomainError::PartNotFound { .. }));
}

#[tokio::test]
async fn stats_export_and_guidance_follow_the_level() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    h.service
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    h.service
        .create_journal(
            user_id,
            NewJournal {
                title: None,
                content: "note".to_string(),
                part_id: None,
                metadata: None,
            },
        )
        .await
        .unwrap();

    let stats = h.service.system_stats(user_id).await.unwrap();
    assert_eq!(stats.part_count, 2);
    assert_eq!(stats.journal_count, 1);

    let export = h.service.export_system(user_id).await.unwrap();
    assert_eq!(export.parts.len(), 2);
    assert_eq!(export.journals.len(), 1);

    let (level, fields) = h.service.guidance(user_id).await.unwrap();
    assert_eq!(level.as_str(), "mixed");
    assert!(fields.contains_key("name"));

    let overview = h
        .service
        .set_abstraction_level(user_id, "abstract")
        .await
        .unwrap();
    assert_eq!(overview.abstraction_level.as_str(), "abstract");
    let (level, _) = h.service.guidance(user_id).await.unwrap();
    assert_eq!(level.as_str(), "abstract");

    let err = h
        .service
        .set_abstraction_level(user_id, "vague")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

// Contract gateway

#[tokio::test]
async fn local_gateway_mirrors_the_service() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let client: Arc<dyn IfsApi> = Arc::new(IfsLocalClient::new(Arc::new(h.service.clone())));

    let system = client.get_system(user_id).await.unwrap();
    assert_eq!(system.part_count, 1);

    let part = client
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let edge = client
        .create_relationship(
            user_id,
            NewRelationship {
                source_id: part.id,
                target_id: part.id,
                relationship_type: "watches".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(edge.source_id, part.id);

    let entry = client
        .create_journal(
            user_id,
            NewJournal {
                title: None,
                content: "written through the gateway".to_string(),
                part_id: Some(part.id),
                metadata: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(entry.part_id, Some(part.id));

    let stats = client.system_stats(user_id).await.unwrap();
    assert_eq!(stats.part_count, 2);
    assert_eq!(stats.relationship_count, 1);

    client.delete_part(user_id, part.id).await.unwrap();
    assert!(client.list_relationships(user_id).await.unwrap().is_empty());
    let export = client.export_system(user_id).await.unwrap();
    assert_eq!(export.journals.len(), 1);
}

#[tokio::test]
async fn gateway_errors_carry_the_contract_taxonomy() {
    let h = setup().await;
    let (user_id, _) = h.register("ada").await;
    let client = IfsLocalClient::new(Arc::new(h.service.clone()));

    let err = client.reset_system(user_id).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IfsError>(),
        Some(IfsError::SystemNotFound)
    ));

    let err = client.get_part(user_id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IfsError>(),
        Some(IfsError::NotFound { .. })
    ));

    let err = client
        .create_part(user_id, named_part("", None))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IfsError>(),
        Some(IfsError::Validation { .. })
    ));
}

// REST surface

fn app(h: &Harness) -> axum::Router {
    let api = axum::Router::new()
        .merge(auth::api::rest::routes::router(Arc::new(
            h.auth_service.clone(),
        )))
        .merge(ifs::api::rest::routes::router(Arc::new(h.service.clone())));
    axum::Router::new()
        .nest("/api", api)
        .layer(axum::Extension(h.keys.clone()))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[tokio::test]
async fn full_flow_over_http() {
    let h = setup().await;
    let (_, token) = h.register("ada").await;
    let app = app(&h);

    // Fetch-or-create the system.
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/system", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let system = body_json(response).await;
    assert_eq!(system["part_count"], 1);
    assert_eq!(system["abstraction_level"], "mixed");

    // Create a part.
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/parts",
            &token,
            Some(json!({"name": "Critic", "role": "Manager", "feelings": ["tense"]})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let part = body_json(response).await;
    assert_eq!(part["role"], "Manager");

    // Bad role is a 400 with the uniform error body.
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/parts",
            &token,
            Some(json!({"name": "X", "role": "Gatekeeper"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());

    // Deleting the Self part conflicts.
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/parts", &token, None))
        .await
        .unwrap();
    let parts = body_json(response).await;
    let self_id = parts
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["role"] == "Self")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let response = app
        .clone()
        .oneshot(authed(
            "DELETE",
            &format!("/api/parts/{self_id}"),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Guidance follows the level.
    let response = app
        .clone()
        .oneshot(authed("GET", "/api/system/guidance", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let guidance = body_json(response).await;
    assert_eq!(guidance["abstraction_level"], "mixed");
    assert!(guidance["fields"]["name"].is_string());

    // Unauthenticated requests bounce.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/system")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn explicit_null_clears_the_journal_part_tag_over_http() {
    let h = setup().await;
    let (user_id, token) = h.register("ada").await;
    let part = h
        .service
        .create_part(user_id, named_part("Critic", Some("Manager")))
        .await
        .unwrap();
    let app = app(&h);

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/journals",
            &token,
            Some(json!({"content": "tagged", "part_id": part.id})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry = body_json(response).await;
    let entry_id = entry["id"].as_str().unwrap().to_string();

    // A body without the field leaves the tag in place.
    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/api/journals/{entry_id}"),
            &token,
            Some(json!({"title": "renamed"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["part_id"].as_str(), Some(part.id.to_string().as_str()));

    // An explicit null clears it.
    let response = app
        .oneshot(authed(
            "PUT",
            &format!("/api/journals/{entry_id}"),
            &token,
            Some(json!({"part_id": null})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["part_id"].is_null());
}

#[tokio::test]
async fn reset_before_first_system_access_is_not_found_over_http() {
    let h = setup().await;
    let (_, token) = h.register("ada").await;
    let app = app(&h);

    let response = app
        .clone()
        .oneshot(authed("POST", "/api/system/reset", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A GET creates the system; then the reset goes through.
    app.clone()
        .oneshot(authed("GET", "/api/system", &token, None))
        .await
        .unwrap();
    let response = app
        .oneshot(authed("POST", "/api/system/reset", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_ids_read_as_not_found_over_http() {
    let h = setup().await;
    let (_, token) = h.register("ada").await;
    let app = app(&h);

    for uri in [
        format!("/api/parts/{}", Uuid::new_v4()),
        format!("/api/relationships/{}", Uuid::new_v4()),
        format!("/api/journals/{}", Uuid::new_v4()),
    ] {
        let response = app
            .clone()
            .oneshot(authed("GET", &uri, &token, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}
