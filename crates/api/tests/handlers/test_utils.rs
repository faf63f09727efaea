use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use chrono::{NaiveDate, Utc};
use slotbook_api::{build_router, middleware::auth, ApiState};
use slotbook_core::{
    models::{
        clock::ClockTime,
        schedule::WorkSchedule,
        user::{Role, User},
        worker::Worker,
    },
    slots::SlotEngine,
    store::RecordStore,
};
use slotbook_db::memory::MemoryStore;
use uuid::Uuid;

pub const PASSWORD: &str = "s3cret-pass";

pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub admin: User,
    pub staff: User,
    pub client: User,
    pub worker: Worker,
}

pub fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 5, 6).unwrap()
}

/// Lets `user` act on a request through the identity header.
pub fn as_user(request: TestRequest, user: &User) -> TestRequest {
    request.add_header(
        HeaderName::from_static(auth::USER_ID_HEADER),
        HeaderValue::from_str(&user.id.to_string()).unwrap(),
    )
}

fn user(email: &str, role: Role, worker_id: Option<Uuid>) -> User {
    User {
        id: Uuid::new_v4(),
        first_name: email.split('@').next().unwrap().to_string(),
        last_name: "Tester".to_string(),
        email: email.to_string(),
        phone: String::new(),
        position: String::new(),
        department: String::new(),
        role,
        worker_id,
        password_hash: auth::hash_password(PASSWORD).unwrap(),
        registered_at: Utc::now(),
    }
}

impl TestContext {
    /// A server over a fresh memory store holding one worker (09:00-12:00,
    /// break 10:00-10:30) and an admin, a staff member linked to the worker,
    /// and a plain client.
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new())).await
    }

    pub async fn with_store(store: Arc<MemoryStore>) -> Self {
        let worker = Worker {
            id: Uuid::new_v4(),
            name: "Dana Reyes".to_string(),
            email: "dana.reyes@example.com".to_string(),
            phone: String::new(),
            position: "Advisor".to_string(),
            department: "Support".to_string(),
            schedule: WorkSchedule::with_single_break(
                t("09:00"),
                t("12:00"),
                t("10:00"),
                t("10:30"),
            )
            .unwrap(),
            is_active: true,
        };
        store.save_worker(worker.clone()).await.unwrap();

        let admin = store
            .insert_user(user("admin@example.com", Role::Admin, None))
            .await
            .unwrap();
        let staff = store
            .insert_user(user("dana@example.com", Role::Worker, Some(worker.id)))
            .await
            .unwrap();
        let client = store
            .insert_user(user("client@example.com", Role::User, None))
            .await
            .unwrap();

        let state = Arc::new(ApiState::new(store.clone(), SlotEngine::default()));
        let server = TestServer::new(build_router(state)).unwrap();

        Self {
            server,
            store,
            admin,
            staff,
            client,
            worker,
        }
    }
}
