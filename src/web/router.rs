use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::web::{AppState, admin, auth, registration};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(registration::registration_page))
        .route("/register", post(registration::submit_registration))
        .route(
            "/api/registrations",
            get(admin::list_registrations).post(registration::submit_registration_api),
        )
        .route("/admin", get(admin::dashboard))
        .route("/admin/login", post(auth::process_login))
        .route("/admin/logout", post(auth::logout))
        .route("/admin/refresh", post(admin::refresh))
        .route("/admin/export/pdf", get(admin::download_pdf))
        .route("/admin/export/xlsx", get(admin::download_spreadsheet))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State};
    use reqwest::{Client, header, redirect::Policy};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;
    use crate::config::AppConfig;

    #[derive(Clone, Default)]
    struct FakeStore {
        posts: Arc<Mutex<Vec<Value>>>,
        listings: Arc<Mutex<usize>>,
    }

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn spawn_store(fake: FakeStore) -> String {
        let router = Router::new()
            .route(
                "/api/data/formulir",
                get(|State(f): State<FakeStore>| async move {
                    *f.listings.lock().unwrap() += 1;
                    Json(json!([
                        {"objectId": "1", "nama": "Budi", "sekolah": "SMA 1", "instagram": "@budi", "no_hp": "08123", "created": 1_700_000_000_000_i64},
                        {"objectId": "2", "nama": "Sari", "sekolah": "SMA 2", "instagram": "@sari", "no_hp": "08124", "created": 1_729_300_000_000_i64}
                    ]))
                })
                .post(|State(f): State<FakeStore>, Json(body): Json<Value>| async move {
                    f.posts.lock().unwrap().push(body);
                    Json(json!({"objectId": "NEW-1"}))
                }),
            )
            .with_state(fake);
        serve(router).await
    }

    async fn spawn_app(store_url: &str) -> String {
        spawn_app_with_office(store_url, None).await
    }

    async fn spawn_app_with_office(store_url: &str, soffice_bin: Option<&str>) -> String {
        let config = AppConfig::from_lookup(|key| match key {
            "ADMIN_PASSWORD" => Some("gppitulungagung".to_string()),
            "STORE_BASE_URL" => Some(store_url.to_string()),
            "SOFFICE_BIN" => soffice_bin.map(str::to_string),
            _ => None,
        })
        .unwrap();
        serve(build_router(AppState::new(config))).await
    }

    fn client() -> Client {
        Client::builder().redirect(Policy::none()).build().unwrap()
    }

    const BUDI: [(&str, &str); 4] = [
        ("nama", "Budi"),
        ("sekolah", "SMA 1"),
        ("instagram", "@budi"),
        ("no_hp", "08123"),
    ];

    #[tokio::test]
    async fn form_submission_posts_fields_and_clears_form() {
        let fake = FakeStore::default();
        let app = spawn_app(&spawn_store(fake.clone()).await).await;

        let response = client()
            .post(format!("{app}/register"))
            .form(&BUDI)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let html = response.text().await.unwrap();
        assert!(html.contains("Registrasi Berhasil!"));
        assert!(html.contains(r#"name="nama" type="text" placeholder="Masukkan nama lengkap Anda" value="""#));
        assert_eq!(
            *fake.posts.lock().unwrap(),
            vec![json!({"nama": "Budi", "sekolah": "SMA 1", "instagram": "@budi", "no_hp": "08123"})]
        );
    }

    #[tokio::test]
    async fn incomplete_form_is_not_sent() {
        let fake = FakeStore::default();
        let app = spawn_app(&spawn_store(fake.clone()).await).await;

        let response = client()
            .post(format!("{app}/register"))
            .form(&[("nama", "Budi"), ("sekolah", "SMA 1"), ("instagram", ""), ("no_hp", "08123")])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 422);
        let html = response.text().await.unwrap();
        assert!(html.contains("Data Tidak Lengkap"));
        assert!(html.contains(r#"value="SMA 1""#));
        assert!(fake.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unreachable_store_keeps_entered_values() {
        let app = spawn_app("http://127.0.0.1:9").await;

        let response = client()
            .post(format!("{app}/register"))
            .form(&BUDI)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 502);
        let html = response.text().await.unwrap();
        assert!(html.contains("Terjadi kesalahan saat mengirim data"));
        assert!(html.contains(r#"value="@budi""#));
    }

    #[tokio::test]
    async fn json_api_reports_object_id() {
        let fake = FakeStore::default();
        let app = spawn_app(&spawn_store(fake.clone()).await).await;

        let response = client()
            .post(format!("{app}/api/registrations"))
            .json(&json!({"nama": "Budi", "sekolah": "SMA 1", "instagram": "@budi", "no_hp": "08123"}))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["object_id"], "NEW-1");
    }

    #[tokio::test]
    async fn admin_flow_gates_lists_and_exports_without_requery() {
        let fake = FakeStore::default();
        let app = spawn_app(&spawn_store(fake.clone()).await).await;
        let http = client();

        let locked = http
            .get(format!("{app}/admin/export/xlsx"))
            .send()
            .await
            .unwrap();
        assert_eq!(locked.status(), 303);
        assert_eq!(locked.headers()[header::LOCATION], "/admin");

        let rejected = http
            .post(format!("{app}/admin/login"))
            .form(&[("password", "salah")])
            .send()
            .await
            .unwrap();
        assert_eq!(rejected.status(), 401);
        assert!(rejected.headers().get(header::SET_COOKIE).is_none());

        let accepted = http
            .post(format!("{app}/admin/login"))
            .form(&[("password", "gppitulungagung")])
            .send()
            .await
            .unwrap();
        assert_eq!(accepted.status(), 303);
        let set_cookie = accepted.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("kkr_admin=true"));

        let panel = http
            .get(format!("{app}/admin"))
            .header(header::COOKIE, "kkr_admin=true")
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(panel.contains("Total registrasi: 2 orang"));
        let sari = panel.find("Sari").unwrap();
        let budi = panel.find("Budi").unwrap();
        assert!(sari < budi, "newest registration should be listed first");
        assert_eq!(*fake.listings.lock().unwrap(), 1);

        let export = http
            .get(format!("{app}/admin/export/xlsx"))
            .header(header::COOKIE, "kkr_admin=true")
            .send()
            .await
            .unwrap();
        assert_eq!(export.status(), 200);
        assert_eq!(
            export.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"registrasi-kkr.xlsx\""
        );
        assert!(!export.bytes().await.unwrap().is_empty());
        assert_eq!(*fake.listings.lock().unwrap(), 1);

        let logout = http
            .post(format!("{app}/admin/logout"))
            .header(header::COOKIE, "kkr_admin=true")
            .send()
            .await
            .unwrap();
        assert_eq!(logout.status(), 303);
        let cleared = logout.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cleared.starts_with("kkr_admin="));
        assert!(!cleared.starts_with("kkr_admin=true"));
    }

    #[tokio::test]
    async fn pdf_export_without_office_binary_reports_json_error() {
        let app = spawn_app_with_office(
            &spawn_store(FakeStore::default()).await,
            Some("kkr-no-such-office-binary"),
        )
        .await;
        let http = client();

        let locked = http
            .get(format!("{app}/admin/export/pdf"))
            .send()
            .await
            .unwrap();
        assert_eq!(locked.status(), 303);
        assert_eq!(locked.headers()[header::LOCATION], "/admin");

        let failed = http
            .get(format!("{app}/admin/export/pdf"))
            .header(header::COOKIE, "kkr_admin=true")
            .send()
            .await
            .unwrap();
        assert_eq!(failed.status(), 500);
        assert!(failed.headers().get(header::CONTENT_DISPOSITION).is_none());
        let body: Value = failed.json().await.unwrap();
        assert_eq!(body["message"], "Gagal membuat file export. Silakan coba lagi.");
        assert!(body.get("object_id").is_none());
    }

    #[tokio::test]
    async fn refresh_goes_back_to_panel_which_reloads() {
        let fake = FakeStore::default();
        let app = spawn_app(&spawn_store(fake.clone()).await).await;
        let http = client();

        let refreshed = http
            .post(format!("{app}/admin/refresh"))
            .header(header::COOKIE, "kkr_admin=true")
            .send()
            .await
            .unwrap();
        assert_eq!(refreshed.status(), 303);
        assert_eq!(refreshed.headers()[header::LOCATION], "/admin");
        assert_eq!(*fake.listings.lock().unwrap(), 0);

        for expected in 1..=2 {
            let panel = http
                .get(format!("{app}/admin"))
                .header(header::COOKIE, "kkr_admin=true")
                .send()
                .await
                .unwrap();
            assert_eq!(panel.status(), 200);
            assert_eq!(*fake.listings.lock().unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn listing_api_requires_unlocked_session() {
        let app = spawn_app(&spawn_store(FakeStore::default()).await).await;

        let response = client()
            .get(format!("{app}/api/registrations"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
    }
}
