// /token/status over a live server: decode-and-compare only, no
// signature verification anywhere.

#[cfg(test)]
mod test {

    use chrono::Utc;
    use serde_json::{json, Value};

    use crate::config::settings::CacheKind;
    use crate::server::server::{router, AppState};
    use crate::tests::common::{build_reqwest_client, gateway_config, make_bearer_token, spawn_axum};

    async fn spawn_gateway() -> (tokio::task::JoinHandle<()>, std::net::SocketAddr) {
        let config = gateway_config("http://127.0.0.1:9/getToken", CacheKind::Disabled);
        let state = AppState::new(config, None).unwrap();
        spawn_axum(router(state).await).await
    }

    #[tokio::test]
    async fn live_token_is_valid() {
        let (handle, addr) = spawn_gateway().await;
        let client = build_reqwest_client();

        let now = Utc::now().timestamp();
        let token = make_bearer_token(json!({ "exp": now + 100, "iat": now - 10 }));

        let response = client
            .get(format!("http://{}/token/status", addr))
            .query(&[("token", token)])
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["valid"], json!(true));
        assert_eq!(body["expires_at"], json!(now + 100));
        assert_eq!(body["issued_at"], json!(now - 10));
        // allow a second of clock drift between crafting and serving
        let time_left = body["time_left_seconds"].as_i64().unwrap();
        assert!((95..=100).contains(&time_left), "time_left {}", time_left);

        handle.abort();
    }

    #[tokio::test]
    async fn expired_token_reports_negative_time_left() {
        let (handle, addr) = spawn_gateway().await;
        let client = build_reqwest_client();

        let now = Utc::now().timestamp();
        let token = make_bearer_token(json!({ "exp": now - 50, "iat": now - 500 }));

        let body: Value = client
            .get(format!("http://{}/token/status", addr))
            .query(&[("token", token)])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["valid"], json!(false));
        let time_left = body["time_left_seconds"].as_i64().unwrap();
        assert!((-55..=-50).contains(&time_left), "time_left {}", time_left);

        handle.abort();
    }

    #[tokio::test]
    async fn missing_token_parameter_is_400() {
        let (handle, addr) = spawn_gateway().await;
        let client = build_reqwest_client();

        for url in [
            format!("http://{}/token/status", addr),
            format!("http://{}/token/status?token=", addr),
        ] {
            let response = client.get(&url).send().await.unwrap();
            assert_eq!(response.status().as_u16(), 400);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({ "error": "Missing token parameter." }));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn malformed_token_is_400() {
        let (handle, addr) = spawn_gateway().await;
        let client = build_reqwest_client();

        for bad in ["not-a-jwt", "only.two", "a.!!!.c"] {
            let response = client
                .get(format!("http://{}/token/status", addr))
                .query(&[("token", bad)])
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), 400, "token {}", bad);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({ "error": "Invalid token format." }));
        }

        handle.abort();
    }

    #[tokio::test]
    async fn issued_at_is_omitted_when_absent() {
        let (handle, addr) = spawn_gateway().await;
        let client = build_reqwest_client();

        let now = Utc::now().timestamp();
        let token = make_bearer_token(json!({ "exp": now + 60 }));

        let body: Value = client
            .get(format!("http://{}/token/status", addr))
            .query(&[("token", token)])
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["valid"], json!(true));
        assert!(body.get("issued_at").is_none());

        handle.abort();
    }
}
