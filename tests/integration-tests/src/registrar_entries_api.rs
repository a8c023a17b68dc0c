// Copyright (c) Microsoft. All rights reserved.

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::net::SocketAddr;
    use std::sync::Arc;

    use core_objects::RegistrationRecord;
    use hyper::service::{make_service_fn, service_fn};
    use hyper::{Body, Method, Request, StatusCode};
    use registrar_api::{add_entry, delete_entry, uri, ErrorBody};
    use registration_manager::RegistrationManager;
    use reload_notifier::FakeNotifier;
    use spire_client::SpireFakeConnector;
    use tempfile::{tempdir, TempDir};
    use tokio::time::{sleep, Duration};

    // base64 of "apiVersion: v1"
    const PAYLOAD: &str = "YXBpVmVyc2lvbjogdjE=";

    #[tokio::test]
    async fn full_workload_lifecycle() {
        let server = start_test_server().await;
        let kubeconfig = server.dir.path().join("kubeconfigs").join("prod-a.yaml");

        // ======= register ======================================================================
        let (status, body) = post(&server, uri::ADD_ENTRY, workload_entry()).await;
        assert_eq!(status, StatusCode::OK);
        let created: add_entry::Response =
            serde_json::from_slice(&body).expect("Can parse the creation response");
        assert_eq!("Entry created", created.message);

        let records = list_records(&server).await;
        assert_eq!(1, records.len());
        assert_eq!(created.entry_id, records[0].id);
        assert_eq!("/ns/app/sa/web", records[0].spiffe_id.path);
        assert_eq!("/ns/spire/sa/spire-agent", records[0].parent_id.path);

        assert_eq!(
            "apiVersion: v1",
            std::fs::read_to_string(&kubeconfig).expect("Can read the synced kubeconfig")
        );

        let psat = read_json(&server, "k8s_psat.json");
        assert_eq!(
            serde_json::json!(["spire:spire-agent"]),
            psat["clusters"][0]["prod-a"]["service_account_allow_list"]
        );
        assert_eq!(
            serde_json::json!(kubeconfig.display().to_string()),
            psat["clusters"][0]["prod-a"]["kube_config_file"]
        );
        assert_eq!(1, *server.notifier.notify_count.lock().unwrap());

        // ======= deregister ====================================================================
        let (status, body) = post(&server, uri::DELETE_ENTRY, workload_entry()).await;
        assert_eq!(status, StatusCode::OK);
        let deleted: delete_entry::Response =
            serde_json::from_slice(&body).expect("Can parse the deletion response");
        assert_eq!("Entry deleted", deleted.message);

        let records = list_records(&server).await;
        assert_eq!(0, records.len());

        // The cluster wiring stays, the agent registered on it still attests.
        let psat = read_json(&server, "k8s_psat.json");
        assert!(!psat["clusters"][0]["prod-a"].is_null());
        assert!(kubeconfig.exists());
        assert_eq!(1, *server.notifier.notify_count.lock().unwrap());
    }

    #[tokio::test]
    async fn agent_registration_targets_the_server_anchor() {
        let server = start_test_server().await;

        let (status, _) = post(&server, uri::ADD_ENTRY, agent_entry()).await;
        assert_eq!(status, StatusCode::OK);

        let records = list_records(&server).await;
        assert_eq!(1, records.len());
        assert_eq!("/ns/spire/sa/spire-agent", records[0].spiffe_id.path);
        assert_eq!("/spire/server", records[0].parent_id.path);

        let selectors: Vec<(String, String)> = records[0]
            .selectors
            .iter()
            .map(|selector| (selector.selector_type.clone(), selector.value.clone()))
            .collect();
        assert_eq!(
            vec![
                ("k8s_psat".to_string(), "cluster:prod-a".to_string()),
                ("k8s_psat".to_string(), "agent_ns:spire".to_string()),
                ("k8s_psat".to_string(), "agent_sa:spire-agent".to_string()),
            ],
            selectors
        );

        // The bundle document is only synced when enabled in the config.
        let bundle = read_json(&server, "k8s_bundle.json");
        assert_eq!(serde_json::json!([]), bundle["clusters"]);
    }

    #[tokio::test]
    async fn deregistering_the_agent_unwires_the_cluster() {
        let server = start_test_server().await;
        let kubeconfig = server.dir.path().join("kubeconfigs").join("prod-a.yaml");

        post(&server, uri::ADD_ENTRY, agent_entry()).await;
        assert!(kubeconfig.exists());

        let (status, _) = post(&server, uri::DELETE_ENTRY, agent_entry()).await;
        assert_eq!(status, StatusCode::OK);

        let psat = read_json(&server, "k8s_psat.json");
        assert!(psat["clusters"][0]["prod-a"].is_null());
        assert!(!kubeconfig.exists());
        assert_eq!(2, *server.notifier.notify_count.lock().unwrap());
    }

    #[tokio::test]
    async fn deregistering_an_unknown_identity_is_a_noop() {
        let server = start_test_server().await;

        let (status, body) = post(&server, uri::DELETE_ENTRY, workload_entry()).await;
        assert_eq!(status, StatusCode::OK);
        let deleted: delete_entry::Response =
            serde_json::from_slice(&body).expect("Can parse the deletion response");
        assert_eq!("Entry deleted", deleted.message);

        assert!(server.connector.deleted_ids.lock().unwrap().is_empty());
        assert_eq!(0, *server.notifier.notify_count.lock().unwrap());
    }

    #[tokio::test]
    async fn incomplete_entry_is_rejected() {
        let server = start_test_server().await;

        let entry = serde_json::json!({
            "trustDomain": "example.org",
            "serviceAccount": "",
            "namespace": "app",
            "cluster": "prod-a",
        });

        let (status, body) = post(&server, uri::ADD_ENTRY, entry).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorBody = serde_json::from_slice(&body).expect("Can parse the error body");
        assert!(error.error.contains("serviceAccount"));

        assert!(server.connector.created_records.lock().unwrap().is_empty());
    }

    struct TestServer {
        dir: TempDir,
        pub address: SocketAddr,
        pub connector: Arc<SpireFakeConnector>,
        pub notifier: Arc<FakeNotifier>,
    }

    async fn start_test_server() -> TestServer {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("k8s_psat.json"), r#"{"clusters": [ {} ]}"#).unwrap();
        std::fs::write(dir.path().join("k8s_bundle.json"), r#"{"clusters": []}"#).unwrap();
        std::fs::create_dir(dir.path().join("kubeconfigs")).unwrap();

        let mut config =
            registrar_config::Config::load_config(core_objects::CONFIG_DEFAULT_PATH).unwrap();
        config.config_dir = dir.path().display().to_string();

        let connector = Arc::new(SpireFakeConnector::default());
        let notifier = Arc::new(FakeNotifier::default());
        let manager = Arc::new(RegistrationManager::new(
            &config,
            connector.clone(),
            notifier.clone(),
        ));
        let service = entries_api::Service::new(manager);

        let make_service = make_service_fn(move |_| {
            let service = service.clone();

            async move {
                Ok::<_, Infallible>(service_fn(move |request| {
                    let service = service.clone();

                    async move { Ok::<_, Infallible>(service.handle(request).await) }
                }))
            }
        });

        let server = hyper::Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(make_service);
        let address = server.local_addr();

        tokio::spawn(async move {
            server.await.unwrap();
        });
        sleep(Duration::from_millis(10)).await;

        TestServer {
            dir,
            address,
            connector,
            notifier,
        }
    }

    fn workload_entry() -> serde_json::Value {
        serde_json::json!({
            "trustDomain": "example.org",
            "serviceAccount": "web",
            "namespace": "app",
            "cluster": "prod-a",
            "kubeConfig": PAYLOAD,
        })
    }

    fn agent_entry() -> serde_json::Value {
        serde_json::json!({
            "trustDomain": "example.org",
            "serviceAccount": "spire-agent",
            "namespace": "spire",
            "cluster": "prod-a",
            "kubeConfig": PAYLOAD,
        })
    }

    async fn post(
        server: &TestServer,
        path: &str,
        entry: serde_json::Value,
    ) -> (StatusCode, Vec<u8>) {
        let client = hyper::Client::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("http://{}{}", server.address, path))
            .body(Body::from(entry.to_string()))
            .unwrap();

        let response = client
            .request(request)
            .await
            .expect("Can reach the registrar API");
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();

        (status, body.to_vec())
    }

    async fn list_records(server: &TestServer) -> Vec<RegistrationRecord> {
        let client = hyper::Client::new();
        let uri = format!("http://{}{}", server.address, uri::LIST_ENTRIES)
            .parse()
            .unwrap();

        let response = client.get(uri).await.expect("Can reach the registrar API");
        assert_eq!(response.status(), StatusCode::OK);
        let body = hyper::body::to_bytes(response.into_body()).await.unwrap();

        serde_json::from_slice(&body).expect("Can parse the record list")
    }

    fn read_json(server: &TestServer, file: &str) -> serde_json::Value {
        let content = std::fs::read(server.dir.path().join(file)).expect("Can read the document");

        serde_json::from_slice(&content).expect("Can parse the document")
    }
}
